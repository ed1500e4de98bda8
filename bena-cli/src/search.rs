//! Search command implementation for the Bena CLI.

use std::io::Write;

use bena_ranker::{EngineConfig, RecommendationEngine, SearchResults};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_LENGTH, ARG_MIN_SCORE, ARG_QUERY, CliError, DEFAULT_DATABASE,
    ENV_SEARCH_QUERY, fs, load_prepared, write_json,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "search",
    long_about = "Fuzzy-match a free-text query against place names, tags, \
                 Arabic names and addresses. Matches below the minimum score \
                 are dropped.",
    about = "Search places by free text"
)]
#[ortho_config(prefix = "BENA")]
pub(crate) struct SearchArgs {
    /// Text to search for.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Path to the SQLite snapshot database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Number of results (1 to 10).
    #[arg(long = ARG_LENGTH, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) length: Option<i64>,
    /// Minimum fuzzy score (0 to 100) a place needs to match.
    #[arg(long = ARG_MIN_SCORE, value_name = "score")]
    #[serde(default)]
    pub(crate) min_score: Option<u8>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    /// Path to the snapshot database.
    pub(crate) database: Utf8PathBuf,
    /// Query as given.
    pub(crate) query: String,
    /// Requested number of results.
    pub(crate) length: Option<i64>,
    /// Engine tuning.
    pub(crate) engine: EngineConfig,
}

impl SearchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        fs::require_existing(&self.database, ARG_DATABASE)
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_QUERY,
            env: ENV_SEARCH_QUERY,
        })?;
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            min_search_score: args.min_score.unwrap_or(defaults.min_search_score),
            ..defaults
        };
        Ok(Self {
            database,
            query,
            length: args.length,
            engine,
        })
    }
}

pub(crate) fn run_search_with(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let results = execute_search(&config)?;
    write_json(writer, &results)
}

pub(crate) fn execute_search(config: &SearchConfig) -> Result<SearchResults, CliError> {
    let engine = RecommendationEngine::new(config.engine.clone())?;
    let prepared = load_prepared(&config.database, &engine)?;
    Ok(engine.search(&prepared, &config.query, config.length))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
