//! Recommend command implementation for the Bena CLI.

use std::io::Write;

use bena_ranker::{
    EngineConfig, HybridWeights, Recommendation, RecommendationEngine, RecommendationRequest,
};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CONTENT_WEIGHT, ARG_DATABASE, ARG_LENGTH, ARG_METHOD, ARG_PROXIMITY_WEIGHT, ARG_SEED,
    ARG_USER_ID, CliError, DEFAULT_DATABASE, ENV_RECOMMEND_USER_ID, fs, load_prepared, write_json,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Recommend places for a user from their bookmarks and \
                 interactions. Users without any activity receive a random \
                 sample. Out-of-range options fall back to defaults and are \
                 reported as warnings in the JSON output.",
    about = "Recommend places for a user"
)]
#[ortho_config(prefix = "BENA")]
pub(crate) struct RecommendArgs {
    /// Identifier of the user to recommend for.
    #[arg(value_name = "user-id")]
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    /// Path to the SQLite snapshot database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Strategy: content_based, near_bookmarks, hybrid or random.
    #[arg(long = ARG_METHOD, value_name = "name")]
    #[serde(default)]
    pub(crate) method: Option<String>,
    /// Number of recommendations (1 to 10).
    #[arg(long = ARG_LENGTH, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) length: Option<i64>,
    /// Seed for the random strategy.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Weight of the content score in hybrid ranking.
    #[arg(long = ARG_CONTENT_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) content_weight: Option<f64>,
    /// Weight of the proximity score in hybrid ranking.
    #[arg(long = ARG_PROXIMITY_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) proximity_weight: Option<f64>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    /// Path to the snapshot database.
    pub(crate) database: Utf8PathBuf,
    /// Engine call to make.
    pub(crate) request: RecommendationRequest,
    /// Engine tuning.
    pub(crate) engine: EngineConfig,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        fs::require_existing(&self.database, ARG_DATABASE)
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let user_id = args.user_id.ok_or(CliError::MissingArgument {
            field: ARG_USER_ID,
            env: ENV_RECOMMEND_USER_ID,
        })?;
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));

        let defaults = HybridWeights::default();
        let engine = EngineConfig {
            hybrid_weights: HybridWeights {
                content: args.content_weight.unwrap_or(defaults.content),
                proximity: args.proximity_weight.unwrap_or(defaults.proximity),
            },
            ..EngineConfig::default()
        };

        let mut request = RecommendationRequest::new(user_id);
        request.method = args.method;
        request.length = args.length;
        request.seed = args.seed;

        Ok(Self {
            database,
            request,
            engine,
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let recommendation = execute_recommend(&config)?;
    write_json(writer, &recommendation)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn execute_recommend(config: &RecommendConfig) -> Result<Recommendation, CliError> {
    let engine = RecommendationEngine::new(config.engine.clone())?;
    let prepared = load_prepared(&config.database, &engine)?;
    Ok(engine.recommend(&prepared, &config.request))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
