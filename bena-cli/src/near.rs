//! Near command implementation for the Bena CLI.

use std::io::Write;

use bena_core::PlaceId;
use bena_ranker::{NearbyPlaces, RecommendationEngine};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_LENGTH, ARG_PLACE_ID, ARG_RADIUS, CliError, DEFAULT_DATABASE,
    ENV_NEAR_PLACE_ID, fs, load_prepared, write_json,
};

/// CLI arguments for the `near` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "near",
    long_about = "List the places within a radius of another place, nearest \
                 first. The anchor place itself is never listed.",
    about = "List places near a place"
)]
#[ortho_config(prefix = "BENA")]
pub(crate) struct NearArgs {
    /// Identifier of the anchor place.
    #[arg(value_name = "place-id")]
    #[serde(default)]
    pub(crate) place_id: Option<String>,
    /// Path to the SQLite snapshot database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Number of places (1 to 5).
    #[arg(long = ARG_LENGTH, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) length: Option<i64>,
    /// Search radius in kilometres (0 to 5).
    #[arg(long = ARG_RADIUS, value_name = "km", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
}

impl NearArgs {
    pub(crate) fn into_config(self) -> Result<NearConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearConfig::try_from(merged)
    }
}

/// Resolved `near` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearConfig {
    /// Path to the snapshot database.
    pub(crate) database: Utf8PathBuf,
    /// Anchor place.
    pub(crate) place_id: PlaceId,
    /// Requested number of places.
    pub(crate) length: Option<i64>,
    /// Requested radius in kilometres.
    pub(crate) radius_km: Option<f64>,
}

impl NearConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        fs::require_existing(&self.database, ARG_DATABASE)
    }
}

impl TryFrom<NearArgs> for NearConfig {
    type Error = CliError;

    fn try_from(args: NearArgs) -> Result<Self, Self::Error> {
        let place_id = args.place_id.ok_or(CliError::MissingArgument {
            field: ARG_PLACE_ID,
            env: ENV_NEAR_PLACE_ID,
        })?;
        Ok(Self {
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            place_id: PlaceId::from(place_id),
            length: args.length,
            radius_km: args.radius,
        })
    }
}

pub(crate) fn run_near_with(args: NearArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let nearby = execute_near(&config)?;
    write_json(writer, &nearby)
}

pub(crate) fn execute_near(config: &NearConfig) -> Result<NearbyPlaces, CliError> {
    let engine = RecommendationEngine::default();
    let prepared = load_prepared(&config.database, &engine)?;
    Ok(engine.find_near(&prepared, &config.place_id, config.length, config.radius_km))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearConfig, CliError> {
    let merged = NearArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearConfig::try_from(merged)
}
