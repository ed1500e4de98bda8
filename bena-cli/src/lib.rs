//! Command-line interface for querying Bena place snapshots.
//!
//! Every subcommand reads a SQLite snapshot, prepares it once, runs a single
//! engine call and prints the outcome as pretty JSON, warnings included.
#![forbid(unsafe_code)]

use std::io::Write;

use bena_core::SqliteSnapshotProvider;
use bena_ranker::{PreparedSnapshot, RecommendationEngine};
use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod fs;
mod near;
mod recommend;
mod search;

pub use error::CliError;
use near::NearArgs;
use recommend::RecommendArgs;
use search::SearchArgs;

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const DEFAULT_DATABASE: &str = "bena.db";
pub(crate) const ARG_LENGTH: &str = "length";
pub(crate) const ARG_USER_ID: &str = "user-id";
pub(crate) const ARG_METHOD: &str = "method";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_CONTENT_WEIGHT: &str = "content-weight";
pub(crate) const ARG_PROXIMITY_WEIGHT: &str = "proximity-weight";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_MIN_SCORE: &str = "min-score";
pub(crate) const ARG_PLACE_ID: &str = "place-id";
pub(crate) const ARG_RADIUS: &str = "radius";
pub(crate) const ENV_RECOMMEND_USER_ID: &str = "BENA_CMDS_RECOMMEND_USER_ID";
pub(crate) const ENV_SEARCH_QUERY: &str = "BENA_CMDS_SEARCH_QUERY";
pub(crate) const ENV_NEAR_PLACE_ID: &str = "BENA_CMDS_NEAR_PLACE_ID";

/// Run the Bena CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or the snapshot are
/// unusable, or when the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Recommend(args) => recommend::run_recommend_with(args, writer),
        Command::Search(args) => search::run_search_with(args, writer),
        Command::Near(args) => near::run_near_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bena",
    about = "Recommend, search and locate places from a Bena snapshot",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend places for a user.
    Recommend(RecommendArgs),
    /// Fuzzy-search places by free text.
    Search(SearchArgs),
    /// List places near another place.
    Near(NearArgs),
}

/// Open the snapshot database and build its similarity matrix.
pub(crate) fn load_prepared(
    database: &Utf8Path,
    engine: &RecommendationEngine,
) -> Result<PreparedSnapshot, CliError> {
    let provider = SqliteSnapshotProvider::open(database.as_std_path()).map_err(|source| {
        CliError::OpenSnapshot {
            path: database.to_path_buf(),
            source,
        }
    })?;
    PreparedSnapshot::load(&provider, engine.index()).map_err(|source| CliError::PrepareSnapshot {
        path: database.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
