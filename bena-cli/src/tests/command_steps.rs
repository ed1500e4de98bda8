//! Behaviour-driven step definitions driving the query command scenarios.

use super::helpers::SnapshotDir;
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct CommandWorld {
    snapshot: SnapshotDir,
    with_database: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            snapshot: SnapshotDir::new(),
            with_database: RefCell::new(false),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, line: &str) -> Vec<String> {
        let mut argv = vec!["bena".to_owned()];
        argv.extend(line.split_whitespace().map(str::to_owned));
        let database = if *self.with_database.borrow() {
            self.snapshot.database()
        } else {
            self.snapshot.root().join("missing.db")
        };
        argv.extend([format!("--{ARG_DATABASE}"), database.into_string()]);
        argv
    }

    fn output(&self) -> serde_json::Value {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be JSON")
    }

    fn expect_error(&self, check: impl FnOnce(&CliError)) {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        check(error);
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a snapshot database exists on disk")]
fn snapshot_database_exists(#[from(world)] world: &CommandWorld) {
    world.with_database.replace(true);
}

#[when("I run bena with {line}")]
fn run_bena(#[from(world)] world: &CommandWorld, line: String) {
    let invocation = world.build_command_line(line.trim_matches('"'));
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| {
        let mut buffer = world.stdout.borrow_mut();
        run_command(cli.command, &mut *buffer)
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the JSON field {field} lists {first} then {second}")]
fn json_field_lists(
    #[from(world)] world: &CommandWorld,
    field: String,
    first: String,
    second: String,
) {
    let output = world.output();
    let places = output[field.trim_matches('"')]["places"]
        .as_array()
        .expect("places array")
        .iter()
        .map(|place| place["id"].as_str().expect("place id").to_owned())
        .collect::<Vec<_>>();
    assert_eq!(places, [first, second]);
}

#[then("the output carries {count} warning")]
fn output_carries_warnings(#[from(world)] world: &CommandWorld, count: usize) {
    let output = world.output();
    let warnings = output["warnings"].as_array().expect("warnings array");
    assert_eq!(warnings.len(), count);
}

#[then("the command fails because the database is missing")]
fn command_fails_missing_database(#[from(world)] world: &CommandWorld) {
    world.expect_error(|error| match error {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_DATABASE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    });
}

#[then("the command fails because the user id is missing")]
fn command_fails_missing_user(#[from(world)] world: &CommandWorld) {
    world.expect_error(|error| match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_USER_ID),
        other => panic!("expected MissingArgument, found {other:?}"),
    });
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/query_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(recommend_near_bookmarks, "recommending places near bookmarks");
register_command_scenario!(search_out_of_range_length, "searching with an out-of-range length");
register_command_scenario!(near_missing_database, "rejecting a missing database");
register_command_scenario!(recommend_missing_user, "rejecting a missing user id");
