//! Behaviour-driven step definitions driving the check CLI scenarios.

use super::helpers::{INVALID_REQUEST, VALID_REQUEST, scratch_request, write_utf8};
use super::*;
use crate::check::run_check_with;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct CheckWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CheckWorld {
    fn new() -> Self {
        let (tmp, request_path) = scratch_request();
        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["vrp-params".to_owned(), "check".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv
    }

    fn stdout_text(&self) -> String {
        String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8")
    }
}

#[fixture]
fn world() -> CheckWorld {
    CheckWorld::new()
}

fn recorded_error<'a>(result: &'a Option<Result<(), CliError>>) -> &'a CliError {
    result
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error")
}

#[given("a conforming request exists on disk")]
fn conforming_request_exists(#[from(world)] world: &CheckWorld) {
    write_utf8(&world.request_path, VALID_REQUEST);
}

#[given("a non-conforming request exists on disk")]
fn non_conforming_request_exists(#[from(world)] world: &CheckWorld) {
    write_utf8(&world.request_path, INVALID_REQUEST);
}

#[given("the request file contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &CheckWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the request path")]
fn omit_request_path(#[from(world)] world: &CheckWorld) {
    *world.include_request.borrow_mut() = false;
}

#[when("I run the check command")]
fn run_check_command(#[from(world)] world: &CheckWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Check(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_check_with(args, &mut *buffer)
        }
        Command::Describe(_) => panic!("expected check command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints the normalized request")]
fn command_succeeds(#[from(world)] world: &CheckWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let printed: Value =
        serde_json::from_str(&world.stdout_text()).expect("output should be JSON");
    assert_eq!(
        printed.pointer("/vrp/services/0/activity/duration"),
        Some(&Value::from(600))
    );
    assert_eq!(
        printed.pointer("/vrp/vehicles/0/cost_fixed"),
        Some(&Value::from(10.0))
    );
}

#[then("the command fails because the request is invalid")]
fn command_fails_invalid_request(#[from(world)] world: &CheckWorld) {
    let borrowed = world.result.borrow();
    match recorded_error(&borrowed) {
        CliError::InvalidRequest { errors, .. } => assert_eq!(errors.len(), 2),
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[then("each violation is printed on its own line")]
fn violations_are_printed(#[from(world)] world: &CheckWorld) {
    let text = world.stdout_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "vrp.vehicles[1].id: is missing [missing_required]",
            "vrp.vehicles[1].sequence_timewindows[0].day_index: must be between 0 and 6, found 9 [value_out_of_range]",
        ]
    );
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &CheckWorld) {
    let borrowed = world.result.borrow();
    match recorded_error(&borrowed) {
        CliError::ParseRequest { .. } => {}
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &CheckWorld) {
    let borrowed = world.result.borrow();
    match recorded_error(&borrowed) {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_CHECK_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_check_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/check_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CheckWorld) {
            let _ = world;
        }
    };
}

register_check_scenario!(check_happy_path, "checking a conforming request");
register_check_scenario!(check_invalid_request, "rejecting a non-conforming request");
register_check_scenario!(check_invalid_json, "rejecting invalid JSON input");
register_check_scenario!(check_missing_request, "rejecting missing request paths");
