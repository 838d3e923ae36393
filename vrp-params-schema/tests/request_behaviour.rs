//! Behavioural tests for the VRP request schema using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use vrp_params_core::ValidationErrors;
use vrp_params_schema::validate_request;

#[derive(Debug, Default)]
struct RequestWorld {
    request: RefCell<Value>,
    outcome: RefCell<Option<Result<Value, ValidationErrors>>>,
}

impl RequestWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<Value, ValidationErrors> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_errors(&self) -> ValidationErrors {
        self.expect_outcome()
            .expect_err("expected validation to fail")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_canonical(&self) -> Value {
        self.expect_outcome().expect("expected validation to succeed")
    }
}

#[fixture]
fn world() -> RequestWorld {
    RequestWorld::default()
}

fn with_vehicles(vehicles: Value) -> Value {
    json!({ "vrp": { "vehicles": vehicles } })
}

fn with_service(service: Value) -> Value {
    json!({ "vrp": { "vehicles": [{ "id": "v1" }], "services": [service] } })
}

#[given("a request whose second vehicle has no id")]
fn given_vehicle_without_id(world: &RequestWorld) {
    world.request.replace(with_vehicles(json!([
        { "id": "v1" },
        { "cost_fixed": 10 },
    ])));
}

#[given("a request with an empty sequence time window")]
fn given_empty_window(world: &RequestWorld) {
    world.request.replace(with_vehicles(json!([
        { "id": "v1", "sequence_timewindows": [{}] },
    ])));
}

#[given("a request with a time window on day {day}")]
fn given_window_on_day(world: &RequestWorld, day: i64) {
    world.request.replace(with_vehicles(json!([
        { "id": "v1", "sequence_timewindows": [{ "day_index": day }] },
    ])));
}

#[given("a request whose resolution sets initial_time_out and minimum_duration")]
fn given_conflicting_resolution(world: &RequestWorld) {
    world.request.replace(json!({
        "vrp": {
            "vehicles": [{ "id": "v1" }],
            "configuration": {
                "resolution": { "initial_time_out": 10, "minimum_duration": 20 }
            }
        }
    }));
}

#[given("a request with no vehicles")]
fn given_no_vehicles(world: &RequestWorld) {
    world.request.replace(json!({ "vrp": { "name": "empty" } }));
}

#[given("a request whose service asks for {raw} visits")]
#[expect(
    clippy::expect_used,
    reason = "feature files hold JSON literals for the visit count"
)]
fn given_visits(world: &RequestWorld, raw: String) {
    let visits: Value = serde_json::from_str(raw.trim()).expect("visit count is JSON");
    world
        .request
        .replace(with_service(json!({ "id": "s1", "visits_number": visits })));
}

#[given("a request whose service lasts {clock}")]
fn given_duration(world: &RequestWorld, clock: String) {
    world.request.replace(with_service(json!({
        "id": "s1",
        "activity": { "point_id": "p1", "duration": clock.trim_matches('"') },
    })));
}

#[when("the request is validated")]
fn when_validated(world: &RequestWorld) {
    let outcome = validate_request(&world.request.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("{count} errors are reported")]
fn then_error_count(world: &RequestWorld, count: usize) {
    assert_eq!(world.expect_errors().len(), count);
}

#[then("an error of kind {kind:word} is reported at {path}")]
fn then_error_at(world: &RequestWorld, kind: String, path: String) {
    let errors = world.expect_errors();
    assert!(
        errors
            .at(path.trim())
            .any(|error| error.kind.as_str() == kind),
        "no {kind} error at {path} in {errors}"
    );
}

#[then("the service is visited {count} times")]
fn then_visits(world: &RequestWorld, count: i64) {
    let canonical = world.expect_canonical();
    let visits = canonical
        .pointer("/vrp/services/0/visits_number")
        .and_then(Value::as_i64);
    assert_eq!(visits, Some(count));
}

#[then("the service activity lasts {seconds} seconds")]
fn then_duration(world: &RequestWorld, seconds: i64) {
    let canonical = world.expect_canonical();
    let duration = canonical
        .pointer("/vrp/services/0/activity/duration")
        .and_then(Value::as_i64);
    assert_eq!(duration, Some(seconds));
}

#[scenario(path = "tests/features/request_schema.feature", index = 0)]
fn vehicle_without_id(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 1)]
fn window_without_bounds(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 2)]
fn window_on_missing_day(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 3)]
fn conflicting_resolution(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 4)]
fn missing_vehicles(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 5)]
fn numeric_visits(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 6)]
fn unreadable_visits(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 7)]
fn zero_visits(world: RequestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_schema.feature", index = 8)]
fn clock_durations(world: RequestWorld) {
    let _ = world;
}
