//! Unit tests for the describe command output.

use super::*;
use crate::describe::{DescribeArgs, run_describe_with};
use rstest::rstest;
use serde_json::Value;

fn described(prefix: Option<&str>) -> Vec<Value> {
    let args = DescribeArgs {
        prefix: prefix.map(str::to_owned),
    };
    let mut buffer = Vec::new();
    run_describe_with(&args, &mut buffer).expect("describe succeeds");
    serde_json::from_slice(&buffer).expect("describe prints a JSON array")
}

fn paths(docs: &[Value]) -> Vec<&str> {
    docs.iter()
        .filter_map(|doc| doc.get("path").and_then(Value::as_str))
        .collect()
}

#[rstest]
fn lists_published_fields() {
    let docs = described(None);
    let paths = paths(&docs);
    assert!(paths.contains(&"vrp.vehicles[].id"));
    assert!(paths.contains(&"vrp.services[].activity.duration"));
    assert!(!paths.iter().any(|path| path.ends_with("initial_time_out")));
}

#[rstest]
fn prefix_narrows_the_listing() {
    let docs = described(Some("vrp.configuration.resolution"));
    assert!(!docs.is_empty());
    assert!(
        paths(&docs)
            .iter()
            .all(|path| path.starts_with("vrp.configuration.resolution"))
    );
}

#[rstest]
fn prefix_stops_at_segment_boundaries() {
    let docs = described(Some("vrp.service"));
    assert!(docs.is_empty());

    let docs = described(Some("vrp.services"));
    let paths = paths(&docs);
    assert!(paths.contains(&"vrp.services"));
    assert!(paths.contains(&"vrp.services[].id"));
    assert!(paths.iter().all(|path| !path.starts_with("vrp.vehicles")));
}

#[rstest]
fn arguments_parse() {
    let cli = Cli::try_parse_from(["vrp-params", "describe", "--prefix", "vrp.units"])
        .expect("describe arguments parse");
    match cli.command {
        Command::Describe(args) => assert_eq!(args.prefix.as_deref(), Some("vrp.units")),
        Command::Check(_) => panic!("expected describe command"),
    }
}
