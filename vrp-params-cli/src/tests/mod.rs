//! Shared test harness modules for the CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod check_steps;
mod describe_unit;
mod helpers;
