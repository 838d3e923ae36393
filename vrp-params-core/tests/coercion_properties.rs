//! Property-based tests for the scalar coercers.
//!
//! # Invariants tested
//!
//! - **Clock arithmetic:** `H:MM:SS` and `H:MM` resolve to `3600H + 60M (+ S)`.
//! - **Truncation:** decimal strings and floats resolve to their integer part.
//! - **Stability:** coercing an already-coerced duration returns it unchanged.
//! - **Counts:** positive counts survive, everything else defers to a default.

use proptest::prelude::*;
use serde_json::json;
use vrp_params_core::coerce::{parse_duration, parse_positive_count};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn clock_with_seconds(hours in 0_i64..500, minutes in 0_i64..60, seconds in 0_i64..60) {
        let raw = json!(format!("{hours:02}:{minutes:02}:{seconds:02}"));
        let expected = 3600 * hours + 60 * minutes + seconds;
        prop_assert_eq!(parse_duration(Some(&raw), true, true), Ok(Some(expected)));
    }

    #[test]
    fn clock_without_seconds(hours in 0_i64..500, minutes in 0_i64..60) {
        let raw = json!(format!("{hours}:{minutes:02}"));
        prop_assert_eq!(parse_duration(Some(&raw), false, true), Ok(Some(3600 * hours + 60 * minutes)));
    }

    #[test]
    fn decimal_strings_truncate(whole in 0_u32..1_000_000, fraction in 0_u32..1000) {
        let raw = json!(format!("{whole}.{fraction}"));
        prop_assert_eq!(parse_duration(Some(&raw), true, true), Ok(Some(i64::from(whole))));
    }

    #[test]
    fn floats_truncate(seconds in 0.0_f64..1.0e9) {
        let raw = json!(seconds);
        #[expect(clippy::cast_possible_truncation, reason = "mirrors the coercer's truncation")]
        let expected = seconds.trunc() as i64;
        prop_assert_eq!(parse_duration(Some(&raw), true, true), Ok(Some(expected)));
    }

    #[test]
    fn coerced_durations_are_stable(seconds in 1_i64..10_000_000) {
        let once = parse_duration(Some(&json!(seconds)), true, false);
        prop_assert_eq!(once, Ok(Some(seconds)));
    }

    #[test]
    fn negative_numbers_never_coerce(seconds in i64::MIN..0) {
        prop_assert!(parse_duration(Some(&json!(seconds)), true, true).is_err());
    }

    #[test]
    fn counts_keep_positive_values(count in 1_i64..i64::MAX) {
        prop_assert_eq!(parse_positive_count(&json!(count)), Some(count));
    }

    #[test]
    fn counts_drop_non_positive_values(count in i64::MIN..=0) {
        prop_assert_eq!(parse_positive_count(&json!(count)), None);
    }
}
