//! Property tests for field report lines.
//!
//! A field with some nulls reports its count and a one-decimal percentage;
//! a field whose every record is null reports the all-null marker instead.

use gdbaudit_core::audit::{FieldNullCount, render_field_line};
use proptest::prelude::*;

fn partial_counts() -> impl Strategy<Value = (u64, u64)> {
    (2u64..1_000_000).prop_flat_map(|total| (1..total, Just(total)))
}

/// Extracts the percentage text between `(` and `%)`.
fn percentage_text(line: &str) -> &str {
    let start = line.rfind('(').unwrap() + 1;
    let end = line.rfind("%)").unwrap();
    &line[start..end]
}

#[test]
fn exact_ties_round_half_to_even() {
    let cases = [(1, 16, "6.2"), (3, 16, "18.8"), (5, 16, "31.2"), (1, 8, "12.5")];

    for (nulls, total, expected) in cases {
        let line = render_field_line(&FieldNullCount::new("Owner", nulls, total));
        assert_eq!(percentage_text(&line), expected, "line was: {}", line);
    }
}

#[test]
fn one_of_three_is_thirty_three_point_three() {
    assert_eq!(
        render_field_line(&FieldNullCount::new("Owner", 1, 3)),
        "Owner: 1 null records of 3 (33.3%)"
    );
}

proptest! {
    #[test]
    fn partial_nulls_report_count_and_rounded_percentage((nulls, total) in partial_counts()) {
        let line = render_field_line(&FieldNullCount::new("Owner", nulls, total));
        let prefix = format!("Owner: {} null records of {} (", nulls, total);

        prop_assert!(line.starts_with(&prefix), "line was: {}", line);
        prop_assert!(line.ends_with("%)"));
        prop_assert!(!line.contains("ALL RECORDS ARE NULL"));

        let text = percentage_text(&line);
        let (whole, decimals) = text.split_once('.').unwrap();
        prop_assert!(!whole.is_empty());
        prop_assert_eq!(decimals.len(), 1);

        // Rounded to one decimal: within half a tenth of the exact share.
        let shown: f64 = text.parse().unwrap();
        #[allow(clippy::cast_precision_loss)]
        let exact = nulls as f64 * 100.0 / total as f64;
        prop_assert!((shown - exact).abs() <= 0.05 + 1e-9, "{} vs {}", shown, exact);
        prop_assert!((0.0..=100.0).contains(&shown));
    }

    #[test]
    fn all_null_fields_use_marker(total in 1u64..1_000_000) {
        let line = render_field_line(&FieldNullCount::new("Zoning", total, total));

        prop_assert_eq!(line.as_str(), "Zoning: ALL RECORDS ARE NULL");
        prop_assert!(!line.contains('%'));
    }

    #[test]
    fn field_name_leads_the_line(name in "[A-Za-z_][A-Za-z0-9_]{0,30}", nulls in 1u64..100) {
        let line = render_field_line(&FieldNullCount::new(name.clone(), nulls, 100));
        let prefix = format!("{}: ", name);

        prop_assert!(line.starts_with(&prefix));
    }
}
