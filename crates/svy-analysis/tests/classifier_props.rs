//! Property tests for multiple-choice detection.

use proptest::prelude::*;
use svy_analysis::{ClassifierConfig, DatasetProfile, classify};
use svy_model::{Column, Dataset};

/// A text column of `rows` cells where the first `filled` hold one of
/// `distinct` labels.
fn option_column(rows: usize, filled: usize, distinct: usize) -> Dataset {
    let values = (0..rows)
        .map(|row| (row < filled).then(|| format!("opt{}", row % distinct.max(1))))
        .collect();
    Dataset::new(vec![Column::text("Q", values)]).unwrap()
}

fn detected(dataset: &Dataset, config: &ClassifierConfig) -> bool {
    classify(&DatasetProfile::build(dataset), config).contains("Q")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fully_filled_columns_are_never_flagged(
        rows in 1_usize..200,
        distinct in 1_usize..10,
        threshold in 0.01_f64..0.99,
    ) {
        let config = ClassifierConfig::new(threshold).unwrap();
        prop_assert!(!detected(&option_column(rows, rows, distinct), &config));
    }

    #[test]
    fn empty_columns_are_never_flagged(
        rows in 0_usize..200,
        threshold in 0.01_f64..0.99,
    ) {
        let config = ClassifierConfig::new(threshold).unwrap();
        prop_assert!(!detected(&option_column(rows, 0, 1), &config));
    }

    #[test]
    fn flagged_iff_partially_filled_and_low_cardinality(
        rows in 1_usize..200,
        fill in 0.0_f64..=1.0,
        distinct in 1_usize..15,
        threshold in 0.01_f64..0.99,
    ) {
        let filled = ((rows as f64) * fill).round() as usize;
        let dataset = option_column(rows, filled, distinct);
        let ratio = filled as f64 / rows as f64;
        let actual_distinct = distinct.min(filled);
        let expected = ratio > 0.0 && ratio < threshold && actual_distinct < 10;

        let config = ClassifierConfig::new(threshold).unwrap();
        prop_assert_eq!(detected(&dataset, &config), expected);
    }

    #[test]
    fn thresholds_outside_unit_interval_are_rejected(threshold in 1.0_f64..10.0) {
        prop_assert!(ClassifierConfig::new(threshold).is_err());
        prop_assert!(ClassifierConfig::new(-threshold + 1.0).is_err());
    }
}

#[test]
fn categorical_only_skips_numeric_options() {
    let dataset = Dataset::new(vec![
        Column::numeric("Q_num", vec![Some(1.0), None, None]),
        Column::text("Q_text", vec![Some("Yes".to_string()), None, None]),
    ])
    .unwrap();
    let profile = DatasetProfile::build(&dataset);

    let permissive = classify(&profile, &ClassifierConfig::default());
    assert_eq!(permissive.columns(), ["Q_num", "Q_text"]);

    let strict = classify(
        &profile,
        &ClassifierConfig::default().with_categorical_only(true),
    );
    assert_eq!(strict.columns(), ["Q_text"]);
}

#[test]
fn ratio_equal_to_threshold_is_excluded() {
    // 4 of 5 rows filled: ratio 0.8 is not below the default threshold
    let dataset = option_column(5, 4, 1);
    assert!(!detected(&dataset, &ClassifierConfig::default()));
}
