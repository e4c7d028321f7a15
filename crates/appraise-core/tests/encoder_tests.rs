//! Feature encoder integration tests
//!
//! One-hot invariants, schema alignment, and input bounds over the house
//! features form.

use appraise_core::{
    AppraiseError, FeatureEncoder, FeatureSchema, FormSchema, RawInput,
};
use proptest::prelude::*;
use rstest::rstest;

fn scenario_input(form: &FormSchema) -> RawInput {
    let mut input = form.default_input();
    for (name, value) in [
        ("MSSubClass", 60),
        ("LotArea", 5000),
        ("OverallCond", 9),
        ("YearBuilt", 2010),
        ("YearRemodAdd", 2005),
        ("BsmtFinSF2", 0),
        ("TotalBsmtSF", 1000),
    ] {
        input.set_numeric(form, name, value).unwrap();
    }
    input.select(form, "MSZoning", "RL").unwrap();
    input.select(form, "LotConfig", "Inside").unwrap();
    input.select(form, "BldgType", "1Fam").unwrap();
    input.select(form, "Exterior", "VinylSd").unwrap();
    input
}

// === Scenario ===

#[test]
fn test_scenario_indicators() {
    let form = FormSchema::housing();
    let schema = form.feature_schema().unwrap();
    let encoding = FeatureEncoder::new(&form)
        .encode(&scenario_input(&form), &schema)
        .unwrap();
    let row = &encoding.row;

    let hot = [
        "MSZoning_RL",
        "LotConfig_Inside",
        "BldgType_1Fam",
        "Exterior1st_VinylSd",
    ];
    for field in &form.categorical {
        for column in field.indicator_columns() {
            let expected = if hot.contains(&column.as_str()) { 1.0 } else { 0.0 };
            assert_eq!(row.get(&column), Some(expected), "{column}");
        }
    }

    assert_eq!(row.get("MSSubClass"), Some(60.0));
    assert_eq!(row.get("LotArea"), Some(5000.0));
    assert_eq!(row.get("OverallCond"), Some(9.0));
    assert_eq!(row.get("YearBuilt"), Some(2010.0));
    assert_eq!(row.get("YearRemodAdd"), Some(2005.0));
    assert_eq!(row.get("BsmtFinSF2"), Some(0.0));
    assert_eq!(row.get("TotalBsmtSF"), Some(1000.0));

    assert!(encoding.zero_filled.is_empty());
    assert!(encoding.dropped.is_empty());
}

// === Schema alignment ===

#[test]
fn test_model_schema_order_is_followed() {
    let form = FormSchema::housing();
    let mut columns = form.feature_schema().unwrap().columns().to_vec();
    columns.reverse();
    let schema = FeatureSchema::new(columns.clone()).unwrap();

    let encoding = FeatureEncoder::new(&form)
        .encode(&scenario_input(&form), &schema)
        .unwrap();
    assert_eq!(encoding.row.columns(), columns.as_slice());
    assert_eq!(encoding.row.get("LotArea"), Some(5000.0));
}

#[test]
fn test_unknown_expected_columns_are_zero() {
    let form = FormSchema::housing();
    let mut columns = form.feature_schema().unwrap().columns().to_vec();
    // Categories the model saw at training time but the form never offers
    columns.insert(12, "MSZoning_A (agr)".to_string());
    columns.push("Exterior1st_Other".to_string());
    let schema = FeatureSchema::new(columns.clone()).unwrap();

    let encoding = FeatureEncoder::new(&form)
        .encode(&scenario_input(&form), &schema)
        .unwrap();
    assert_eq!(encoding.row.columns(), columns.as_slice());
    assert_eq!(encoding.row.get("MSZoning_A (agr)"), Some(0.0));
    assert_eq!(encoding.row.get("Exterior1st_Other"), Some(0.0));
    assert_eq!(
        encoding.zero_filled,
        vec!["MSZoning_A (agr)".to_string(), "Exterior1st_Other".to_string()]
    );
}

#[test]
fn test_columns_outside_schema_are_dropped() {
    let form = FormSchema::housing();
    let schema = FeatureSchema::new(vec![
        "LotArea".to_string(),
        "YearBuilt".to_string(),
        "MSZoning_RL".to_string(),
    ])
    .unwrap();

    let encoding = FeatureEncoder::new(&form)
        .encode(&scenario_input(&form), &schema)
        .unwrap();
    assert_eq!(encoding.row.values(), &[5000.0, 2010.0, 1.0]);
    assert_eq!(encoding.dropped.len(), 37 - 3);
    assert!(encoding.dropped.contains(&"Exterior1st_VinylSd".to_string()));
}

#[test]
fn test_duplicate_expected_column_rejected() {
    let err = FeatureSchema::new(vec!["LotArea".to_string(), "LotArea".to_string()]).unwrap_err();
    assert!(matches!(err, AppraiseError::DuplicateColumn(_)));
}

// === Bounds ===

#[rstest]
#[case("MSSubClass")]
#[case("LotArea")]
#[case("OverallCond")]
#[case("YearBuilt")]
#[case("YearRemodAdd")]
#[case("BsmtFinSF2")]
#[case("TotalBsmtSF")]
fn test_bounds_are_accepted(#[case] name: &str) {
    let form = FormSchema::housing();
    let field = form.numeric_field(name).unwrap().clone();
    let schema = form.feature_schema().unwrap();

    for bound in [field.min, field.max] {
        let mut input = form.default_input();
        assert_eq!(input.set_numeric(&form, name, bound).unwrap(), bound);
        let encoding = FeatureEncoder::new(&form).encode(&input, &schema).unwrap();
        assert_eq!(encoding.row.get(name), Some(bound as f64));
    }
}

// === Property-based ===

fn selection_indices() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (0usize..5, 0usize..5, 0usize..5, 0usize..15)
}

proptest! {
    #[test]
    fn test_exactly_one_indicator_per_field(indices in selection_indices()) {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        let picks = [indices.0, indices.1, indices.2, indices.3];
        for (field, pick) in form.categorical.iter().zip(picks) {
            input.select(&form, &field.name, &field.options[pick].label).unwrap();
        }

        let row = FeatureEncoder::new(&form).construct(&input).unwrap();
        for (field, pick) in form.categorical.iter().zip(picks) {
            let values: Vec<f64> = field
                .indicator_columns()
                .map(|c| row.get(&c).unwrap())
                .collect();
            prop_assert_eq!(values.iter().filter(|v| **v == 1.0).count(), 1);
            prop_assert_eq!(values.iter().filter(|v| **v == 0.0).count(), values.len() - 1);
            prop_assert_eq!(values[pick], 1.0);
        }
    }

    #[test]
    fn test_row_matches_schema_for_any_selection(indices in selection_indices(), lot in -10_000i64..400_000) {
        let form = FormSchema::housing();
        let schema = form.feature_schema().unwrap();
        let mut input = form.default_input();
        input.set_numeric(&form, "LotArea", lot).unwrap();
        let picks = [indices.0, indices.1, indices.2, indices.3];
        for (field, pick) in form.categorical.iter().zip(picks) {
            input.select(&form, &field.name, &field.options[pick].label).unwrap();
        }

        let encoding = FeatureEncoder::new(&form).encode(&input, &schema).unwrap();
        prop_assert_eq!(encoding.row.columns(), schema.columns());
        let stored = encoding.row.get("LotArea").unwrap();
        prop_assert!((0.0..=215245.0).contains(&stored));
    }
}
