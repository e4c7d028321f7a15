//! Feature encoding.
//!
//! Turns a [`RawInput`] into the single row a model expects:
//!
//! 1. numeric fields are copied verbatim
//! 2. each selector becomes one indicator column per option (one-hot)
//! 3. expected columns that step 1-2 did not produce are filled with 0
//! 4. the row is reordered to the expected column list; anything else is dropped

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppraiseError, Result};
use crate::form::FormSchema;
use crate::input::RawInput;
use crate::schema::FeatureSchema;

/// An ordered row of named numeric features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Build a row from (column, value) pairs, in order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.push(column, value);
        }
        row
    }

    /// Append a column. Writing an existing column overwrites its value in place.
    pub fn push(&mut self, column: impl Into<String>, value: f64) {
        let column = column.into();
        match self.columns.iter().position(|c| *c == column) {
            Some(i) => self.values[i] = value,
            None => {
                self.columns.push(column);
                self.values.push(value);
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Result of encoding one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    /// Row in expected-schema order
    pub row: FeatureRow,
    /// Expected columns the input could not supply (set to 0)
    pub zero_filled: Vec<String>,
    /// Constructed columns the expected schema does not name
    pub dropped: Vec<String>,
}

/// One-hot encoder over a form's fields.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder<'a> {
    form: &'a FormSchema,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(form: &'a FormSchema) -> Self {
        Self { form }
    }

    /// Encode `input` and align it with `schema`.
    pub fn encode(&self, input: &RawInput, schema: &FeatureSchema) -> Result<Encoding> {
        let constructed = self.construct(input)?;
        let encoding = align(&constructed, schema);

        if !encoding.zero_filled.is_empty() {
            tracing::debug!(columns = ?encoding.zero_filled, "Zero-filled expected columns");
        }
        if !encoding.dropped.is_empty() {
            tracing::debug!(columns = ?encoding.dropped, "Dropped columns absent from schema");
        }

        Ok(encoding)
    }

    /// Numeric values (clamped to their bounds) followed by every indicator
    /// column, in form order.
    pub fn construct(&self, input: &RawInput) -> Result<FeatureRow> {
        let width = self.form.numeric.len()
            + self
                .form
                .categorical
                .iter()
                .map(|f| f.options.len())
                .sum::<usize>();
        let mut row = FeatureRow::with_capacity(width);

        for field in &self.form.numeric {
            let value = input
                .numeric(&field.name)
                .ok_or_else(|| AppraiseError::MissingValue(field.name.clone()))?;
            row.push(field.name.clone(), field.clamp(value) as f64);
        }

        for field in &self.form.categorical {
            let selected = input
                .selection(&field.name)
                .ok_or_else(|| AppraiseError::MissingValue(field.name.clone()))?;
            if field.position(selected).is_none() {
                return Err(AppraiseError::UnknownOption {
                    field: field.name.clone(),
                    value: selected.to_string(),
                });
            }
            for option in &field.options {
                let hot = if option.label == selected { 1.0 } else { 0.0 };
                row.push(field.indicator_column(&option.label), hot);
            }
        }

        Ok(row)
    }
}

/// Reconcile a constructed row with the expected schema.
pub fn align(constructed: &FeatureRow, schema: &FeatureSchema) -> Encoding {
    let values: HashMap<&str, f64> = constructed.iter().collect();

    let mut row = FeatureRow::with_capacity(schema.len());
    let mut zero_filled = Vec::new();
    for column in schema.columns() {
        let value = match values.get(column.as_str()) {
            Some(&value) => value,
            None => {
                zero_filled.push(column.clone());
                0.0
            }
        };
        row.push(column.clone(), value);
    }

    let dropped = constructed
        .columns()
        .iter()
        .filter(|c| !schema.contains(c))
        .cloned()
        .collect();

    Encoding {
        row,
        zero_filled,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(columns: &[&str]) -> FeatureSchema {
        FeatureSchema::new(columns.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn construct_width_and_order() {
        let form = FormSchema::housing();
        let row = FeatureEncoder::new(&form)
            .construct(&form.default_input())
            .unwrap();
        assert_eq!(row.len(), 37);
        assert_eq!(row.columns(), form.feature_schema().unwrap().columns());
    }

    #[test]
    fn default_selection_is_hot() {
        let form = FormSchema::housing();
        let row = FeatureEncoder::new(&form)
            .construct(&form.default_input())
            .unwrap();
        assert_eq!(row.get("MSZoning_C (all)"), Some(1.0));
        assert_eq!(row.get("MSZoning_RL"), Some(0.0));
        assert_eq!(row.get("Exterior1st_AsbShng"), Some(1.0));
    }

    #[test]
    fn align_zero_fills_and_drops() {
        let constructed = FeatureRow::from_pairs([("LotArea", 5000.0), ("MSZoning_RL", 1.0)]);
        let encoding = align(&constructed, &schema(&["MSZoning_RL", "GarageArea"]));

        assert_eq!(encoding.row.columns(), &["MSZoning_RL", "GarageArea"]);
        assert_eq!(encoding.row.values(), &[1.0, 0.0]);
        assert_eq!(encoding.zero_filled, vec!["GarageArea".to_string()]);
        assert_eq!(encoding.dropped, vec!["LotArea".to_string()]);
    }

    #[test]
    fn missing_selection() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        input.selections.remove("LotConfig");
        let err = FeatureEncoder::new(&form).construct(&input).unwrap_err();
        assert!(matches!(err, AppraiseError::MissingValue(f) if f == "LotConfig"));
    }

    #[test]
    fn hand_built_selection_outside_options() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        input
            .selections
            .insert("MSZoning".to_string(), "A (agr)".to_string());
        let err = FeatureEncoder::new(&form).construct(&input).unwrap_err();
        assert!(matches!(err, AppraiseError::UnknownOption { .. }));
    }

    #[test]
    fn deserialized_input_is_clamped() {
        let form = FormSchema::housing();
        let mut json = serde_json::to_value(form.default_input()).unwrap();
        json["numeric"]["LotArea"] = serde_json::json!(10_000_000);
        json["numeric"]["YearBuilt"] = serde_json::json!(-3);
        let input: RawInput = serde_json::from_value(json).unwrap();

        let row = FeatureEncoder::new(&form).construct(&input).unwrap();
        assert_eq!(row.get("LotArea"), Some(215245.0));
        assert_eq!(row.get("YearBuilt"), Some(1872.0));
    }

    #[test]
    fn row_push_overwrites() {
        let mut row = FeatureRow::new();
        row.push("a", 1.0);
        row.push("a", 2.0);
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a"), Some(2.0));
    }
}
