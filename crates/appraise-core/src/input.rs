//! Raw form input for one submission.

use std::collections::HashMap;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::error::{AppraiseError, Result};
use crate::form::FormSchema;

/// Values entered for one submission.
///
/// Numbers are kept within their field bounds by the setters; selections are
/// always one of the field's option labels. A deserialized input skips the
/// setters, so the encoder clamps and checks again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawInput {
    /// Numeric field name -> value
    pub(crate) numeric: HashMap<String, i64>,
    /// Categorical field name -> selected option label
    pub(crate) selections: HashMap<String, String>,
}

impl RawInput {
    /// Every field at its default: numeric defaults and first options.
    pub fn defaults(form: &FormSchema) -> Self {
        let numeric = form
            .numeric
            .iter()
            .map(|f| (f.name.clone(), f.default))
            .collect();
        let selections = form
            .categorical
            .iter()
            .map(|f| (f.name.clone(), f.default_option().to_string()))
            .collect();
        Self {
            numeric,
            selections,
        }
    }

    pub fn numeric(&self, name: &str) -> Option<i64> {
        self.numeric.get(name).copied()
    }

    pub fn selection(&self, name: &str) -> Option<&str> {
        self.selections.get(name).map(String::as_str)
    }

    /// Set a numeric field, clamping to its bounds. Returns the stored value.
    pub fn set_numeric(&mut self, form: &FormSchema, name: &str, value: i64) -> Result<i64> {
        let field = form.numeric_field(name)?;
        let stored = field.clamp(value);
        if stored != value {
            tracing::warn!(
                field = name,
                value,
                stored,
                "Value outside [{}, {}], clamped",
                field.min,
                field.max
            );
        }
        self.numeric.insert(field.name.clone(), stored);
        Ok(stored)
    }

    /// Parse and set a numeric field from text. Integers too large for
    /// `i64` clamp like any other out-of-range value.
    pub fn set_numeric_text(&mut self, form: &FormSchema, name: &str, text: &str) -> Result<i64> {
        let field = form.numeric_field(name)?;
        let value = match text.trim().parse::<i64>() {
            Ok(value) => value,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => field.max.saturating_add(1),
                IntErrorKind::NegOverflow => field.min.saturating_sub(1),
                _ => {
                    return Err(AppraiseError::NotANumber {
                        field: name.to_string(),
                        text: text.to_string(),
                    })
                }
            },
        };
        self.set_numeric(form, name, value)
    }

    /// Move a numeric field by `delta`, staying within bounds.
    pub fn step_numeric(&mut self, form: &FormSchema, name: &str, delta: i64) -> Result<i64> {
        let field = form.numeric_field(name)?;
        let current = self.numeric(name).unwrap_or(field.default);
        self.set_numeric(form, name, current.saturating_add(delta))
    }

    /// Select an option of a categorical field.
    pub fn select(&mut self, form: &FormSchema, name: &str, label: &str) -> Result<()> {
        let field = form.categorical_field(name)?;
        if field.position(label).is_none() {
            return Err(AppraiseError::UnknownOption {
                field: name.to_string(),
                value: label.to_string(),
            });
        }
        self.selections.insert(field.name.clone(), label.to_string());
        Ok(())
    }

    /// Move the selection `step` options forward (negative: backward), wrapping.
    pub fn cycle_selection(&mut self, form: &FormSchema, name: &str, step: isize) -> Result<String> {
        let field = form.categorical_field(name)?;
        let count = field.options.len();
        if count == 0 {
            return Err(AppraiseError::UnknownOption {
                field: name.to_string(),
                value: String::new(),
            });
        }
        let current = self
            .selection(name)
            .and_then(|label| field.position(label))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(count as isize) as usize;
        let label = field.options[next].label.clone();
        self.selections.insert(field.name.clone(), label.clone());
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_cover_every_field() {
        let form = FormSchema::housing();
        let input = RawInput::defaults(&form);
        assert_eq!(input.numeric("MSSubClass"), Some(60));
        assert_eq!(input.numeric("TotalBsmtSF"), Some(1000));
        assert_eq!(input.selection("MSZoning"), Some("C (all)"));
        assert_eq!(input.selection("Exterior"), Some("AsbShng"));
        assert_eq!(input.numeric.len(), 7);
        assert_eq!(input.selections.len(), 4);
    }

    #[rstest]
    #[case("YearBuilt", 1872, 1872)]
    #[case("YearBuilt", 2023, 2023)]
    #[case("YearBuilt", 1700, 1872)]
    #[case("YearBuilt", 2100, 2023)]
    #[case("LotArea", 215245, 215245)]
    #[case("LotArea", -5, 0)]
    fn set_numeric_clamps(#[case] name: &str, #[case] value: i64, #[case] expected: i64) {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        assert_eq!(input.set_numeric(&form, name, value).unwrap(), expected);
        assert_eq!(input.numeric(name), Some(expected));
    }

    #[rstest]
    #[case("LotArea", "99999999999999999999", 215245)]
    #[case("LotArea", "-99999999999999999999", 0)]
    #[case("YearBuilt", "9223372036854775807", 2023)]
    #[case("YearBuilt", " 1999 ", 1999)]
    fn set_numeric_text_clamps(#[case] name: &str, #[case] text: &str, #[case] expected: i64) {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        assert_eq!(input.set_numeric_text(&form, name, text).unwrap(), expected);
        assert_eq!(input.numeric(name), Some(expected));
    }

    #[test]
    fn set_numeric_text_rejects_garbage() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        assert_eq!(input.set_numeric_text(&form, "LotArea", " 7200 ").unwrap(), 7200);
        assert!(matches!(
            input.set_numeric_text(&form, "LotArea", "big"),
            Err(AppraiseError::NotANumber { .. })
        ));
        assert_eq!(input.numeric("LotArea"), Some(7200));
    }

    #[test]
    fn step_numeric_saturates_at_bounds() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        assert_eq!(input.step_numeric(&form, "OverallCond", 1).unwrap(), 10);
        assert_eq!(input.step_numeric(&form, "OverallCond", 1).unwrap(), 10);
        assert_eq!(input.step_numeric(&form, "OverallCond", -100).unwrap(), 1);
    }

    #[test]
    fn select_validates_option() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        input.select(&form, "BldgType", "Duplex").unwrap();
        assert_eq!(input.selection("BldgType"), Some("Duplex"));

        let err = input.select(&form, "BldgType", "Castle").unwrap_err();
        assert!(matches!(err, AppraiseError::UnknownOption { .. }));
        assert_eq!(input.selection("BldgType"), Some("Duplex"));
    }

    #[test]
    fn cycle_selection_wraps() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        assert_eq!(input.cycle_selection(&form, "MSZoning", -1).unwrap(), "RM");
        assert_eq!(input.cycle_selection(&form, "MSZoning", 1).unwrap(), "C (all)");
        assert_eq!(input.cycle_selection(&form, "MSZoning", 3).unwrap(), "RL");
    }

    #[test]
    fn unknown_field() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        assert!(matches!(
            input.set_numeric(&form, "PoolArea", 1),
            Err(AppraiseError::UnknownField(_))
        ));
    }
}
