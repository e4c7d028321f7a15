//! Form field definitions.
//!
//! The house feature form has bounded integer inputs and single-choice
//! selectors over fixed option lists. [`FormSchema::housing`] is the form the
//! shipped price model was trained against.

use serde::{Deserialize, Serialize};

use crate::error::{AppraiseError, Result};
use crate::input::RawInput;
use crate::schema::FeatureSchema;

/// Separator between a categorical column prefix and the option label.
pub const INDICATOR_SEPARATOR: char = '_';

/// A bounded integer input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericField {
    /// Column name in the feature row
    pub name: String,
    /// Label shown next to the input control
    pub label: String,
    /// Smallest accepted value (inclusive)
    pub min: i64,
    /// Largest accepted value (inclusive)
    pub max: i64,
    /// Value shown before the user edits the field
    pub default: i64,
}

impl NumericField {
    pub fn new(name: &str, label: &str, min: i64, default: i64, max: i64) -> Self {
        debug_assert!(min <= default && default <= max, "default out of bounds");
        Self {
            name: name.to_string(),
            label: label.to_string(),
            min,
            max,
            default,
        }
    }

    /// Whether `value` lies within the bounds.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp `value` to the nearest bound.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// One choice of a categorical selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Label as it appears in the trained model's column names
    pub label: String,
    /// Human description for help text
    pub description: String,
}

/// A single-choice selector over a fixed list of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalField {
    /// Field name used for lookups and CLI arguments
    pub name: String,
    /// Prefix of the indicator column names
    pub column_prefix: String,
    /// Label shown next to the selector
    pub label: String,
    /// One-line explanation of what the field classifies
    pub summary: String,
    /// Options in display order; the first is the default selection
    pub options: Vec<CategoryOption>,
}

impl CategoricalField {
    pub fn new(
        name: &str,
        column_prefix: &str,
        label: &str,
        summary: &str,
        options: &[(&str, &str)],
    ) -> Self {
        Self {
            name: name.to_string(),
            column_prefix: column_prefix.to_string(),
            label: label.to_string(),
            summary: summary.to_string(),
            options: options
                .iter()
                .map(|(label, description)| CategoryOption {
                    label: label.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        }
    }

    /// Indicator column name for an option label.
    pub fn indicator_column(&self, option: &str) -> String {
        format!("{}{}{}", self.column_prefix, INDICATOR_SEPARATOR, option)
    }

    /// All indicator columns, in option order.
    pub fn indicator_columns(&self) -> impl Iterator<Item = String> + '_ {
        self.options
            .iter()
            .map(|option| self.indicator_column(&option.label))
    }

    /// Index of an option label. Matching is exact.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o.label == label)
    }

    /// Label of the default selection.
    pub fn default_option(&self) -> &str {
        self.options
            .first()
            .map(|o| o.label.as_str())
            .unwrap_or_default()
    }
}

/// Complete input form: numeric inputs followed by selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub numeric: Vec<NumericField>,
    pub categorical: Vec<CategoricalField>,
}

impl FormSchema {
    /// The house features form.
    pub fn housing() -> Self {
        let numeric = vec![
            NumericField::new("MSSubClass", "MSSubClass", 0, 60, 190),
            NumericField::new("LotArea", "Lot Area (sq ft)", 0, 5000, 215245),
            NumericField::new("OverallCond", "Overall Condition (1-10)", 1, 9, 10),
            NumericField::new("YearBuilt", "Year Built", 1872, 2010, 2023),
            NumericField::new("YearRemodAdd", "Year Remodeled/Additions", 1950, 2005, 2010),
            NumericField::new(
                "BsmtFinSF2",
                "Basement Finished Area 2 (sq ft)",
                0,
                0,
                1526,
            ),
            NumericField::new("TotalBsmtSF", "Total Basement Area (sq ft)", 0, 1000, 6110),
        ];

        let categorical = vec![
            CategoricalField::new(
                "MSZoning",
                "MSZoning",
                "Select MSZoning",
                "Classification of the property's zoning.",
                &[
                    ("C (all)", "Commercial (all types)"),
                    ("FV", "Floating Village"),
                    ("RH", "Residential High Density"),
                    ("RL", "Residential Low Density"),
                    ("RM", "Residential Medium Density"),
                ],
            ),
            CategoricalField::new(
                "LotConfig",
                "LotConfig",
                "Select Lot Config",
                "Configuration of the lot.",
                &[
                    ("Corner", "Lot at the intersection of two streets."),
                    ("CulDSac", "Lot at the end of a cul-de-sac."),
                    ("FR2", "Lot with a front yard depth of 2 feet."),
                    ("FR3", "Lot with a front yard depth of 3 feet."),
                    ("Inside", "Standard lot within a block."),
                ],
            ),
            CategoricalField::new(
                "BldgType",
                "BldgType",
                "Select Building Type",
                "Type of dwelling on the property.",
                &[
                    ("1Fam", "Single-family dwelling."),
                    ("2fmCon", "Two-family conversion dwelling."),
                    ("Duplex", "Two-family dwelling."),
                    ("Twnhs", "Interior unit townhouse."),
                    ("TwnhsE", "End unit townhouse."),
                ],
            ),
            CategoricalField::new(
                "Exterior",
                "Exterior1st",
                "Select Exterior",
                "Material used for the exterior of the house.",
                &[
                    ("AsbShng", "Asbestos siding."),
                    ("AsphShn", "Asphalt shingle."),
                    ("BrkComm", "Brick commercial."),
                    ("BrkFace", "Brick face."),
                    ("CBlock", "Cinder block."),
                    ("CemntBd", "Cement board."),
                    ("HdBoard", "Hardboard siding."),
                    ("ImStucc", "Imitation stucco."),
                    ("MetalSd", "Metal siding."),
                    ("Plywood", "Plywood siding."),
                    ("Stone", "Stone exterior."),
                    ("Stucco", "Stucco finish."),
                    ("VinylSd", "Vinyl siding."),
                    ("Wd Sdng", "Wood siding."),
                    ("WdShing", "Wood shingle."),
                ],
            ),
        ];

        Self {
            numeric,
            categorical,
        }
    }

    pub fn numeric_field(&self, name: &str) -> Result<&NumericField> {
        self.numeric
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| AppraiseError::UnknownField(name.to_string()))
    }

    pub fn categorical_field(&self, name: &str) -> Result<&CategoricalField> {
        self.categorical
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| AppraiseError::UnknownField(name.to_string()))
    }

    /// A submission holding every field's default.
    pub fn default_input(&self) -> RawInput {
        RawInput::defaults(self)
    }

    /// Columns this form produces: numeric names, then every indicator column.
    pub fn feature_schema(&self) -> Result<FeatureSchema> {
        let columns = self
            .numeric
            .iter()
            .map(|f| f.name.clone())
            .chain(self.categorical.iter().flat_map(|f| f.indicator_columns()))
            .collect();
        FeatureSchema::new(columns)
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::housing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn housing_form_shape() {
        let form = FormSchema::housing();
        assert_eq!(form.numeric.len(), 7);
        assert_eq!(form.categorical.len(), 4);

        let option_counts: Vec<usize> = form.categorical.iter().map(|f| f.options.len()).collect();
        assert_eq!(option_counts, vec![5, 5, 5, 15]);
    }

    #[test]
    fn defaults_within_bounds() {
        for field in FormSchema::housing().numeric {
            assert!(field.contains(field.default), "{} default", field.name);
        }
    }

    #[test]
    fn clamp_to_bounds() {
        let field = NumericField::new("OverallCond", "Overall Condition (1-10)", 1, 9, 10);
        assert_eq!(field.clamp(0), 1);
        assert_eq!(field.clamp(1), 1);
        assert_eq!(field.clamp(10), 10);
        assert_eq!(field.clamp(42), 10);
    }

    #[test]
    fn exterior_uses_first_material_prefix() {
        let form = FormSchema::housing();
        let exterior = form.categorical_field("Exterior").unwrap();
        assert_eq!(exterior.indicator_column("Wd Sdng"), "Exterior1st_Wd Sdng");
    }

    #[test]
    fn form_schema_column_count() {
        let schema = FormSchema::housing().feature_schema().unwrap();
        assert_eq!(schema.len(), 37);
        assert_eq!(schema.columns()[0], "MSSubClass");
        assert_eq!(schema.columns()[7], "MSZoning_C (all)");
        assert_eq!(schema.columns()[36], "Exterior1st_WdShing");
    }

    #[test]
    fn unknown_field_lookup() {
        let form = FormSchema::housing();
        assert!(matches!(
            form.numeric_field("GarageArea"),
            Err(AppraiseError::UnknownField(_))
        ));
        assert!(form.categorical_field("MSZoning").is_ok());
    }
}
