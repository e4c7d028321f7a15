//! Linear regression model.

use serde::{Deserialize, Serialize};

use crate::error::{AppraiseError, Result};
use crate::model::Predictor;
use crate::schema::FeatureSchema;

/// Ordinary linear regression: `intercept + sum(coefficient * value)`.
///
/// # Example
///
/// ```
/// use appraise_core::{FeatureRow, LinearRegressor, Predictor};
///
/// let model = LinearRegressor::new(
///     vec!["LotArea".to_string(), "OverallCond".to_string()],
///     vec![2.0, 1500.0],
///     10_000.0,
/// )
/// .unwrap();
/// let row = FeatureRow::from_pairs([("LotArea", 5000.0), ("OverallCond", 9.0)]);
/// assert_eq!(model.predict(&[row]).unwrap(), vec![33_500.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    /// Training columns, in order
    feature_names: Vec<String>,
    /// One coefficient per feature
    coefficients: Vec<f64>,
    #[serde(default)]
    intercept: f64,
}

impl LinearRegressor {
    /// Build and validate a linear model.
    pub fn new(feature_names: Vec<String>, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Predictor for LinearRegressor {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Coefficient count, finiteness and feature-name uniqueness.
    fn validate(&self) -> Result<()> {
        if self.coefficients.len() != self.feature_names.len() {
            return Err(AppraiseError::InvalidModel(format!(
                "linear model has {} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if let Some(bad) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(AppraiseError::InvalidModel(format!(
                "coefficient for {} is not finite",
                self.feature_names[bad]
            )));
        }
        if !self.intercept.is_finite() {
            return Err(AppraiseError::InvalidModel(
                "intercept is not finite".to_string(),
            ));
        }
        FeatureSchema::new(self.feature_names.clone())?;
        Ok(())
    }

    fn predict_values(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .fold(self.intercept, |acc, (c, v)| acc + c * v)
    }
}
