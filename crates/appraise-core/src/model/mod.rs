//! Regression model artifacts and the prediction capability.
//!
//! A model artifact is a JSON document tagged by `kind`:
//!
//! ```json
//! { "kind": "linear", "feature_names": ["LotArea"], "coefficients": [2.5], "intercept": 1000.0 }
//! ```
//!
//! Artifacts are loaded once at startup and shared read-only behind
//! `Arc<dyn Predictor>`.

mod forest;
mod linear;

pub use forest::*;
pub use linear::*;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::encoder::FeatureRow;
use crate::error::{AppraiseError, Result};
use crate::schema::check_columns;

/// Something that maps feature rows to one value per row.
pub trait Predictor: Send + Sync + std::fmt::Debug {
    /// Short model kind for logs and display.
    fn kind(&self) -> &'static str;

    /// Columns the model was trained on, in order.
    fn feature_names(&self) -> &[String];

    /// Structural checks; [`Self::predict_values`] may panic on a model that fails them.
    fn validate(&self) -> Result<()>;

    /// Predict one value for a row already checked against [`Self::feature_names`].
    fn predict_values(&self, values: &[f64]) -> f64;

    /// Predict one value per row. Every row must carry exactly the model's
    /// feature names, in order.
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        self.validate()?;
        rows.iter()
            .map(|row| {
                check_columns(self.feature_names(), row.columns())?;
                Ok(self.predict_values(row.values()))
            })
            .collect()
    }
}

/// Serialized model, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AppraiseError::ModelParse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AppraiseError::ModelParse(e.to_string()))
    }

    /// Read an artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppraiseError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Validate and wrap as a shared predictor.
    pub fn into_predictor(self) -> Result<Arc<dyn Predictor>> {
        let predictor: Arc<dyn Predictor> = match self {
            ModelArtifact::Linear(model) => Arc::new(model),
            ModelArtifact::TreeEnsemble(model) => Arc::new(model),
        };
        predictor.validate()?;
        Ok(predictor)
    }
}

/// Load, validate, and share a model artifact.
pub fn load_model(path: &Path) -> Result<Arc<dyn Predictor>> {
    let predictor = ModelArtifact::load(path)?.into_predictor()?;
    tracing::info!(
        kind = predictor.kind(),
        features = predictor.feature_names().len(),
        "Loaded model from {:?}",
        path
    );
    Ok(predictor)
}
