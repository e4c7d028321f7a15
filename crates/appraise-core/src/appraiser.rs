//! Encode-and-predict service.
//!
//! An [`Appraiser`] is built once at startup. It owns the form, the shared
//! model handle, and the expected column list, and turns each submission into
//! a single [`Appraisal`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::{AppraiseConfig, SchemaSource};
use crate::display::price_sentence;
use crate::encoder::{Encoding, FeatureEncoder};
use crate::error::{AppraiseError, Result};
use crate::form::FormSchema;
use crate::input::RawInput;
use crate::model::{load_model, Predictor};
use crate::schema::FeatureSchema;

/// Form + model, ready to appraise submissions.
#[derive(Debug, Clone)]
pub struct Appraiser {
    form: FormSchema,
    model: Arc<dyn Predictor>,
    schema: FeatureSchema,
    currency_symbol: String,
}

impl Appraiser {
    /// Build from an already loaded model.
    pub fn new(form: FormSchema, model: Arc<dyn Predictor>, source: SchemaSource) -> Result<Self> {
        let schema = match source {
            SchemaSource::Model => FeatureSchema::new(model.feature_names().to_vec())?,
            SchemaSource::Form => form.feature_schema()?,
        };
        Ok(Self {
            form,
            model,
            schema,
            currency_symbol: "$".to_string(),
        })
    }

    /// Load the configured model for the housing form.
    pub fn from_config(config: &AppraiseConfig) -> Result<Self> {
        let model = load_model(&config.model_path)?;
        Ok(Self::new(FormSchema::housing(), model, config.schema_source)?
            .with_currency_symbol(&config.currency_symbol))
    }

    pub fn with_currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self
    }

    pub fn form(&self) -> &FormSchema {
        &self.form
    }

    pub fn model(&self) -> &dyn Predictor {
        self.model.as_ref()
    }

    /// Expected columns, in the order rows are handed to the model.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Encode a submission without predicting.
    pub fn encode(&self, input: &RawInput) -> Result<Encoding> {
        FeatureEncoder::new(&self.form).encode(input, &self.schema)
    }

    /// Encode a submission and predict its price.
    pub fn appraise(&self, input: &RawInput) -> Result<Appraisal> {
        let encoding = self.encode(input)?;
        let predictions = self.model.predict(std::slice::from_ref(&encoding.row))?;
        let value = predictions.first().copied().ok_or_else(|| {
            AppraiseError::InvalidModel("model returned no prediction".to_string())
        })?;

        tracing::debug!(value, model = self.model.kind(), "Appraised submission");

        Ok(Appraisal {
            value,
            currency_symbol: self.currency_symbol.clone(),
            encoding,
        })
    }
}

/// One prediction and the row it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appraisal {
    pub value: f64,
    pub currency_symbol: String,
    pub encoding: Encoding,
}

impl fmt::Display for Appraisal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", price_sentence(self.value, &self.currency_symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearRegressor;

    fn form_model(intercept: f64) -> Arc<dyn Predictor> {
        let schema = FormSchema::housing().feature_schema().unwrap();
        let coefficients = vec![0.0; schema.len()];
        Arc::new(
            LinearRegressor::new(schema.columns().to_vec(), coefficients, intercept).unwrap(),
        )
    }

    #[test]
    fn appraise_defaults() {
        let appraiser =
            Appraiser::new(FormSchema::housing(), form_model(150_000.0), SchemaSource::Model)
                .unwrap();
        let appraisal = appraiser
            .appraise(&appraiser.form().default_input())
            .unwrap();
        assert_eq!(appraisal.value, 150_000.0);
        assert_eq!(appraisal.to_string(), "Price prediction is $150,000.00");
    }

    #[test]
    fn form_schema_against_narrower_model_fails() {
        let model: Arc<dyn Predictor> = Arc::new(
            LinearRegressor::new(vec!["LotArea".to_string()], vec![1.0], 0.0).unwrap(),
        );
        let appraiser = Appraiser::new(FormSchema::housing(), model, SchemaSource::Form).unwrap();
        let err = appraiser
            .appraise(&appraiser.form().default_input())
            .unwrap_err();
        assert!(matches!(err, AppraiseError::SchemaMismatch { .. }));
    }

    #[test]
    fn currency_symbol() {
        let appraiser =
            Appraiser::new(FormSchema::housing(), form_model(1234.5), SchemaSource::Form)
                .unwrap()
                .with_currency_symbol("£");
        let appraisal = appraiser
            .appraise(&appraiser.form().default_input())
            .unwrap();
        assert_eq!(appraisal.to_string(), "Price prediction is £1,234.50");
    }
}
