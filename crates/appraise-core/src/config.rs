//! Configuration for appraise
//!
//! Loaded from `config.toml`, every key optional:
//!
//! ```toml
//! model_path = "models/house_prices.json"
//! schema_source = "model"   # or "form"
//! currency_symbol = "$"
//! ```
//!
//! Standard locations, later overriding earlier: built-in defaults,
//! `~/.appraise/config.toml`, then `.appraise/config.toml` under the project
//! root. `APPRAISE_MODEL` overrides `model_path`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppraiseError, Result};

/// Environment variable overriding the model path.
pub const MODEL_ENV: &str = "APPRAISE_MODEL";

/// Where the encoder takes its expected column list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaSource {
    /// The model's own feature names
    #[default]
    Model,
    /// The columns the form produces
    Form,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppraiseConfig {
    /// Model artifact; relative paths resolve against the config file's directory
    pub model_path: PathBuf,
    pub schema_source: SchemaSource,
    pub currency_symbol: String,
}

impl Default for AppraiseConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            schema_source: SchemaSource::Model,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Partial config as written in a file; absent keys keep earlier values.
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    model_path: Option<PathBuf>,
    schema_source: Option<SchemaSource>,
    currency_symbol: Option<String>,
}

impl AppraiseConfig {
    /// Load a single config file over the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Load from standard locations, or only from `explicit` when given.
    pub fn load_standard(explicit: Option<&Path>, project_root: Option<&Path>) -> Result<Self> {
        Self::load_layers(
            explicit,
            Self::user_path().as_deref(),
            project_root,
            std::env::var(MODEL_ENV).ok(),
        )
    }

    /// Layer defaults, user file, project file, then the model override.
    fn load_layers(
        explicit: Option<&Path>,
        user_path: Option<&Path>,
        project_root: Option<&Path>,
        model_override: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        match explicit {
            Some(path) => config.merge_file(path)?,
            None => {
                if let Some(path) = user_path {
                    if path.exists() {
                        config.merge_file(path)?;
                    }
                }
                if let Some(root) = project_root {
                    let path = root.join(".appraise").join("config.toml");
                    if path.exists() {
                        config.merge_file(&path)?;
                    }
                }
            }
        }

        if let Some(model) = model_override.filter(|m| !m.is_empty()) {
            config.model_path = PathBuf::from(model);
        }

        Ok(config)
    }

    /// `~/.appraise/config.toml`
    pub fn user_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".appraise").join("config.toml"))
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| AppraiseError::io(path, e))?;
        let toml: TomlConfig =
            toml::from_str(&content).map_err(|e| AppraiseError::ConfigParse(e.to_string()))?;

        if let Some(model_path) = toml.model_path {
            self.model_path = match path.parent() {
                Some(dir) if model_path.is_relative() => dir.join(model_path),
                _ => model_path,
            };
        }
        if let Some(source) = toml.schema_source {
            self.schema_source = source;
        }
        if let Some(symbol) = toml.currency_symbol {
            self.currency_symbol = symbol;
        }

        tracing::info!("Loaded config from {:?}", path);
        Ok(())
    }
}
