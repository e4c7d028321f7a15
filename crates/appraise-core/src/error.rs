//! Error types for appraise-core

use thiserror::Error;

/// Result type alias for appraise operations
pub type Result<T> = std::result::Result<T, AppraiseError>;

/// Main error type for appraise operations
#[derive(Error, Debug)]
pub enum AppraiseError {
    /// Reading a model or config file failed
    #[error("IO error for {path}: {message}")]
    Io { path: String, message: String },

    /// Model artifact is not valid JSON for any known model kind
    #[error("Model parse error: {0}")]
    ModelParse(String),

    /// Model artifact parsed but is structurally unusable
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Config file is not valid TOML for the config layout
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// Row columns and model feature names disagree
    #[error(
        "Feature names do not match the model: missing {missing:?}, unexpected {unexpected:?}"
    )]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Same columns as the model, different order
    #[error("Feature names must be in the same order as the model; first difference at position {position}: expected {expected:?}, found {found:?}")]
    ColumnOrder {
        position: usize,
        expected: String,
        found: String,
    },

    /// Expected column list names a column twice
    #[error("Duplicate column in feature schema: {0}")]
    DuplicateColumn(String),

    /// No numeric or categorical field with this name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Selection is not one of the field's options
    #[error("Unknown option {value:?} for {field}")]
    UnknownOption { field: String, value: String },

    /// Raw input lacks a value for a form field
    #[error("Missing value for {0}")]
    MissingValue(String),

    /// Command line value is not written as NAME=VALUE
    #[error("Expected NAME=VALUE, got {0:?}")]
    InvalidAssignment(String),

    /// Text entered for a numeric field is not an integer
    #[error("Not a whole number for {field}: {text:?}")]
    NotANumber { field: String, text: String },
}

impl AppraiseError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        AppraiseError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
