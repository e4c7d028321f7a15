//! Feature schema: the ordered column list a model expects.

use std::collections::HashMap;

use crate::error::{AppraiseError, Result};

/// Ordered, duplicate-free list of column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Build a schema, rejecting duplicate column names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.clone(), i).is_some() {
                return Err(AppraiseError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Position of a column in the schema.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

/// Compare a row's columns against expected feature names.
///
/// Name sets must agree first; only then is order checked, so a mismatch
/// report always lists the offending names.
pub fn check_columns(expected: &[String], found: &[String]) -> Result<()> {
    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !found.contains(name))
        .cloned()
        .collect();
    let unexpected: Vec<String> = found
        .iter()
        .filter(|name| !expected.contains(name))
        .cloned()
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(AppraiseError::SchemaMismatch {
            missing,
            unexpected,
        });
    }

    if let Some((position, (e, f))) = expected
        .iter()
        .zip(found)
        .enumerate()
        .find(|(_, (e, f))| e != f)
    {
        return Err(AppraiseError::ColumnOrder {
            position,
            expected: e.clone(),
            found: f.clone(),
        });
    }

    // Same names, same order, but a duplicate on one side can still differ in length
    if expected.len() != found.len() {
        return Err(AppraiseError::SchemaMismatch {
            missing: Vec::new(),
            unexpected: Vec::new(),
        });
    }

    Ok(())
}
