//! Regression tree ensembles (random forest or gradient boosted).

use serde::{Deserialize, Serialize};

use crate::error::{AppraiseError, Result};
use crate::model::Predictor;
use crate::schema::FeatureSchema;

/// How tree outputs combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of trees (random forest)
    #[default]
    Mean,
    /// Sum of trees (gradient boosting)
    Sum,
}

/// A node in a flat tree array. The root is node 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Go `left` when `values[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// One regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Single-leaf tree.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![TreeNode::Leaf { value }])
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Walk from the root to a leaf.
    ///
    /// Requires a tree that passed [`Self::check`]: children point
    /// forward, so the walk terminates.
    pub(crate) fn evaluate(&self, values: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if values[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    fn check(&self, tree: usize, num_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(AppraiseError::InvalidModel(format!("tree {tree} has no nodes")));
        }
        for (node, n) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *n
            {
                if feature >= num_features {
                    return Err(AppraiseError::InvalidModel(format!(
                        "tree {tree} node {node} splits on feature {feature} but the model has {num_features} features"
                    )));
                }
                for child in [left, right] {
                    if child <= node || child >= self.nodes.len() {
                        return Err(AppraiseError::InvalidModel(format!(
                            "tree {tree} node {node} references child {child} but tree has {} nodes",
                            self.nodes.len()
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Ensemble of regression trees over named features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
    #[serde(default)]
    aggregation: Aggregation,
    /// Added to the aggregated tree output
    #[serde(default)]
    base_score: f64,
}

impl TreeEnsemble {
    /// Build and validate an ensemble.
    pub fn new(
        feature_names: Vec<String>,
        trees: Vec<RegressionTree>,
        aggregation: Aggregation,
        base_score: f64,
    ) -> Result<Self> {
        let model = Self {
            feature_names,
            trees,
            aggregation,
            base_score,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn base_score(&self) -> f64 {
        self.base_score
    }
}

impl Predictor for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Every tree's node and feature indices, plus a finite base score.
    fn validate(&self) -> Result<()> {
        if !self.base_score.is_finite() {
            return Err(AppraiseError::InvalidModel(
                "base score is not finite".to_string(),
            ));
        }
        FeatureSchema::new(self.feature_names.clone())?;
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(i, self.feature_names.len())?;
        }
        Ok(())
    }

    fn predict_values(&self, values: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return self.base_score;
        }
        let total: f64 = self.trees.iter().map(|t| t.evaluate(values)).sum();
        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        self.base_score + combined
    }
}
