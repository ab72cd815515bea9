use crate::classifier::errors::ModelLoadError;
use crate::models::PipelineError;
use serde::Deserialize;

const LEAF: i64 = -1;

/// A fitted decision tree in flat array form.
///
/// Node `i` is a leaf when both children are `-1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go to `children_left[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>
}

impl DecisionTree {
    fn validate(&self, tree: usize, n_features: usize, n_classes: usize) -> Result<(), ModelLoadError> {
        let nodes = self.children_left.len();

        if nodes == 0 {
            return Err(ModelLoadError::malformed_tree(tree, "no nodes"));
        }

        if [self.children_right.len(), self.feature.len(), self.threshold.len(), self.value.len()].iter().any(|len| *len != nodes) {
            return Err(ModelLoadError::malformed_tree(tree, "node arrays differ in length"));
        }

        for node in 0..nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);

            if left == LEAF && right == LEAF {
                let distribution = &self.value[node];

                if distribution.len() != n_classes {
                    return Err(ModelLoadError::malformed_tree(tree, format!("leaf {node} has {} class values, expected {n_classes}", distribution.len())));
                }

                if distribution.iter().any(|weight| !weight.is_finite() || *weight < 0.0) || distribution.iter().sum::<f64>() <= 0.0 {
                    return Err(ModelLoadError::malformed_tree(tree, format!("leaf {node} has an unusable class distribution")));
                }

                continue;
            }

            // Children must point forward, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= nodes as i64 {
                    return Err(ModelLoadError::malformed_tree(tree, format!("node {node} has invalid child {child}")));
                }
            }

            let feature = self.feature[node];

            if feature < 0 || feature as usize >= n_features {
                return Err(ModelLoadError::malformed_tree(tree, format!("node {node} splits on unknown feature {feature}")));
            }

            if self.threshold[node].is_nan() {
                return Err(ModelLoadError::malformed_tree(tree, format!("node {node} has a NaN threshold")));
            }
        }

        Ok(())
    }

    /// Class probabilities at the leaf reached by `input`.
    fn predict_proba(&self, input: &[f64]) -> Vec<f64> {
        let mut node = 0;

        while self.children_left[node] != LEAF {
            node = if input[self.feature[node] as usize] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let distribution = &self.value[node];
        let total: f64 = distribution.iter().sum();

        distribution.iter().map(|weight| weight / total).collect()
    }
}

/// A fitted random forest classifier; probabilities are averaged over trees.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>
}

impl RandomForest {
    pub const FRAUD_LABEL: i64 = 1;

    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.fraud_index().is_none() {
            return Err(ModelLoadError::MissingFraudClass(self.classes.clone()));
        }

        if self.trees.is_empty() {
            return Err(ModelLoadError::EmptyForest);
        }

        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features, self.classes.len())?;
        }

        Ok(())
    }

    pub fn fraud_index(&self) -> Option<usize> {
        self.classes.iter().position(|label| *label == Self::FRAUD_LABEL)
    }

    pub fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if input.len() != self.n_features {
            return Err(PipelineError::DimensionMismatch { expected: self.n_features, actual: input.len() });
        }

        let mut probabilities = vec![0.0; self.classes.len()];

        for tree in &self.trees {
            for (total, probability) in probabilities.iter_mut().zip(tree.predict_proba(input)) {
                *total += probability;
            }
        }

        let tree_count = self.trees.len() as f64;

        Ok(probabilities.into_iter().map(|total| total / tree_count).collect())
    }
}
