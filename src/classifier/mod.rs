mod errors;
mod forest;
mod pipeline;
mod preprocessor;

use crate::models::{FeatureVector, PipelineError};

pub use pipeline::FraudPipeline;

#[cfg(test)]
use {errors::ModelLoadError, forest::RandomForest, preprocessor::{HandleUnknown, Preprocessor}};

/// A fitted fraud model: a transformer followed by a probabilistic classifier.
pub trait RiskModel: Send + Sync + 'static {
    fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, PipelineError>;

    fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>, PipelineError>;

    /// Position of the fraud class in the `predict_proba` output.
    fn fraud_index(&self) -> usize;

    /// Runs the full transform and classify chain for one transaction.
    fn fraud_probability(&self, features: &FeatureVector) -> Result<f64, PipelineError> {
        let input = self.transform(features)?;
        let probabilities = self.predict_proba(&input)?;
        let index = self.fraud_index();

        let probability = *probabilities.get(index)
            .ok_or(PipelineError::MissingClass { index })?;

        if !(0.0..=1.0).contains(&probability) {
            return Err(PipelineError::InvalidProbability { value: probability });
        }

        Ok(probability)
    }
}
