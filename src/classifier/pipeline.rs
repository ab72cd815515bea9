use crate::classifier::errors::ModelLoadError;
use crate::classifier::forest::RandomForest;
use crate::classifier::preprocessor::Preprocessor;
use crate::classifier::RiskModel;
use crate::models::{FeatureVector, PipelineError};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

/// The persisted preprocessor and classifier, validated against each other.
#[derive(Debug, Clone)]
pub struct FraudPipeline {
    preprocessor: Preprocessor,
    forest: RandomForest,
    fraud_index: usize
}

impl FraudPipeline {
    /// Builds a pipeline from already deserialized parts.
    ///
    /// # Errors
    /// Returns `ModelLoadError` if either part is internally inconsistent or the
    /// preprocessor output does not match the classifier input width.
    pub fn new(preprocessor: Preprocessor, forest: RandomForest) -> Result<Self, ModelLoadError> {
        preprocessor.validate()?;
        forest.validate()?;

        if preprocessor.output_width() != forest.n_features {
            return Err(ModelLoadError::DimensionMismatch {
                produced: preprocessor.output_width(),
                expected: forest.n_features
            });
        }

        let fraud_index = forest.fraud_index()
            .ok_or_else(|| ModelLoadError::MissingFraudClass(forest.classes.clone()))?;

        Ok(Self { preprocessor, forest, fraud_index })
    }

    /// Loads both artifacts from disk. Nothing is returned unless both load.
    pub fn load(preprocessor_path: impl AsRef<Path>, model_path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let preprocessor: Preprocessor = read_json(preprocessor_path.as_ref())?;
        let forest: RandomForest = read_json(model_path.as_ref())?;
        let pipeline = Self::new(preprocessor, forest)?;

        info!(
            "Loaded preprocessor ({} categories) and classifier ({} trees, {} features)",
            pipeline.preprocessor.categories.len(), pipeline.forest.trees.len(), pipeline.forest.n_features
        );

        Ok(pipeline)
    }
}

impl RiskModel for FraudPipeline {
    fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, PipelineError> {
        self.preprocessor.transform(features)
    }

    fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>, PipelineError> {
        self.forest.predict_proba(input)
    }

    fn fraud_index(&self) -> usize {
        self.fraud_index
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    let content = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.display().to_string(),
        source
    })?;

    serde_json::from_str(&content).map_err(|source| ModelLoadError::Json {
        path: path.display().to_string(),
        source
    })
}
