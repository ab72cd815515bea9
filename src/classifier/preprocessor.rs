use crate::classifier::errors::ModelLoadError;
use crate::models::{FeatureVector, PipelineError, CATEGORICAL_FEATURE, NUMERIC_FEATURES};
use serde::Deserialize;

/// How an unseen transaction type is encoded.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Encode as all zeros.
    #[default]
    Ignore,
    /// Reject the record.
    Error
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>
}

/// A fitted column transformer: standard scaling (optional) over the numeric
/// columns followed by a one-hot encoding of the transaction type.
#[derive(Debug, Clone, Deserialize)]
pub struct Preprocessor {
    pub numeric_features: Vec<String>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    pub categorical_feature: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown
}

impl Preprocessor {
    /// Checks the fitted state against the engineered feature layout.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.numeric_features.iter().map(String::as_str).ne(NUMERIC_FEATURES) {
            return Err(ModelLoadError::ColumnOrder {
                expected: NUMERIC_FEATURES.iter().map(|name| name.to_string()).collect(),
                found: self.numeric_features.clone()
            });
        }

        if self.categorical_feature != CATEGORICAL_FEATURE {
            return Err(ModelLoadError::CategoricalFeature(self.categorical_feature.clone()));
        }

        if let Some(scaler) = &self.scaler {
            for actual in [scaler.mean.len(), scaler.scale.len()] {
                if actual != NUMERIC_FEATURES.len() {
                    return Err(ModelLoadError::ScalerShape { expected: NUMERIC_FEATURES.len(), actual });
                }
            }

            for (index, (mean, scale)) in scaler.mean.iter().zip(&scaler.scale).enumerate() {
                if !mean.is_finite() || !scale.is_finite() || *scale == 0.0 {
                    return Err(ModelLoadError::ScalerValue { index });
                }
            }
        }

        Ok(())
    }

    pub fn output_width(&self) -> usize {
        NUMERIC_FEATURES.len() + self.categories.len()
    }

    pub fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, PipelineError> {
        let mut output = Vec::with_capacity(self.output_width());

        for (index, value) in features.numeric.iter().enumerate() {
            if !value.is_finite() {
                return Err(PipelineError::NonFinite { feature: NUMERIC_FEATURES[index] });
            }

            let scaled = match &self.scaler {
                Some(scaler) => (value - scaler.mean[index]) / scaler.scale[index],
                None => *value
            };

            output.push(scaled);
        }

        let position = self.categories.iter().position(|category| *category == features.transaction_type);

        if position.is_none() && self.handle_unknown == HandleUnknown::Error {
            return Err(PipelineError::UnknownCategory { category: features.transaction_type.clone() });
        }

        output.extend((0..self.categories.len()).map(|index| if Some(index) == position { 1.0 } else { 0.0 }));

        Ok(output)
    }
}
