use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Model load error: Unable to read [{path}]: {source}")]
    Io {
        path: String,
        source: std::io::Error
    },
    #[error("Model load error: Unable to parse [{path}]: {source}")]
    Json {
        path: String,
        source: serde_json::Error
    },
    #[error("Model load error: Preprocessor expects numeric columns {found:?} but features are engineered as {expected:?}")]
    ColumnOrder {
        expected: Vec<String>,
        found: Vec<String>
    },
    #[error("Model load error: Preprocessor encodes [{0}] but the categorical feature is [type]")]
    CategoricalFeature(String),
    #[error("Model load error: Scaler has {actual} entries, expected {expected}")]
    ScalerShape {
        expected: usize,
        actual: usize
    },
    #[error("Model load error: Scaler entry {index} is not usable")]
    ScalerValue {
        index: usize
    },
    #[error("Model load error: Classifier has no fraud class (label 1) in {0:?}")]
    MissingFraudClass(Vec<i64>),
    #[error("Model load error: Classifier has no trees")]
    EmptyForest,
    #[error("Model load error: Tree {tree} is malformed: {reason}")]
    MalformedTree {
        tree: usize,
        reason: String
    },
    #[error("Model load error: Preprocessor produces {produced} features but classifier expects {expected}")]
    DimensionMismatch {
        produced: usize,
        expected: usize
    }
}

impl ModelLoadError {
    pub fn malformed_tree(tree: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTree { tree, reason: reason.into() }
    }
}
