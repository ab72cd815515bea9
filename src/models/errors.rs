use thiserror::Error;

/// A failure while turning one record into a fraud probability.
///
/// None of these are fatal to a scan; the record is skipped.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("Pipeline error: Field [{field}] is missing")]
    MissingField {
        field: &'static str
    },
    #[error("Pipeline error: Transaction type is missing")]
    MissingTransactionType,
    #[error("Pipeline error: Numeric overflow while computing [{feature}]")]
    Overflow {
        feature: &'static str
    },
    #[error("Pipeline error: Feature [{feature}] is not a finite number")]
    NonFinite {
        feature: &'static str
    },
    #[error("Pipeline error: Unknown category [{category}] for feature [type]")]
    UnknownCategory {
        category: String
    },
    #[error("Pipeline error: Expected {expected} input features but found {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize
    },
    #[error("Pipeline error: Class probability [{value}] is outside [0, 1]")]
    InvalidProbability {
        value: f64
    },
    #[error("Pipeline error: Classifier returned no probability for class index {index}")]
    MissingClass {
        index: usize
    }
}
