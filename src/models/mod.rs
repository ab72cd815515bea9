mod errors;
mod features;
mod transaction;

pub use errors::PipelineError;
pub use features::{FeatureVector, CATEGORICAL_FEATURE, NUMERIC_FEATURES};
pub use transaction::{TransactionRecord, REQUIRED_COLUMNS};
