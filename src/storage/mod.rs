mod errors;
mod indexed_store;
#[cfg(test)]
mod tests;

use crate::models::TransactionRecord;

pub use indexed_store::IndexedStore;

#[cfg(test)]
use errors::DataLoadError;

/// Read-only access to per-user transaction histories.
pub trait Storage: Send + Sync + 'static {
    fn load(&self, user_id: &str) -> Option<&[TransactionRecord]>;
}
