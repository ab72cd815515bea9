use crate::models::{TransactionRecord, REQUIRED_COLUMNS};
use crate::storage::errors::DataLoadError;
use crate::storage::Storage;
use crate::types::UserId;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Transaction histories grouped by user, built once and read-only afterwards.
#[derive(Debug, Default)]
pub struct IndexedStore {
    histories: HashMap<UserId, Vec<TransactionRecord>>,
    transaction_count: usize
}

impl IndexedStore {
    /// Loads and indexes the CSV file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Open {
            path: path.display().to_string(),
            source
        })?;

        let store = Self::from_reader(BufReader::new(file))?;

        info!("Loaded {} transactions for {} unique users from {}", store.transaction_count, store.histories.len(), path.display());

        Ok(store)
    }

    /// Loads and indexes CSV data from any reader.
    ///
    /// Construction is all-or-nothing: a missing required column or any row that
    /// cannot be parsed fails the whole load. Records keep their source order
    /// within each user's history.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(reader);

        check_columns(reader.headers()?)?;

        let mut histories: HashMap<UserId, Vec<TransactionRecord>> = HashMap::new();
        let mut transaction_count = 0;

        for result in reader.deserialize::<TransactionRecord>() {
            let record = result?;
            histories.entry(record.user_id.clone()).or_default().push(record);
            transaction_count += 1;
        }

        debug!("Indexed {transaction_count} rows into {} histories", histories.len());

        Ok(Self { histories, transaction_count })
    }

    pub fn user_count(&self) -> usize {
        self.histories.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

impl FromIterator<(UserId, Vec<TransactionRecord>)> for IndexedStore {
    fn from_iter<I: IntoIterator<Item = (UserId, Vec<TransactionRecord>)>>(iter: I) -> Self {
        let mut store = Self::default();

        for (user_id, history) in iter {
            store.transaction_count += history.len();
            store.histories.entry(user_id).or_default().extend(history);
        }

        store
    }
}

impl Storage for IndexedStore {
    fn load(&self, user_id: &str) -> Option<&[TransactionRecord]> {
        self.histories.get(user_id).map(Vec::as_slice)
    }
}

fn check_columns(headers: &StringRecord) -> Result<(), DataLoadError> {
    for aliases in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| aliases.contains(&header)) {
            return Err(DataLoadError::MissingColumn { column: aliases[0] });
        }
    }

    Ok(())
}
