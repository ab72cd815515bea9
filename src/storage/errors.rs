use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Data load error: Unable to open [{path}]: {source}")]
    Open {
        path: String,
        source: std::io::Error
    },
    #[error("Data load error: Required column [{column}] is missing")]
    MissingColumn {
        column: &'static str
    },
    #[error("Data load error: {0}")]
    Csv(#[from] csv::Error)
}
