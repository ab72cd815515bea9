use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required argument [{0}]")]
    MissingArgument(&'static str)
}
