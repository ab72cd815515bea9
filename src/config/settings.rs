use crate::config::errors::ConfigError;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub const USAGE: &str = "Usage: fraud-reputation [transactions].csv [preprocessor].json [model].json [log_level:optional] < [requests].txt > [output].csv";

/// Process settings taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub transactions_path: PathBuf,
    pub preprocessor_path: PathBuf,
    pub model_path: PathBuf,
    pub log_level: LevelFilter
}

impl Settings {
    /// Parses the arguments that follow the program name.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        let transactions_path = args.next().ok_or(ConfigError::MissingArgument("transactions"))?;
        let preprocessor_path = args.next().ok_or(ConfigError::MissingArgument("preprocessor"))?;
        let model_path = args.next().ok_or(ConfigError::MissingArgument("model"))?;
        let log_level = args.next()
            .map(|level| parse_log_level(&level))
            .unwrap_or(LevelFilter::ERROR);

        Ok(Self {
            transactions_path: transactions_path.into(),
            preprocessor_path: preprocessor_path.into(),
            model_path: model_path.into(),
            log_level
        })
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}
