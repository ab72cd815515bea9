mod errors;
mod settings;

pub use settings::{Settings, USAGE};

#[cfg(test)]
use {errors::ConfigError, settings::parse_log_level};
