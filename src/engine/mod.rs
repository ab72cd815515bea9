mod async_engine;
mod errors;
mod reputation;
mod scanner;
#[cfg(test)]
mod tests;

pub use async_engine::AsyncEngine;
pub use reputation::ReputationService;

#[cfg(test)]
use {
    async_engine::RunSummary,
    errors::ReputationError,
    reputation::{risk_percentage, RiskLevel},
    scanner::{scan, ReputationResult}
};
