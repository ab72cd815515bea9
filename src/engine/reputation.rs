use crate::classifier::RiskModel;
use crate::engine::errors::ReputationError;
use crate::engine::scanner::{scan, ReputationResult};
use crate::storage::Storage;
use crate::types::UserId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;

const HIGH_THRESHOLD: Decimal = Decimal::from_parts(75, 0, 0, false, 0);
const MEDIUM_THRESHOLD: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RiskLevel {
    Low,
    Medium,
    High
}

impl RiskLevel {
    /// Buckets a percentage; each boundary belongs to the lower tier.
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage > HIGH_THRESHOLD {
            RiskLevel::High
        } else if percentage > MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW"
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::High => "User has past transactions with a very high probability of fraud.",
            RiskLevel::Medium => "User has some past transactions with suspicious characteristics.",
            RiskLevel::Low => "User history appears clean. No high-risk transactions found."
        }
    }
}

/// Converts a probability into a percentage rounded to two places (half to even).
///
/// Rounding applies to the exact binary value of the float, so 2.675 (stored as
/// 2.67499...) rounds down.
pub fn risk_percentage(probability: f64) -> Decimal {
    Decimal::from_f64_retain(probability * 100.0)
        .unwrap_or_default()
        .round_dp(2)
}

/// The reputation reported for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Reputation {
    pub user_id: UserId,
    pub risk_percentage: f64,
    pub risk_level: RiskLevel,
    pub transactions_analyzed: usize
}

impl Reputation {
    pub fn from_result(user_id: &str, result: ReputationResult) -> Self {
        let percentage = risk_percentage(result.max_fraud_probability);

        Self {
            user_id: user_id.to_string(),
            risk_percentage: percentage.to_f64().unwrap_or_default(),
            risk_level: RiskLevel::from_percentage(percentage),
            transactions_analyzed: result.transactions_analyzed
        }
    }

    pub fn message(&self) -> &'static str {
        self.risk_level.message()
    }
}

/// Owns the loaded store and model and answers reputation queries against them.
pub struct ReputationService<S, M> {
    storage: S,
    model: M
}

impl<S: Storage, M: RiskModel> ReputationService<S, M> {
    pub fn new(storage: S, model: M) -> Self {
        Self { storage, model }
    }

    /// Scans the user's history without tier mapping.
    pub fn scan(&self, user_id: &str) -> Result<ReputationResult, ReputationError> {
        let history = self.storage.load(user_id)
            .ok_or_else(|| ReputationError::UserNotFound { user_id: user_id.to_string() })?;

        Ok(scan(history, &self.model))
    }

    /// Looks up a user's reputation.
    ///
    /// # Errors
    /// Returns `ReputationError::UserNotFound` if the user has no history in the
    /// store. A known user whose history is empty is reported as zero risk.
    pub fn get_reputation(&self, user_id: &str) -> Result<Reputation, ReputationError> {
        let result = self.scan(user_id)?;
        let reputation = Reputation::from_result(user_id, result);

        info!(
            "Reputation for user [{}]: {}% ({}) over {} transactions",
            user_id, reputation.risk_percentage, reputation.risk_level.as_str(), reputation.transactions_analyzed
        );

        Ok(reputation)
    }
}
