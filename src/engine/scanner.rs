use crate::classifier::RiskModel;
use crate::models::{FeatureVector, TransactionRecord};
use tracing::debug;

/// Outcome of replaying one user's history through the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReputationResult {
    pub max_fraud_probability: f64,
    pub transactions_analyzed: usize
}

/// Scores every record in `history` and keeps the highest fraud probability.
///
/// The scan never stops early: a single risky transaction dominates the score,
/// and `transactions_analyzed` is always the full history length. Records that
/// fail feature engineering or classification are skipped and still counted.
pub fn scan<M: RiskModel + ?Sized>(history: &[TransactionRecord], model: &M) -> ReputationResult {
    let mut best = 0.0_f64;

    for (index, record) in history.iter().enumerate() {
        let probability = FeatureVector::engineer(record)
            .and_then(|features| model.fraud_probability(&features));

        match probability {
            Ok(probability) => {
                best = best.max(probability);
            },
            Err(error) => {
                debug!("Skipping transaction #{} for user [{}]: {error}", index + 1, record.user_id);
            }
        }
    }

    ReputationResult {
        max_fraud_probability: best,
        transactions_analyzed: history.len()
    }
}
