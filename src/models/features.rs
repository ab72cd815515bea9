use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::errors::PipelineError;
use crate::models::TransactionRecord;

/// Names of the numeric columns, in the order the fitted transformer expects them.
pub const NUMERIC_FEATURES: [&str; 8] = [
    "amount",
    "sender_old_bal",
    "sender_new_bal",
    "receiver_old_bal",
    "receiver_new_bal",
    "sender_balance_delta",
    "receiver_balance_delta",
    "sender_diff_expected",
];

/// Name of the single categorical column, appended after the numeric ones.
pub const CATEGORICAL_FEATURE: &str = "type";

/// The engineered input for one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub numeric: [f64; 8],
    pub transaction_type: String
}

impl FeatureVector {
    /// Derives the feature vector for a single record.
    ///
    /// The derivation is done in exact decimal arithmetic and only converted to
    /// `f64` at the end, so sign conventions and balance differences match the
    /// training data exactly.
    ///
    /// # Errors
    /// Returns `PipelineError` if:
    /// - A numeric field or the transaction type is absent.
    /// - An intermediate value overflows.
    pub fn engineer(record: &TransactionRecord) -> Result<Self, PipelineError> {
        let amount = required(record.amount, "amount")?;
        let sender_old = required(record.sender_old_balance, "sender_old_bal")?;
        let sender_new = required(record.sender_new_balance, "sender_new_bal")?;
        let receiver_old = required(record.receiver_old_balance, "receiver_old_bal")?;
        let receiver_new = required(record.receiver_new_balance, "receiver_new_bal")?;

        let transaction_type = match record.transaction_type.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => return Err(PipelineError::MissingTransactionType)
        };

        let sender_balance_delta = checked_sub(sender_new, sender_old, "sender_balance_delta")?;
        let receiver_balance_delta = checked_sub(receiver_new, receiver_old, "receiver_balance_delta")?;
        let sender_expected_new = checked_sub(sender_old, amount, "sender_expected_new")?;
        let sender_diff_expected = checked_sub(sender_new, sender_expected_new, "sender_diff_expected")?;

        let values = [
            amount,
            sender_old,
            sender_new,
            receiver_old,
            receiver_new,
            sender_balance_delta,
            receiver_balance_delta,
            sender_diff_expected,
        ];

        let mut numeric = [0.0; 8];

        for (index, value) in values.iter().enumerate() {
            numeric[index] = value.to_f64()
                .filter(|converted| converted.is_finite())
                .ok_or(PipelineError::NonFinite { feature: NUMERIC_FEATURES[index] })?;
        }

        Ok(Self { numeric, transaction_type })
    }
}

fn required(value: Option<Decimal>, field: &'static str) -> Result<Decimal, PipelineError> {
    value.ok_or(PipelineError::MissingField { field })
}

fn checked_sub(lhs: Decimal, rhs: Decimal, feature: &'static str) -> Result<Decimal, PipelineError> {
    lhs.checked_sub(rhs).ok_or(PipelineError::Overflow { feature })
}
