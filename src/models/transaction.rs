use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

use crate::types::UserId;

/// Represents a single row from the transaction history CSV file.
///
/// Every numeric field and the `type` field are optional because the upstream
/// exports contain blank cells. A blank cell does not reject the file; the record
/// is loaded and later fails feature engineering instead. The PaySim column names
/// are accepted as aliases of the canonical ones, but only one spelling of each
/// column may appear in a file: a header carrying both `user_id` and `nameOrig`
/// is rejected as a duplicate field.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    /// The user (sender) this transaction belongs to.
    #[serde(alias = "nameOrig")]
    pub user_id: UserId,
    /// The transaction category (PAYMENT, TRANSFER, CASH_IN, ...)
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub amount: Option<Decimal>,
    #[serde(rename = "sender_old_bal", alias = "oldbalanceOrg", default, deserialize_with = "deserialize_decimal")]
    pub sender_old_balance: Option<Decimal>,
    #[serde(rename = "sender_new_bal", alias = "newbalanceOrig", default, deserialize_with = "deserialize_decimal")]
    pub sender_new_balance: Option<Decimal>,
    #[serde(rename = "receiver_old_bal", alias = "oldbalanceDest", default, deserialize_with = "deserialize_decimal")]
    pub receiver_old_balance: Option<Decimal>,
    #[serde(rename = "receiver_new_bal", alias = "newbalanceDest", default, deserialize_with = "deserialize_decimal")]
    pub receiver_new_balance: Option<Decimal>
}

/// Required columns, each listed with the header names it may appear under.
pub const REQUIRED_COLUMNS: [&[&str]; 7] = [
    &["user_id", "nameOrig"],
    &["type"],
    &["amount"],
    &["sender_old_bal", "oldbalanceOrg"],
    &["sender_new_bal", "newbalanceOrig"],
    &["receiver_old_bal", "oldbalanceDest"],
    &["receiver_new_bal", "newbalanceDest"],
];

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None)
    };

    let value = value.trim();

    if value.is_empty() {
        return Ok(None);
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map(Some)
        .map_err(|error| de::Error::custom(format!("invalid decimal [{value}]: {error}")))
}
