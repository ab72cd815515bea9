use super::{risk_percentage, scan, AsyncEngine, ReputationError, ReputationResult, ReputationService, RiskLevel, RunSummary};

use std::io::Cursor;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

use crate::classifier::RiskModel;
use crate::models::{FeatureVector, PipelineError, TransactionRecord};
use crate::storage::IndexedStore;

/// Reports `amount / 100` as the fraud probability and refuses `BROKEN` transactions.
struct AmountModel;

impl RiskModel for AmountModel {
    fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, PipelineError> {
        if features.transaction_type == "BROKEN" {
            return Err(PipelineError::UnknownCategory { category: features.transaction_type.clone() });
        }

        Ok(vec![features.numeric[0]])
    }

    fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>, PipelineError> {
        let fraud = input[0] / 100.0;
        Ok(vec![1.0 - fraud, fraud])
    }

    fn fraud_index(&self) -> usize {
        1
    }
}

fn create_record(user_id: &str, transaction_type: Option<&str>, amount: &str) -> Result<TransactionRecord> {
    let zero = Some(Decimal::ZERO);

    Ok(TransactionRecord {
        user_id: user_id.to_string(),
        transaction_type: transaction_type.map(str::to_string),
        amount: Some(Decimal::from_str(amount)?),
        sender_old_balance: zero,
        sender_new_balance: zero,
        receiver_old_balance: zero,
        receiver_new_balance: zero
    })
}

fn create_service(histories: Vec<(&str, Vec<TransactionRecord>)>) -> ReputationService<IndexedStore, AmountModel> {
    let store = histories.into_iter()
        .map(|(user_id, history)| (user_id.to_string(), history))
        .collect();

    ReputationService::new(store, AmountModel)
}

#[test]
fn test_scan_of_empty_history_reports_zero() {
    assert_eq!(scan(&[], &AmountModel), ReputationResult { max_fraud_probability: 0.0, transactions_analyzed: 0 });
}

#[test]
fn test_single_high_risk_record_maps_to_high_tier() -> Result<()> {
    let service = create_service(vec![("himansu367", vec![create_record("himansu367", Some("TRANSFER"), "92")?])]);
    let reputation = service.get_reputation("himansu367")?;

    assert_eq!(reputation.risk_percentage, 92.0);
    assert_eq!(reputation.risk_level, RiskLevel::High);
    assert_eq!(reputation.transactions_analyzed, 1);
    assert_eq!(reputation.message(), "User has past transactions with a very high probability of fraud.");

    Ok(())
}

#[test]
fn test_broken_record_is_skipped_but_counted() -> Result<()> {
    let service = create_service(vec![("aarnov123", vec![
        create_record("aarnov123", Some("PAYMENT"), "10")?,
        create_record("aarnov123", None, "99")?,
    ])]);

    let reputation = service.get_reputation("aarnov123")?;

    assert_eq!(reputation.risk_percentage, 10.0);
    assert_eq!(reputation.transactions_analyzed, 2);
    assert_eq!(reputation.risk_level, RiskLevel::Low);

    Ok(())
}

#[test]
fn test_count_includes_records_failing_every_stage() -> Result<()> {
    let history = vec![
        create_record("u", None, "50")?,
        create_record("u", Some("BROKEN"), "60")?,
        create_record("u", Some("PAYMENT"), "150")?,
    ];

    // The last record yields 1.5, which is rejected as an invalid probability.
    assert_eq!(scan(&history, &AmountModel), ReputationResult { max_fraud_probability: 0.0, transactions_analyzed: 3 });

    Ok(())
}

#[test]
fn test_scan_does_not_stop_at_first_risky_record() -> Result<()> {
    let history = vec![
        create_record("u", Some("TRANSFER"), "90")?,
        create_record("u", Some("PAYMENT"), "5")?,
        create_record("u", Some("TRANSFER"), "95")?,
    ];

    let result = scan(&history, &AmountModel);

    assert_eq!(result.max_fraud_probability, 0.95);
    assert_eq!(result.transactions_analyzed, 3);

    Ok(())
}

#[test]
fn test_appending_records_never_lowers_the_score() -> Result<()> {
    let amounts = ["12", "3", "47", "47", "0", "81", "80"];
    let mut history = Vec::new();
    let mut previous = 0.0;

    for (index, amount) in amounts.iter().enumerate() {
        let transaction_type = if index == 4 { None } else { Some("PAYMENT") };
        history.push(create_record("u", transaction_type, amount)?);

        let result = scan(&history, &AmountModel);

        assert!(result.max_fraud_probability >= previous);
        assert_eq!(result.transactions_analyzed, history.len());
        previous = result.max_fraud_probability;
    }

    assert_eq!(previous, 0.81);

    Ok(())
}

#[test]
fn test_unknown_user_is_distinct_from_known_zero_risk_user() -> Result<()> {
    let service = create_service(vec![("ghost", Vec::new())]);

    assert_eq!(service.get_reputation("nobody"), Err(ReputationError::UserNotFound { user_id: "nobody".to_string() }));

    let reputation = service.get_reputation("ghost")?;

    assert_eq!(reputation.risk_percentage, 0.0);
    assert_eq!(reputation.transactions_analyzed, 0);
    assert_eq!(reputation.risk_level, RiskLevel::Low);

    Ok(())
}

#[test]
fn test_tier_boundaries_belong_to_lower_tier() -> Result<()> {
    let test_cases = vec![
        ("0", RiskLevel::Low),
        ("30", RiskLevel::Low),
        ("30.01", RiskLevel::Medium),
        ("75", RiskLevel::Medium),
        ("75.01", RiskLevel::High),
        ("100", RiskLevel::High),
    ];

    for (percentage, expected_level) in test_cases {
        assert_eq!(RiskLevel::from_percentage(Decimal::from_str(percentage)?), expected_level);
    }

    Ok(())
}

#[test]
fn test_percentage_is_rounded_before_tiering() -> Result<()> {
    assert_eq!(risk_percentage(0.3), Decimal::from_str("30")?);
    assert_eq!(risk_percentage(0.75), Decimal::from_str("75")?);
    assert_eq!(risk_percentage(0.123456), Decimal::from_str("12.35")?);
    assert_eq!(risk_percentage(0.750001), Decimal::from_str("75")?);
    assert_eq!(risk_percentage(0.02675), Decimal::from_str("2.67")?);
    assert_eq!(risk_percentage(0.12345), Decimal::from_str("12.35")?);
    assert_eq!(risk_percentage(0.74995), Decimal::from_str("75")?);

    let service = create_service(vec![("edge", vec![create_record("edge", Some("PAYMENT"), "75.0001")?])]);

    assert_eq!(service.get_reputation("edge")?.risk_level, RiskLevel::Medium);

    Ok(())
}

#[tokio::test]
async fn test_engine_writes_rows_for_known_users_only() -> Result<()> {
    let service = create_service(vec![
        ("utsav16", vec![create_record("utsav16", Some("PAYMENT"), "3")?]),
        ("himansu367", vec![
            create_record("himansu367", Some("PAYMENT"), "1")?,
            create_record("himansu367", Some("TRANSFER"), "80")?,
        ]),
    ]);

    let input = Cursor::new("USER_ID|utsav16\n\nhimansu367\nUSER_ID|nobody\nACCOUNT|utsav16\n");
    let mut output = Vec::new();

    let engine = AsyncEngine::new(Arc::new(service));
    let summary = engine.run(input, &mut output).await?;

    assert_eq!(summary, RunSummary { resolved: 2, unknown: 1, invalid: 1 });

    let stdout = String::from_utf8(output)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("user_id,risk_percentage,risk_level,transactions_analyzed,message"));
    assert_eq!(lines.next(), Some("utsav16,3.0,LOW,1,User history appears clean. No high-risk transactions found."));

    let line = lines.next().ok_or_else(|| anyhow!("himansu367 row missing"))?;

    assert!(line.starts_with("himansu367,80.0,HIGH,2,"));
    assert_eq!(lines.next(), None);

    Ok(())
}

#[tokio::test]
async fn test_engine_writes_header_for_empty_input() -> Result<()> {
    let engine = AsyncEngine::new(Arc::new(create_service(Vec::new())));
    let mut output = Vec::new();

    let summary = engine.run(Cursor::new(""), &mut output).await?;

    assert_eq!(summary, RunSummary::default());
    assert_eq!(String::from_utf8(output)?, "user_id,risk_percentage,risk_level,transactions_analyzed,message\n");

    Ok(())
}
