use super::{DataLoadError, IndexedStore, Storage};
use anyhow::{anyhow, Result};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "user_id,step,type,amount,sender_old_bal,sender_new_bal,receiver_old_bal,receiver_new_bal,sender,receiver";

#[test]
fn test_store_groups_rows_by_user_in_source_order() -> Result<()> {
    let csv_content = format!("{HEADER}\n\
        utsav16,1,PAYMENT,10.00,100.00,90.00,0.00,10.00,C1,M1\n\
        himansu367,2,TRANSFER,500.00,500.00,0.00,0.00,500.00,C2,C3\n\
        utsav16,3,CASH_IN,20.00,90.00,110.00,50.00,30.00,C1,M2\n");

    let store = IndexedStore::from_reader(csv_content.as_bytes())?;

    assert_eq!(store.user_count(), 2);
    assert_eq!(store.transaction_count(), 3);

    let history = store.load("utsav16").ok_or_else(|| anyhow!("utsav16 missing from store"))?;

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].transaction_type.as_deref(), Some("PAYMENT"));
    assert_eq!(history[1].transaction_type.as_deref(), Some("CASH_IN"));
    assert!(store.load("nobody").is_none());

    Ok(())
}

#[test]
fn test_store_accepts_paysim_column_names() -> Result<()> {
    let csv_content = "step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud\n\
        1,TRANSFER,181.0,C1305486145,181.0,0.0,C553264065,0.0,0.0,1\n";

    let store = IndexedStore::from_reader(csv_content.as_bytes())?;
    let history = store.load("C1305486145").ok_or_else(|| anyhow!("PaySim sender missing from store"))?;

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].sender_old_balance.map(|value| value.to_string()), Some("181.0".to_string()));

    Ok(())
}

#[test]
fn test_store_rejects_both_spellings_of_the_same_column() {
    let csv_content = "user_id,nameOrig,type,amount,sender_old_bal,sender_new_bal,receiver_old_bal,receiver_new_bal\n\
        utsav16,C1305486145,PAYMENT,10.00,100.00,90.00,0.00,10.00\n";

    let result = IndexedStore::from_reader(csv_content.as_bytes());

    assert!(matches!(result, Err(DataLoadError::Csv(_))));
}

#[test]
fn test_store_keeps_records_with_blank_cells() -> Result<()> {
    let csv_content = format!("{HEADER}\naarnov123,1,,10.00,,90.00,0.00,10.00,C1,M1\n");

    let store = IndexedStore::from_reader(csv_content.as_bytes())?;
    let history = store.load("aarnov123").ok_or_else(|| anyhow!("aarnov123 missing from store"))?;

    assert!(history[0].transaction_type.is_none());
    assert!(history[0].sender_old_balance.is_none());

    Ok(())
}

#[test]
fn test_store_rejects_missing_required_column() {
    let csv_content = "user_id,type,amount,sender_old_bal,sender_new_bal,receiver_old_bal\nutsav16,PAYMENT,1,1,0,0\n";

    let result = IndexedStore::from_reader(csv_content.as_bytes());

    assert!(matches!(result, Err(DataLoadError::MissingColumn { column: "receiver_new_bal" })));
}

#[test]
fn test_store_rejects_unparseable_rows_without_partial_result() {
    let csv_content = format!("{HEADER}\n\
        utsav16,1,PAYMENT,10.00,100.00,90.00,0.00,10.00,C1,M1\n\
        utsav16,2,PAYMENT,ten,100.00,90.00,0.00,10.00,C1,M1\n");

    let result = IndexedStore::from_reader(csv_content.as_bytes());

    assert!(matches!(result, Err(DataLoadError::Csv(_))));
}

#[test]
fn test_store_loads_from_file_and_reports_missing_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    writeln!(file, "utsav16,1,PAYMENT,1e2,100.00,0.00,0.00,100.00,C1,M1")?;

    let store = IndexedStore::from_path(file.path())?;

    assert_eq!(store.transaction_count(), 1);
    assert!(matches!(IndexedStore::from_path("missing.csv"), Err(DataLoadError::Open { .. })));

    Ok(())
}

#[test]
fn test_store_collects_histories_including_empty_ones() {
    let store: IndexedStore = vec![("ghost".to_string(), Vec::new())].into_iter().collect();

    assert_eq!(store.user_count(), 1);
    assert_eq!(store.transaction_count(), 0);
    assert_eq!(store.load("ghost").map(<[_]>::len), Some(0));
}
