use chrono::Utc;

use super::*;

fn salesman(name: &str, outlet: &str, approved: bool) -> Salesman {
    Salesman {
        id: 0,
        name: name.to_string(),
        mobile: "9000000000".to_string(),
        outlet: outlet.to_string(),
        vertical: "electronics".to_string(),
        is_approved: approved,
        wallet_balance: 0.0,
    }
}

fn accrual(salesman_id: i64, barcode: &str, trait_name: &str, amount: f64) -> Accrual {
    Accrual {
        salesman_id,
        barcode: barcode.to_string(),
        trait_name: trait_name.to_string(),
        amount,
        is_visible: true,
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn apply_accruals_credits_wallet_once() {
    let ledger = MockLedger::new();
    let id = ledger.add_salesman(salesman("Asha", "Central", true)).await;

    let batch = vec![accrual(id, "B1", "T1", 5.0)];
    let first = ledger.apply_accruals(&batch).await.unwrap();
    assert_eq!(first.created, 1);
    assert_eq!(first.skipped_duplicates, 0);
    assert_eq!(ledger.wallet_balance(id).await, 5.0);

    let second = ledger.apply_accruals(&batch).await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped_duplicates, 1);
    assert_eq!(ledger.wallet_balance(id).await, 5.0);
    assert_eq!(ledger.incentive_count().await, 1);
}

#[tokio::test]
async fn duplicate_key_within_one_batch_is_skipped() {
    let ledger = MockLedger::new();
    let id = ledger.add_salesman(salesman("Asha", "Central", true)).await;

    let batch = vec![accrual(id, "B1", "T1", 5.0), accrual(id, "B1", "T1", 5.0)];
    let report = ledger.apply_accruals(&batch).await.unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.skipped_duplicates, 1);
}

#[tokio::test]
async fn injected_failure_writes_nothing() {
    let ledger = MockLedger::new();
    let id = ledger.add_salesman(salesman("Asha", "Central", true)).await;
    ledger.set_fail_on_apply(true).await;

    let err = ledger
        .apply_accruals(&[accrual(id, "B1", "T1", 5.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Backend(_)));
    assert_eq!(ledger.incentive_count().await, 0);
    assert_eq!(ledger.wallet_balance(id).await, 0.0);
}

#[tokio::test]
async fn set_visibility_on_missing_id_is_not_found() {
    let ledger = MockLedger::new();
    let err = ledger.set_visibility(42, false).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn remove_rejects_unapproved_salesman() {
    let ledger = MockLedger::new();
    let id = ledger.add_salesman(salesman("Ravi", "North", false)).await;

    assert!(ledger.remove(id).await.unwrap_err().is_not_found());

    let approved = ledger.add_salesman(salesman("Asha", "Central", true)).await;
    ledger.remove(approved).await.unwrap();
}
