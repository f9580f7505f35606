// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use hisaab::collections::{KindFilter, TransactionFilter};
use hisaab::forms::ValidationError;
use hisaab::models::{BillDraft, Spending, SpendingDraft, Transaction, TransactionKind};
use hisaab::{Store, StoreError};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tempfile::tempdir;

fn d(v: i64) -> Decimal {
    Decimal::from(v)
}

fn bill(id: Option<i64>, description: &str, amount: i64, quantity: i64, tax: i64) -> BillDraft {
    BillDraft {
        id,
        description: description.into(),
        amount: d(amount),
        quantity: d(quantity),
        rate: d(amount),
        tax: d(tax),
        spendings: None,
    }
}

fn spending(id: Option<i64>, description: &str, amount: i64, quantity: i64, discount: i64) -> SpendingDraft {
    SpendingDraft {
        id,
        description: description.into(),
        amount: d(amount),
        quantity: d(quantity),
        rate: d(amount),
        discount: d(discount),
    }
}

fn nested(txs: &[Transaction], bill_id: i64) -> Vec<Spending> {
    txs.iter()
        .find_map(|t| match t {
            Transaction::Bill(b) if b.id == bill_id => Some(b.spendings.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

#[test]
fn add_bill_derives_total_and_starts_without_spendings() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let b = store.add_bill(bill(None, "Web Design Project", 500, 2, 10)).unwrap();
    assert_eq!(b.total.to_string(), "1100.00");
    assert!(b.spendings.is_empty());
    assert!(!b.date.is_empty());

    let txs = store.load_transactions();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id(), b.id);
    assert_eq!(txs[0].kind(), TransactionKind::Bill);
}

#[test]
fn add_bill_rejects_blank_description() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let err = store.add_bill(bill(None, "   ", 10, 1, 0)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::Missing(_))
    ));
    assert!(!dir.path().join("transactions.json").exists());
}

#[test]
fn rapid_inserts_get_unique_ids() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let ids: Vec<i64> = (0..20)
        .map(|i| store.add_bill(bill(None, &format!("b{}", i), 1, 1, 0)).unwrap().id)
        .collect();
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn update_bill_keeps_nested_spendings_unless_given() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Seeds", 100, 1, 0)).unwrap();
    store
        .add_spending_to_bill(1, spending(Some(5), "Transport", 20, 1, 0))
        .unwrap();
    let date = nested(&store.load_transactions(), 1)[0].date.clone();

    let updated = store.update_bill(1, bill(None, "Seeds (hybrid)", 200, 2, 5)).unwrap();
    assert_eq!(updated.total.to_string(), "420.00");
    assert_eq!(updated.spendings.len(), 1);
    assert_eq!(updated.spendings[0].date, date);

    let mut replace = bill(None, "Seeds (hybrid)", 200, 2, 5);
    replace.spendings = Some(Vec::new());
    let updated = store.update_bill(1, replace).unwrap();
    assert!(updated.spendings.is_empty());
    assert!(nested(&store.load_transactions(), 1).is_empty());
}

#[test]
fn update_unknown_bill_is_not_found_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Seeds", 100, 1, 0)).unwrap();
    let before = std::fs::read(dir.path().join("transactions.json")).unwrap();

    let err = store.update_bill(99, bill(None, "Ghost", 1, 1, 0)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(std::fs::read(dir.path().join("transactions.json")).unwrap(), before);
}

#[test]
fn add_spending_to_unknown_bill_is_not_found() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let err = store
        .add_spending_to_bill(7, spending(None, "Fuel", 10, 1, 0))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: "bill", id: 7 }));
}

#[test]
fn spending_total_applies_discount() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let s = store
        .add_standalone_spending(spending(None, "Office Supplies", 50, 2, 5))
        .unwrap();
    assert_eq!(s.total.to_string(), "95.00");
    assert!(s.parent_id.is_none());
}

#[test]
fn nested_spending_is_found_without_parent_id() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Seeds", 100, 1, 0)).unwrap();
    store
        .add_spending_to_bill(1, spending(Some(5), "Transport", 20, 1, 0))
        .unwrap();

    store
        .delete_transaction(5, TransactionKind::Spending, None)
        .unwrap();
    let txs = store.load_transactions();
    assert_eq!(txs.len(), 1);
    assert!(nested(&txs, 1).is_empty());

    let err = store
        .delete_transaction(5, TransactionKind::Spending, None)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn parent_id_limits_the_search_to_that_bill() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Seeds", 100, 1, 0)).unwrap();
    store.add_bill(bill(Some(2), "Fertiliser", 80, 1, 0)).unwrap();
    store
        .add_spending_to_bill(1, spending(Some(5), "Transport", 20, 1, 0))
        .unwrap();

    let err = store
        .delete_transaction(5, TransactionKind::Spending, Some(2))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(nested(&store.load_transactions(), 1).len(), 1);

    store
        .delete_transaction(5, TransactionKind::Spending, Some(1))
        .unwrap();
    assert!(nested(&store.load_transactions(), 1).is_empty());
}

#[test]
fn standalone_spending_is_deleted_from_top_level() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Seeds", 100, 1, 0)).unwrap();
    store
        .add_standalone_spending(spending(Some(9), "Tea", 10, 1, 0))
        .unwrap();

    store
        .delete_transaction(9, TransactionKind::Spending, None)
        .unwrap();
    let txs = store.load_transactions();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id(), 1);
}

#[test]
fn deleting_a_bill_takes_its_spendings_along() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Seeds", 100, 1, 0)).unwrap();
    store
        .add_spending_to_bill(1, spending(Some(5), "Transport", 20, 1, 0))
        .unwrap();

    // A bill id does not match a spending delete.
    assert!(
        store
            .delete_transaction(1, TransactionKind::Spending, None)
            .unwrap_err()
            .is_not_found()
    );

    store.delete_transaction(1, TransactionKind::Bill, None).unwrap();
    assert!(store.load_transactions().is_empty());
    assert!(
        store
            .delete_transaction(5, TransactionKind::Spending, None)
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn query_filters_and_orders_newest_first() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Cotton seed", 100, 1, 0)).unwrap();
    store
        .add_spending_to_bill(1, spending(Some(2), "Seed transport", 10, 1, 0))
        .unwrap();
    store
        .add_standalone_spending(spending(Some(3), "Tea", 5, 1, 0))
        .unwrap();

    let all = store.query_transactions(&TransactionFilter::default());
    let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(all[1].parent_id, Some(1));

    let spendings = store.query_transactions(&TransactionFilter {
        kind: KindFilter::Only(TransactionKind::Spending),
        ..Default::default()
    });
    assert_eq!(spendings.len(), 2);

    let seed = store.query_transactions(&TransactionFilter {
        search: Some("SEED".into()),
        limit: Some(1),
        ..Default::default()
    });
    assert_eq!(seed.len(), 1);
    assert_eq!(seed[0].id, 2);
}

#[test]
fn summary_counts_nested_and_standalone_spendings() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_bill(bill(Some(1), "Web Design Project", 500, 2, 10)).unwrap();
    store
        .add_spending_to_bill(1, spending(Some(2), "Hosting", 100, 1, 0))
        .unwrap();
    store
        .add_standalone_spending(spending(Some(3), "Office Supplies", 50, 2, 5))
        .unwrap();

    let s = store.summary();
    assert_eq!(s.bill_count, 1);
    assert_eq!(s.spending_count, 2);
    assert_eq!(s.bills_amount, d(1100));
    assert_eq!(s.spendings_amount, d(195));
    assert_eq!(s.net, d(905));
}

#[test]
fn summary_clamps_instead_of_overflowing() {
    let dir = tempdir().unwrap();
    let huge = |id: i64| {
        serde_json::json!({
            "id": id,
            "type": "bill",
            "description": "hand edited",
            "amount": 1,
            "quantity": 1,
            "rate": 1,
            "tax": 0,
            "total": "50000000000000000000000000000",
            "date": "11/05/2024",
            "spendings": []
        })
    };
    std::fs::write(
        dir.path().join("transactions.json"),
        serde_json::to_string_pretty(&[huge(1), huge(2)]).unwrap(),
    )
    .unwrap();
    let store = Store::open(dir.path()).unwrap();

    let s = store.summary();
    assert_eq!(s.bill_count, 2);
    assert_eq!(s.bills_amount, Decimal::MAX);
    assert_eq!(s.net, Decimal::MAX);
}

#[test]
fn add_bill_rejects_amounts_past_the_cap() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let mut draft = bill(None, "Tractor", 1, 1, 0);
    draft.amount = "100000000000".parse().unwrap();

    let err = store.add_bill(draft).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::TooLarge("amount"))
    ));
    assert!(store.load_transactions().is_empty());
}
