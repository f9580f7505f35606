// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use hisaab::models::{BillDraft, FarmerDraft, SpendingDraft};
use hisaab::{Collection, Store, StoreError};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::ffi::OsString;
use std::fs;
use tempfile::tempdir;

fn d(v: i64) -> Decimal {
    Decimal::from(v)
}

#[test]
fn absent_collection_loads_empty() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let docs: Vec<Value> = store.load(Collection::Farmers).unwrap();
    assert!(docs.is_empty());
    assert!(store.load_transactions().is_empty());
}

#[test]
fn corrupt_collection_is_reported_then_treated_as_empty() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    fs::write(dir.path().join("farmers.json"), "[{not json").unwrap();

    let err = store.load::<Value>(Collection::Farmers).unwrap_err();
    assert!(matches!(err, StoreError::CorruptData { .. }));
    assert!(store.load_farmers().is_empty());
}

#[test]
fn save_writes_two_space_pretty_json_without_leftovers() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store
        .save(Collection::SellTogether, &[json!({ "id": 1 })])
        .unwrap();

    let body = fs::read_to_string(dir.path().join("sellTogether.json")).unwrap();
    assert_eq!(body, "[\n  {\n    \"id\": 1\n  }\n]");

    let names: Vec<OsString> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![OsString::from("sellTogether.json")]);
}

#[test]
fn save_of_load_is_byte_identical() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let bill = store
        .add_bill(BillDraft {
            id: None,
            description: "Cotton seed".into(),
            amount: "12.5".parse().unwrap(),
            quantity: d(4),
            rate: "12.5".parse().unwrap(),
            tax: d(18),
            spendings: None,
        })
        .unwrap();
    store
        .add_spending_to_bill(
            bill.id,
            SpendingDraft {
                id: None,
                description: "Loading".into(),
                amount: d(30),
                quantity: d(2),
                rate: d(30),
                discount: "2.5".parse().unwrap(),
            },
        )
        .unwrap();
    store
        .add_farmer(FarmerDraft {
            id: None,
            name: "Ramesh".into(),
            bori: d(12),
            bharti: "40.25".parse().unwrap(),
            kad: "0.25".parse().unwrap(),
            bhav: d(310),
        })
        .unwrap();

    for (c, reload) in [
        (Collection::Transactions, true),
        (Collection::Farmers, false),
    ] {
        let path = dir.path().join(c.file_name());
        let before = fs::read(&path).unwrap();
        if reload {
            let txs = store.load_transactions();
            store.save_transactions(&txs).unwrap();
        } else {
            let farmers = store.load_farmers();
            store.save(Collection::Farmers, &farmers).unwrap();
        }
        assert_eq!(fs::read(&path).unwrap(), before, "{} changed", c.name());
    }
}

#[test]
fn clear_removes_file_and_tolerates_absence() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.save(Collection::Farmers, &[json!({ "id": 1 })]).unwrap();
    store.clear(Collection::Farmers).unwrap();
    assert!(!dir.path().join("farmers.json").exists());
    store.clear(Collection::Farmers).unwrap();
    assert!(store.load::<Value>(Collection::Farmers).unwrap().is_empty());
}

#[test]
fn clear_all_removes_every_collection() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    for c in [
        Collection::Transactions,
        Collection::Farmers,
        Collection::SellTogether,
    ] {
        store.save(c, &[json!({ "id": 1 })]).unwrap();
    }
    fs::write(dir.path().join("bills.json"), "[]").unwrap();

    store.clear_all().unwrap();
    for c in Collection::ALL {
        assert!(!dir.path().join(c.file_name()).exists());
    }
}

#[test]
fn open_fails_when_directory_cannot_be_created() {
    let dir = tempdir().unwrap();
    let occupied = dir.path().join("occupied");
    fs::write(&occupied, "not a directory").unwrap();

    let err = Store::open(occupied.join("data")).unwrap_err();
    assert!(matches!(err, StoreError::DataDir { .. }));
}

#[test]
fn files_from_the_desktop_app_survive_a_rewrite() {
    let dir = tempdir().unwrap();
    let transactions = json!([
        {
            "id": 1001,
            "type": "bill",
            "description": "Web Design Project",
            "amount": 500,
            "quantity": 2,
            "rate": 250,
            "tax": 10,
            "total": "1100.00",
            "date": "11/05/2024",
            "spendings": []
        },
        {
            "id": 1002,
            "type": "bill",
            "description": "Logo Design",
            "amount": 300,
            "quantity": 1,
            "rate": 300,
            "tax": 5,
            "total": "315.00",
            "date": "11/06/2024",
            "spendings": []
        },
        {
            "id": 2001,
            "type": "spending",
            "description": "Office Supplies",
            "amount": 50,
            "quantity": 2,
            "rate": 25,
            "discount": 5,
            "total": "95.00",
            "date": "11/05/2024"
        }
    ]);
    let farmers = json!([
        {
            "id": 1730800000000i64,
            "name": "Ramesh",
            "bori": 10,
            "bharti": 45.5,
            "kad": 0.5,
            "bhav": 20,
            "man": 450,
            "totalHisaab": 9000,
            "createdAt": "2024-11-05T10:00:00.000Z"
        },
        {
            "id": 1730800000001i64,
            "name": "Suresh",
            "bori": 3,
            "bharti": 0.335,
            "kad": 0,
            "bhav": 100,
            "man": 1.01,
            "totalHisaab": 100.5,
            "createdAt": "2024-11-05T10:01:30.250Z",
            "hiddenInSellTogether": true
        }
    ]);
    let sales = json!([
        {
            "id": 1730800100000i64,
            "farmerIds": [1730800000001i64],
            "kulRakam": 1000,
            "majuri": 50,
            "bardan": 20,
            "bhadu": 30,
            "kharch": 0,
            "totalKharch": 100,
            "totalHisaab": 100.5,
            "profitOrLoss": 799.5,
            "createdAt": "2024-11-05T10:05:00.123Z"
        }
    ]);
    for (c, doc) in [
        (Collection::Transactions, &transactions),
        (Collection::Farmers, &farmers),
        (Collection::SellTogether, &sales),
    ] {
        fs::write(
            dir.path().join(c.file_name()),
            serde_json::to_string_pretty(doc).unwrap(),
        )
        .unwrap();
    }

    let store = Store::open(dir.path()).unwrap();
    let txs = store.load_transactions();
    assert_eq!(txs.len(), 3);
    store.save_transactions(&txs).unwrap();
    let people = store.load_farmers();
    assert_eq!(people.len(), 2);
    store.save(Collection::Farmers, &people).unwrap();
    let entries = store.load_sell_together();
    assert_eq!(entries.len(), 1);
    store.save(Collection::SellTogether, &entries).unwrap();

    for (c, doc) in [
        (Collection::Transactions, &transactions),
        (Collection::Farmers, &farmers),
        (Collection::SellTogether, &sales),
    ] {
        assert_eq!(
            fs::read_to_string(dir.path().join(c.file_name())).unwrap(),
            serde_json::to_string_pretty(doc).unwrap(),
            "{} changed",
            c.name()
        );
    }
}

#[test]
fn unreadable_file_is_copied_aside_before_it_is_replaced() {
    let dir = tempdir().unwrap();
    let body = r#"[
  {"id": 1, "type": "bill", "description": "keep me", "amount": 1, "quantity": 1,
   "rate": 1, "tax": 0, "total": "1.00", "date": "11/05/2024", "spendings": []},
  {"id": 2, "type": "spending", "description": "typo", "amount": 1e30, "quantity": 1,
   "rate": 1, "discount": 0, "total": "1.00", "date": "11/05/2024"}
]"#;
    fs::write(dir.path().join("transactions.json"), body).unwrap();
    let store = Store::open(dir.path()).unwrap();

    store
        .add_bill(BillDraft {
            id: Some(3),
            description: "new".into(),
            amount: d(1),
            quantity: d(1),
            rate: d(1),
            tax: d(0),
            spendings: None,
        })
        .unwrap();

    assert_eq!(store.load_transactions().len(), 1);
    let backup = store.corrupt_backup_path(Collection::Transactions);
    assert_eq!(backup, dir.path().join("transactions.json.corrupt"));
    assert_eq!(fs::read_to_string(backup).unwrap(), body);
}
