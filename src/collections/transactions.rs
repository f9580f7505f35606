// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::StoreError;
use crate::models::{Bill, BillDraft, Spending, SpendingDraft, Transaction, TransactionKind};
use crate::store::{Collection, Store};
use crate::utils::{display_date, next_id};

const COLL: Collection = Collection::Transactions;

/// Every id in the collection, nested spendings included.
fn all_ids(txs: &[Transaction]) -> impl Iterator<Item = i64> + '_ {
    txs.iter().flat_map(|t| {
        let nested: &[Spending] = match t {
            Transaction::Bill(b) => &b.spendings,
            Transaction::Spending(_) => &[],
        };
        std::iter::once(t.id()).chain(nested.iter().map(|s| s.id))
    })
}

fn find_bill_mut(txs: &mut [Transaction], id: i64) -> Option<&mut Bill> {
    txs.iter_mut()
        .filter_map(Transaction::as_bill_mut)
        .find(|b| b.id == id)
}

fn remove_spending(spendings: &mut Vec<Spending>, id: i64) -> bool {
    let before = spendings.len();
    spendings.retain(|s| s.id != id);
    spendings.len() != before
}

fn remove_top_level(txs: &mut Vec<Transaction>, id: i64, kind: TransactionKind) -> bool {
    let before = txs.len();
    txs.retain(|t| !(t.id() == id && t.kind() == kind));
    txs.len() != before
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(TransactionKind),
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: KindFilter,
    /// Case-insensitive substring of the description.
    pub search: Option<String>,
    pub limit: Option<usize>,
}

/// Flattened view of one bill or spending, nested spendings carrying the id
/// of their bill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub description: String,
    pub amount: Decimal,
    pub quantity: Decimal,
    pub rate: Decimal,
    /// Tax percent for bills, discount percent for spendings.
    pub adjustment: Decimal,
    pub total: Decimal,
    pub date: String,
}

impl TransactionRow {
    fn from_bill(b: &Bill) -> Self {
        TransactionRow {
            id: b.id,
            kind: TransactionKind::Bill,
            parent_id: None,
            description: b.description.clone(),
            amount: b.amount,
            quantity: b.quantity,
            rate: b.rate,
            adjustment: b.tax,
            total: b.total,
            date: b.date.clone(),
        }
    }

    fn from_spending(s: &Spending, parent_id: Option<i64>) -> Self {
        TransactionRow {
            id: s.id,
            kind: TransactionKind::Spending,
            parent_id: parent_id.or(s.parent_id),
            description: s.description.clone(),
            amount: s.amount,
            quantity: s.quantity,
            rate: s.rate,
            adjustment: s.discount,
            total: s.total,
            date: s.date.clone(),
        }
    }
}

pub fn flatten(txs: &[Transaction]) -> Vec<TransactionRow> {
    let mut rows = Vec::new();
    for t in txs {
        match t {
            Transaction::Bill(b) => {
                rows.push(TransactionRow::from_bill(b));
                rows.extend(
                    b.spendings
                        .iter()
                        .map(|s| TransactionRow::from_spending(s, Some(b.id))),
                );
            }
            Transaction::Spending(s) => rows.push(TransactionRow::from_spending(s, None)),
        }
    }
    rows
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub bill_count: usize,
    pub bills_amount: Decimal,
    pub spending_count: usize,
    pub spendings_amount: Decimal,
    pub net: Decimal,
}

impl Store {
    pub fn load_transactions(&self) -> Vec<Transaction> {
        self.load_or_empty(COLL)
    }

    /// Replaces the whole collection with the caller's list.
    pub fn save_transactions(&self, txs: &[Transaction]) -> Result<(), StoreError> {
        let _guard = self.lock(COLL);
        self.save(COLL, txs)
    }

    pub fn add_bill(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        draft.validate()?;
        let _guard = self.lock(COLL);
        let mut txs: Vec<Transaction> = self.load_or_empty(COLL);
        let id = draft.id.unwrap_or_else(|| next_id(all_ids(&txs)));
        let bill = Bill::from_draft(id, draft, display_date());
        txs.push(Transaction::Bill(bill.clone()));
        self.save(COLL, &txs)?;
        info!(id, total = %bill.total, "bill added");
        Ok(bill)
    }

    /// Top-level spending with no bill behind it.
    pub fn add_standalone_spending(&self, draft: SpendingDraft) -> Result<Spending, StoreError> {
        draft.validate()?;
        let _guard = self.lock(COLL);
        let mut txs: Vec<Transaction> = self.load_or_empty(COLL);
        let id = draft.id.unwrap_or_else(|| next_id(all_ids(&txs)));
        let spending = Spending::from_draft(id, draft, display_date());
        txs.push(Transaction::Spending(spending.clone()));
        self.save(COLL, &txs)?;
        info!(id, total = %spending.total, "standalone spending added");
        Ok(spending)
    }

    /// Overwrites the bill's fields. Nested spendings are kept unless the
    /// draft carries its own list.
    pub fn update_bill(&self, id: i64, draft: BillDraft) -> Result<Bill, StoreError> {
        draft.validate()?;
        let _guard = self.lock(COLL);
        let mut txs: Vec<Transaction> = self.load_or_empty(COLL);
        let bill = find_bill_mut(&mut txs, id).ok_or(StoreError::not_found("bill", id))?;
        bill.apply(draft);
        let updated = bill.clone();
        self.save(COLL, &txs)?;
        info!(id, spendings = updated.spendings.len(), "bill updated");
        Ok(updated)
    }

    pub fn add_spending_to_bill(
        &self,
        bill_id: i64,
        draft: SpendingDraft,
    ) -> Result<Spending, StoreError> {
        draft.validate()?;
        let _guard = self.lock(COLL);
        let mut txs: Vec<Transaction> = self.load_or_empty(COLL);
        let id = draft.id.unwrap_or_else(|| next_id(all_ids(&txs)));
        let bill = find_bill_mut(&mut txs, bill_id).ok_or(StoreError::not_found("bill", bill_id))?;
        let spending = Spending::from_draft(id, draft, display_date());
        bill.spendings.push(spending.clone());
        self.save(COLL, &txs)?;
        info!(id, bill_id, "spending added to bill");
        Ok(spending)
    }

    /// Bills go with all their nested spendings. A spending is removed from
    /// `parent_id`'s bill when given; otherwise from the first bill whose
    /// list actually shrinks, and failing that from the top level.
    pub fn delete_transaction(
        &self,
        id: i64,
        kind: TransactionKind,
        parent_id: Option<i64>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock(COLL);
        let mut txs: Vec<Transaction> = self.load_or_empty(COLL);
        let removed = match (kind, parent_id) {
            (TransactionKind::Bill, _) => remove_top_level(&mut txs, id, TransactionKind::Bill),
            (TransactionKind::Spending, Some(pid)) => find_bill_mut(&mut txs, pid)
                .map(|b| remove_spending(&mut b.spendings, id))
                .unwrap_or(false),
            (TransactionKind::Spending, None) => {
                let nested = txs
                    .iter_mut()
                    .filter_map(Transaction::as_bill_mut)
                    .any(|b| remove_spending(&mut b.spendings, id));
                nested || remove_top_level(&mut txs, id, TransactionKind::Spending)
            }
        };
        if !removed {
            return Err(StoreError::not_found(kind.as_str(), id));
        }
        self.save(COLL, &txs)?;
        info!(id, kind = kind.as_str(), ?parent_id, "transaction deleted");
        Ok(())
    }

    /// Newest first, nested spendings listed as their own rows.
    pub fn query_transactions(&self, filter: &TransactionFilter) -> Vec<TransactionRow> {
        let txs = self.load_transactions();
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let mut rows: Vec<TransactionRow> = flatten(&txs)
            .into_iter()
            .filter(|r| match filter.kind {
                KindFilter::All => true,
                KindFilter::Only(k) => r.kind == k,
            })
            .filter(|r| match &needle {
                Some(n) => r.description.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        if let Some(limit) = filter.limit {
            rows.truncate(limit);
        }
        rows
    }

    /// Totals across bills and every spending, nested or standalone.
    /// Sums clamp at the decimal range instead of overflowing.
    pub fn summary(&self) -> Summary {
        let mut s = Summary::default();
        for row in flatten(&self.load_transactions()) {
            match row.kind {
                TransactionKind::Bill => {
                    s.bill_count += 1;
                    s.bills_amount = s.bills_amount.saturating_add(row.total);
                }
                TransactionKind::Spending => {
                    s.spending_count += 1;
                    s.spendings_amount = s.spendings_amount.saturating_add(row.total);
                }
            }
        }
        s.net = s.bills_amount.saturating_sub(s.spendings_amount);
        s
    }
}
