// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Request/response boundary for an out-of-process front end. Every call
//! runs to completion before its response is produced, and failures come
//! back as sentinels (empty list, `false`, `null`) after being logged.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info_span, warn};

use crate::error::StoreError;
use crate::models::{
    Bill, BillDraft, Farmer, FarmerDraft, SellTogetherDraft, SellTogetherEntry, SpendingDraft,
    Transaction, TransactionKind,
};
use crate::store::Store;

/// Wire form: `{"channel": "add-bill", "args": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "channel", content = "args", rename_all = "kebab-case")]
pub enum Request {
    LoadTransactions,
    SaveTransactions(Vec<Transaction>),
    AddBill(BillDraft),
    UpdateBill(BillDraft),
    #[serde(rename_all = "camelCase")]
    AddSpendingToBill {
        bill_id: i64,
        spending: SpendingDraft,
    },
    #[serde(rename_all = "camelCase")]
    DeleteTransaction {
        id: i64,
        #[serde(rename = "type")]
        kind: TransactionKind,
        #[serde(default)]
        parent_id: Option<i64>,
    },
    LoadFarmers,
    AddFarmer(FarmerDraft),
    UpdateFarmer(FarmerDraft),
    DeleteFarmer(i64),
    #[serde(rename = "load-selltogether")]
    LoadSellTogether,
    #[serde(rename = "add-selltogether")]
    AddSellTogether(SellTogetherDraft),
    #[serde(rename = "delete-selltogether")]
    DeleteSellTogether(i64),
    ClearAllData,
    GetDataDir,
}

impl Request {
    pub fn channel(&self) -> &'static str {
        match self {
            Request::LoadTransactions => "load-transactions",
            Request::SaveTransactions(_) => "save-transactions",
            Request::AddBill(_) => "add-bill",
            Request::UpdateBill(_) => "update-bill",
            Request::AddSpendingToBill { .. } => "add-spending-to-bill",
            Request::DeleteTransaction { .. } => "delete-transaction",
            Request::LoadFarmers => "load-farmers",
            Request::AddFarmer(_) => "add-farmer",
            Request::UpdateFarmer(_) => "update-farmer",
            Request::DeleteFarmer(_) => "delete-farmer",
            Request::LoadSellTogether => "load-selltogether",
            Request::AddSellTogether(_) => "add-selltogether",
            Request::DeleteSellTogether(_) => "delete-selltogether",
            Request::ClearAllData => "clear-all-data",
            Request::GetDataDir => "get-data-dir",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Transactions(Vec<Transaction>),
    Farmers(Vec<Farmer>),
    SellTogether(Vec<SellTogetherEntry>),
    Bill(Option<Bill>),
    Farmer(Option<Farmer>),
    Entry(Option<SellTogetherEntry>),
    Done(bool),
    DataDir(PathBuf),
}

fn settle<T>(channel: &'static str, res: Result<T, StoreError>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(err @ (StoreError::NotFound { .. } | StoreError::Validation(_))) => {
            warn!(channel, error = %err, "request rejected");
            None
        }
        Err(err) => {
            error!(channel, error = %err, "request failed");
            None
        }
    }
}

fn done<T>(channel: &'static str, res: Result<T, StoreError>) -> Response {
    Response::Done(settle(channel, res).is_some())
}

pub fn dispatch(store: &Store, req: Request) -> Response {
    let channel = req.channel();
    let _span = info_span!("request", channel).entered();
    match req {
        Request::LoadTransactions => Response::Transactions(store.load_transactions()),
        Request::SaveTransactions(txs) => done(channel, store.save_transactions(&txs)),
        Request::AddBill(draft) => Response::Bill(settle(channel, store.add_bill(draft))),
        Request::UpdateBill(draft) => match draft.id {
            Some(id) => done(channel, store.update_bill(id, draft)),
            None => {
                warn!(channel, "bill id missing");
                Response::Done(false)
            }
        },
        Request::AddSpendingToBill { bill_id, spending } => {
            done(channel, store.add_spending_to_bill(bill_id, spending))
        }
        Request::DeleteTransaction {
            id,
            kind,
            parent_id,
        } => done(channel, store.delete_transaction(id, kind, parent_id)),
        Request::LoadFarmers => Response::Farmers(store.load_farmers()),
        Request::AddFarmer(draft) => Response::Farmer(settle(channel, store.add_farmer(draft))),
        Request::UpdateFarmer(draft) => match draft.id {
            Some(id) => done(channel, store.update_farmer(id, draft)),
            None => {
                warn!(channel, "farmer id missing");
                Response::Done(false)
            }
        },
        Request::DeleteFarmer(id) => done(channel, store.delete_farmer(id)),
        Request::LoadSellTogether => Response::SellTogether(store.load_sell_together()),
        Request::AddSellTogether(draft) => {
            Response::Entry(settle(channel, store.add_sell_together(draft)))
        }
        Request::DeleteSellTogether(id) => done(channel, store.delete_sell_together(id)),
        Request::ClearAllData => done(channel, store.clear_all()),
        Request::GetDataDir => Response::DataDir(store.dir().to_path_buf()),
    }
}
