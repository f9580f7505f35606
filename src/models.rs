// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::calc;
use crate::wire::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Bill,
    Spending,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Bill => "bill",
            TransactionKind::Spending => "spending",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bill" => Ok(TransactionKind::Bill),
            "spending" => Ok(TransactionKind::Spending),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// One document of `transactions.json`, tagged by its `type` field. Bills
/// and spendings write their own tag, right after `id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transaction {
    Bill(Bill),
    Spending(Spending),
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Transaction::Bill(b) => b.serialize(s),
            Transaction::Spending(sp) => sp.serialize(s),
        }
    }
}

impl Transaction {
    pub fn id(&self) -> i64 {
        match self {
            Transaction::Bill(b) => b.id,
            Transaction::Spending(s) => s.id,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Bill(_) => TransactionKind::Bill,
            Transaction::Spending(_) => TransactionKind::Spending,
        }
    }

    pub fn as_bill_mut(&mut self) -> Option<&mut Bill> {
        match self {
            Transaction::Bill(b) => Some(b),
            Transaction::Spending(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    pub description: String,
    #[serde(with = "crate::wire::number")]
    pub amount: Decimal,
    #[serde(with = "crate::wire::number")]
    pub quantity: Decimal,
    #[serde(with = "crate::wire::number")]
    pub rate: Decimal,
    #[serde(with = "crate::wire::number")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub date: String,
    #[serde(default)]
    pub spendings: Vec<Spending>,
}

impl Bill {
    pub fn from_draft(id: i64, draft: BillDraft, date: String) -> Self {
        let total = calc::bill_total(draft.amount, draft.quantity, draft.tax);
        Bill {
            id,
            description: draft.description.trim().to_string(),
            amount: draft.amount,
            quantity: draft.quantity,
            rate: draft.rate,
            tax: draft.tax,
            total,
            date,
            spendings: draft.spendings.unwrap_or_default(),
        }
    }

    /// Overwrites every input field and recomputes `total`. `date` is kept,
    /// and nested spendings are only replaced when the draft carries them.
    pub fn apply(&mut self, draft: BillDraft) {
        self.description = draft.description.trim().to_string();
        self.amount = draft.amount;
        self.quantity = draft.quantity;
        self.rate = draft.rate;
        self.tax = draft.tax;
        self.total = calc::bill_total(draft.amount, draft.quantity, draft.tax);
        if let Some(spendings) = draft.spendings {
            self.spendings = spendings;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spending {
    pub id: i64,
    pub description: String,
    #[serde(with = "crate::wire::number")]
    pub amount: Decimal,
    #[serde(with = "crate::wire::number")]
    pub quantity: Decimal,
    #[serde(with = "crate::wire::number")]
    pub rate: Decimal,
    #[serde(with = "crate::wire::number")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub date: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

impl Spending {
    pub fn from_draft(id: i64, draft: SpendingDraft, date: String) -> Self {
        let total = calc::spending_total(draft.amount, draft.quantity, draft.discount);
        Spending {
            id,
            description: draft.description.trim().to_string(),
            amount: draft.amount,
            quantity: draft.quantity,
            rate: draft.rate,
            discount: draft.discount,
            total,
            date,
            parent_id: None,
        }
    }
}

impl Serialize for Bill {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("Bill", 10)?;
        st.serialize_field("id", &self.id)?;
        st.serialize_field("type", TransactionKind::Bill.as_str())?;
        st.serialize_field("description", &self.description)?;
        st.serialize_field("amount", &Number(&self.amount))?;
        st.serialize_field("quantity", &Number(&self.quantity))?;
        st.serialize_field("rate", &Number(&self.rate))?;
        st.serialize_field("tax", &Number(&self.tax))?;
        st.serialize_field("total", &self.total.to_string())?;
        st.serialize_field("date", &self.date)?;
        st.serialize_field("spendings", &self.spendings)?;
        st.end()
    }
}

impl Serialize for Spending {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("Spending", 10)?;
        st.serialize_field("id", &self.id)?;
        st.serialize_field("type", TransactionKind::Spending.as_str())?;
        st.serialize_field("description", &self.description)?;
        st.serialize_field("amount", &Number(&self.amount))?;
        st.serialize_field("quantity", &Number(&self.quantity))?;
        st.serialize_field("rate", &Number(&self.rate))?;
        st.serialize_field("discount", &Number(&self.discount))?;
        st.serialize_field("total", &self.total.to_string())?;
        st.serialize_field("date", &self.date)?;
        match self.parent_id {
            Some(pid) => st.serialize_field("parentId", &pid)?,
            None => st.skip_field("parentId")?,
        }
        st.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: i64,
    pub name: String,
    #[serde(with = "crate::wire::number")]
    pub bori: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bharti: Decimal,
    #[serde(with = "crate::wire::number")]
    pub kad: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bhav: Decimal,
    #[serde(with = "crate::wire::number")]
    pub man: Decimal,
    #[serde(with = "crate::wire::number")]
    pub total_hisaab: Decimal,
    #[serde(with = "crate::wire::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "crate::wire::opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Derived from joint-sale membership; never taken from callers.
    /// `None` until a joint sale first touches the farmer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_in_sell_together: Option<bool>,
}

impl Farmer {
    pub fn from_draft(id: i64, draft: FarmerDraft, now: DateTime<Utc>) -> Self {
        let (man, total_hisaab) = calc::farmer_hisaab(draft.bori, draft.bharti, draft.kad, draft.bhav);
        Farmer {
            id,
            name: draft.name.trim().to_string(),
            bori: draft.bori,
            bharti: draft.bharti,
            kad: draft.kad,
            bhav: draft.bhav,
            man,
            total_hisaab,
            created_at: now,
            updated_at: None,
            hidden_in_sell_together: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden_in_sell_together.unwrap_or(false)
    }

    pub fn apply(&mut self, draft: FarmerDraft, now: DateTime<Utc>) {
        let (man, total_hisaab) = calc::farmer_hisaab(draft.bori, draft.bharti, draft.kad, draft.bhav);
        self.name = draft.name.trim().to_string();
        self.bori = draft.bori;
        self.bharti = draft.bharti;
        self.kad = draft.kad;
        self.bhav = draft.bhav;
        self.man = man;
        self.total_hisaab = total_hisaab;
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellTogetherEntry {
    pub id: i64,
    pub farmer_ids: Vec<i64>,
    #[serde(with = "crate::wire::number")]
    pub kul_rakam: Decimal,
    #[serde(with = "crate::wire::number")]
    pub majuri: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bardan: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bhadu: Decimal,
    #[serde(with = "crate::wire::number")]
    pub kharch: Decimal,
    #[serde(with = "crate::wire::number")]
    pub total_kharch: Decimal,
    #[serde(with = "crate::wire::number")]
    pub total_hisaab: Decimal,
    #[serde(with = "crate::wire::number")]
    pub profit_or_loss: Decimal,
    #[serde(with = "crate::wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl SellTogetherEntry {
    /// Builds an entry against the current farmer list. Ids with no farmer
    /// behind them are dropped, duplicates collapse, and `total_hisaab` is a
    /// snapshot of the members' hisaab at this moment.
    pub fn from_draft(
        id: i64,
        draft: SellTogetherDraft,
        farmers: &[Farmer],
        now: DateTime<Utc>,
    ) -> Self {
        let mut farmer_ids: Vec<i64> = Vec::with_capacity(draft.farmer_ids.len());
        for fid in draft.farmer_ids {
            if !farmer_ids.contains(&fid) && farmers.iter().any(|f| f.id == fid) {
                farmer_ids.push(fid);
            }
        }
        let total_hisaab = calc::sum_hisaab(
            farmers
                .iter()
                .filter(|f| farmer_ids.contains(&f.id))
                .map(|f| f.total_hisaab),
        );
        let total_kharch =
            calc::total_kharch([draft.majuri, draft.bardan, draft.bhadu, draft.kharch]);
        let profit_or_loss = calc::profit_or_loss(draft.kul_rakam, total_kharch, total_hisaab);
        SellTogetherEntry {
            id,
            farmer_ids,
            kul_rakam: draft.kul_rakam,
            majuri: draft.majuri,
            bardan: draft.bardan,
            bhadu: draft.bhadu,
            kharch: draft.kharch,
            total_kharch,
            total_hisaab,
            profit_or_loss,
            created_at: now,
        }
    }
}

// Drafts carry caller input only; derived fields and timestamps are filled
// in by the collection operations.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    #[serde(default)]
    pub id: Option<i64>,
    pub description: String,
    #[serde(with = "crate::wire::number")]
    pub amount: Decimal,
    #[serde(with = "crate::wire::number")]
    pub quantity: Decimal,
    #[serde(with = "crate::wire::number")]
    pub rate: Decimal,
    #[serde(with = "crate::wire::number")]
    pub tax: Decimal,
    #[serde(default)]
    pub spendings: Option<Vec<Spending>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingDraft {
    #[serde(default)]
    pub id: Option<i64>,
    pub description: String,
    #[serde(with = "crate::wire::number")]
    pub amount: Decimal,
    #[serde(with = "crate::wire::number")]
    pub quantity: Decimal,
    #[serde(with = "crate::wire::number")]
    pub rate: Decimal,
    #[serde(with = "crate::wire::number")]
    pub discount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerDraft {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(with = "crate::wire::number")]
    pub bori: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bharti: Decimal,
    #[serde(with = "crate::wire::number")]
    pub kad: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bhav: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellTogetherDraft {
    #[serde(default)]
    pub id: Option<i64>,
    pub farmer_ids: Vec<i64>,
    #[serde(with = "crate::wire::number")]
    pub kul_rakam: Decimal,
    #[serde(with = "crate::wire::number")]
    pub majuri: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bardan: Decimal,
    #[serde(with = "crate::wire::number")]
    pub bhadu: Decimal,
    #[serde(with = "crate::wire::number")]
    pub kharch: Decimal,
}
