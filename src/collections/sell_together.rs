// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::forms::ValidationError;
use crate::models::{Farmer, SellTogetherDraft, SellTogetherEntry};
use crate::reconcile::{hide_members, reconcile_visibility};
use crate::store::{Collection, Store};
use crate::utils::{next_id, now_millis};

const COLL: Collection = Collection::SellTogether;

/// An entry with its member farmers resolved. Members deleted since the
/// sale was recorded are listed in `missing`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellTogetherDetail {
    pub entry: SellTogetherEntry,
    pub farmers: Vec<Farmer>,
    pub missing: Vec<i64>,
}

impl Store {
    pub fn load_sell_together(&self) -> Vec<SellTogetherEntry> {
        self.load_or_empty(COLL)
    }

    /// Persists the entry, then hides its member farmers.
    pub fn add_sell_together(
        &self,
        draft: SellTogetherDraft,
    ) -> Result<SellTogetherEntry, StoreError> {
        draft.validate()?;
        let _entries_guard = self.lock(COLL);
        let _farmers_guard = self.lock(Collection::Farmers);

        let mut entries: Vec<SellTogetherEntry> = self.load_or_empty(COLL);
        let mut farmers: Vec<Farmer> = self.load_or_empty(Collection::Farmers);
        let id = draft
            .id
            .unwrap_or_else(|| next_id(entries.iter().map(|e| e.id)));
        let entry = SellTogetherEntry::from_draft(id, draft, &farmers, now_millis());
        if entry.farmer_ids.is_empty() {
            return Err(ValidationError::NoFarmers.into());
        }
        entries.push(entry.clone());
        self.save(COLL, &entries)?;

        let changed = hide_members(&mut farmers, &entry.farmer_ids);
        self.save(Collection::Farmers, &farmers)?;
        info!(
            id,
            farmers = entry.farmer_ids.len(),
            hidden = changed,
            profit_or_loss = %entry.profit_or_loss,
            "joint sale added"
        );
        Ok(entry)
    }

    /// Removes the entry, then recomputes every farmer's flag from the
    /// entries that remain.
    pub fn delete_sell_together(&self, id: i64) -> Result<(), StoreError> {
        let _entries_guard = self.lock(COLL);
        let _farmers_guard = self.lock(Collection::Farmers);

        let mut entries: Vec<SellTogetherEntry> = self.load_or_empty(COLL);
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(StoreError::not_found("sell-together entry", id));
        }
        self.save(COLL, &entries)?;

        let mut farmers: Vec<Farmer> = self.load_or_empty(Collection::Farmers);
        let changed = reconcile_visibility(&mut farmers, &entries);
        self.save(Collection::Farmers, &farmers)?;
        info!(id, unhidden_or_changed = changed, "joint sale deleted");
        Ok(())
    }

    /// Full rescan outside of a delete, e.g. after hand-editing the files.
    pub fn reconcile_farmers(&self) -> Result<usize, StoreError> {
        let _entries_guard = self.lock(COLL);
        let _farmers_guard = self.lock(Collection::Farmers);
        let entries: Vec<SellTogetherEntry> = self.load_or_empty(COLL);
        let mut farmers: Vec<Farmer> = self.load_or_empty(Collection::Farmers);
        let changed = reconcile_visibility(&mut farmers, &entries);
        if changed > 0 {
            self.save(Collection::Farmers, &farmers)?;
        }
        debug!(changed, "farmer visibility reconciled");
        Ok(changed)
    }

    pub fn sell_together_detail(&self, id: i64) -> Result<SellTogetherDetail, StoreError> {
        let entry = self
            .load_sell_together()
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(StoreError::not_found("sell-together entry", id))?;
        let all = self.load_farmers();
        let mut farmers = Vec::with_capacity(entry.farmer_ids.len());
        let mut missing = Vec::new();
        for fid in &entry.farmer_ids {
            match all.iter().find(|f| f.id == *fid) {
                Some(f) => farmers.push(f.clone()),
                None => missing.push(*fid),
            }
        }
        Ok(SellTogetherDetail {
            entry,
            farmers,
            missing,
        })
    }
}
