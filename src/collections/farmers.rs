// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::info;

use crate::error::StoreError;
use crate::models::{Farmer, FarmerDraft};
use crate::store::{Collection, Store};
use crate::utils::{next_id, now_millis};

const COLL: Collection = Collection::Farmers;

impl Store {
    pub fn load_farmers(&self) -> Vec<Farmer> {
        self.load_or_empty(COLL)
    }

    pub fn farmer(&self, id: i64) -> Result<Farmer, StoreError> {
        self.load_farmers()
            .into_iter()
            .find(|f| f.id == id)
            .ok_or(StoreError::not_found("farmer", id))
    }

    /// Farmers not tied up in any joint sale.
    pub fn visible_farmers(&self) -> Vec<Farmer> {
        self.load_farmers()
            .into_iter()
            .filter(|f| !f.is_hidden())
            .collect()
    }

    pub fn add_farmer(&self, draft: FarmerDraft) -> Result<Farmer, StoreError> {
        draft.validate()?;
        let _guard = self.lock(COLL);
        let mut farmers: Vec<Farmer> = self.load_or_empty(COLL);
        let id = draft
            .id
            .unwrap_or_else(|| next_id(farmers.iter().map(|f| f.id)));
        let farmer = Farmer::from_draft(id, draft, now_millis());
        farmers.push(farmer.clone());
        self.save(COLL, &farmers)?;
        info!(id, hisaab = %farmer.total_hisaab, "farmer added");
        Ok(farmer)
    }

    /// Recomputes `man` and `total_hisaab`; `created_at` and the joint-sale
    /// flag are left as they are.
    pub fn update_farmer(&self, id: i64, draft: FarmerDraft) -> Result<Farmer, StoreError> {
        draft.validate()?;
        let _guard = self.lock(COLL);
        let mut farmers: Vec<Farmer> = self.load_or_empty(COLL);
        let farmer = farmers
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::not_found("farmer", id))?;
        farmer.apply(draft, now_millis());
        let updated = farmer.clone();
        self.save(COLL, &farmers)?;
        info!(id, "farmer updated");
        Ok(updated)
    }

    pub fn delete_farmer(&self, id: i64) -> Result<(), StoreError> {
        let _guard = self.lock(COLL);
        let mut farmers: Vec<Farmer> = self.load_or_empty(COLL);
        let before = farmers.len();
        farmers.retain(|f| f.id != id);
        if farmers.len() == before {
            return Err(StoreError::not_found("farmer", id));
        }
        self.save(COLL, &farmers)?;
        info!(id, "farmer deleted");
        Ok(())
    }
}
