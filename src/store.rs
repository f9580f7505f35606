// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-file JSON persistence. Each collection is one pretty-printed JSON
//! array; every save rewrites the file through a temp file and a rename.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Farmers,
    SellTogether,
    LegacyBills,
    LegacySpendings,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Transactions,
        Collection::Farmers,
        Collection::SellTogether,
        Collection::LegacyBills,
        Collection::LegacySpendings,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Transactions => "transactions.json",
            Collection::Farmers => "farmers.json",
            Collection::SellTogether => "sellTogether.json",
            Collection::LegacyBills => "bills.json",
            Collection::LegacySpendings => "spendings.json",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Collection::Transactions => "transactions",
            Collection::Farmers => "farmers",
            Collection::SellTogether => "sellTogether",
            Collection::LegacyBills => "bills",
            Collection::LegacySpendings => "spendings",
        }
    }
}

/// Handle on one data directory. Mutating collection operations hold the
/// collection's lock for their whole load-mutate-save span. When two locks
/// are needed they are taken in the order transactions, sell-together,
/// farmers.
#[derive(Debug)]
pub struct Store {
    dir: PathBuf,
    transactions: Mutex<()>,
    sell_together: Mutex<()>,
    farmers: Mutex<()>,
}

impl Store {
    /// Creates the directory if needed and runs the legacy migration.
    /// Only a directory failure is an error; a failed migration is logged.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
            path: dir.clone(),
            source,
        })?;
        let store = Store {
            dir,
            transactions: Mutex::new(()),
            sell_together: Mutex::new(()),
            farmers: Mutex::new(()),
        };
        if let Err(err) = store.migrate_legacy() {
            error!(error = %err, "legacy migration failed; keeping legacy files");
        }
        debug!(dir = %store.dir.display(), "store opened");
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, c: Collection) -> PathBuf {
        self.dir.join(c.file_name())
    }

    pub(crate) fn lock(&self, c: Collection) -> MutexGuard<'_, ()> {
        let m = match c {
            Collection::Transactions | Collection::LegacyBills | Collection::LegacySpendings => {
                &self.transactions
            }
            Collection::SellTogether => &self.sell_together,
            Collection::Farmers => &self.farmers,
        };
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_raw(&self, c: Collection) -> Result<Option<String>, StoreError> {
        let path = self.path(c);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Absent file reads as an empty collection.
    pub fn load<T: DeserializeOwned>(&self, c: Collection) -> Result<Vec<T>, StoreError> {
        let Some(body) = self.read_raw(c)? else {
            debug!(collection = c.name(), "no file yet");
            return Ok(Vec::new());
        };
        let docs: Vec<T> = serde_json::from_str(&body).map_err(|source| StoreError::CorruptData {
            path: self.path(c),
            source,
        })?;
        debug!(collection = c.name(), count = docs.len(), "loaded");
        Ok(docs)
    }

    /// Load with the compatibility fallback: any failure is logged and the
    /// collection is treated as empty. One unreadable record (bad JSON, a
    /// number out of range, a missing field) makes the whole file corrupt,
    /// and the next successful save replaces it with only the new data. The
    /// file is first copied to `<name>.corrupt` so it can be repaired by hand.
    pub fn load_or_empty<T: DeserializeOwned>(&self, c: Collection) -> Vec<T> {
        match self.load(c) {
            Ok(docs) => docs,
            Err(err @ StoreError::CorruptData { .. }) => {
                error!(collection = c.name(), error = %err, "corrupt collection, using empty");
                self.backup_corrupt(c);
                Vec::new()
            }
            Err(err) => {
                warn!(collection = c.name(), error = %err, "load failed, using empty");
                Vec::new()
            }
        }
    }

    pub fn corrupt_backup_path(&self, c: Collection) -> PathBuf {
        self.dir.join(format!("{}.corrupt", c.file_name()))
    }

    fn backup_corrupt(&self, c: Collection) {
        let backup = self.corrupt_backup_path(c);
        match fs::copy(self.path(c), &backup) {
            Ok(_) => warn!(collection = c.name(), backup = %backup.display(), "kept a copy of the corrupt file"),
            Err(err) => error!(collection = c.name(), error = %err, "could not copy the corrupt file"),
        }
    }

    pub fn save<T: Serialize>(&self, c: Collection, docs: &[T]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(docs).map_err(|source| StoreError::Serialize {
            collection: c.name(),
            source,
        })?;
        self.write_atomic(c, body.as_bytes())?;
        debug!(collection = c.name(), count = docs.len(), "saved");
        Ok(())
    }

    fn write_atomic(&self, c: Collection, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path(c);
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    /// Removes the backing file; a later `load` returns an empty collection.
    pub fn clear(&self, c: Collection) -> Result<(), StoreError> {
        let path = self.path(c);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(collection = c.name(), "cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Clears every collection, legacy files included.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let _tx = self.lock(Collection::Transactions);
        let _st = self.lock(Collection::SellTogether);
        let _fm = self.lock(Collection::Farmers);
        for c in Collection::ALL {
            self.clear(c)?;
        }
        Ok(())
    }

    /// Folds legacy `bills.json` and `spendings.json` into
    /// `transactions.json`. Skipped entirely once the unified file exists.
    /// Returns whether a migration happened.
    pub fn migrate_legacy(&self) -> Result<bool, StoreError> {
        let _guard = self.lock(Collection::Transactions);
        if self.path(Collection::Transactions).exists() {
            return Ok(false);
        }
        let bills_path = self.path(Collection::LegacyBills);
        let spendings_path = self.path(Collection::LegacySpendings);
        if !bills_path.exists() && !spendings_path.exists() {
            return Ok(false);
        }

        let bills: Vec<Value> = self.load(Collection::LegacyBills)?;
        let spendings: Vec<Value> = self.load(Collection::LegacySpendings)?;
        let (bill_count, spending_count) = (bills.len(), spendings.len());

        let mut merged = Vec::with_capacity(bill_count + spending_count);
        for mut bill in bills {
            if let Some(obj) = bill.as_object_mut() {
                obj.entry("type").or_insert_with(|| Value::from("bill"));
                obj.entry("spendings").or_insert_with(|| Value::Array(Vec::new()));
            }
            merged.push(bill);
        }
        for mut spending in spendings {
            if let Some(obj) = spending.as_object_mut() {
                obj.entry("type").or_insert_with(|| Value::from("spending"));
            }
            merged.push(spending);
        }

        self.save(Collection::Transactions, &merged)?;
        self.clear(Collection::LegacyBills)?;
        self.clear(Collection::LegacySpendings)?;
        info!(
            bills = bill_count,
            spendings = spending_count,
            "migrated legacy bills and spendings into transactions"
        );
        Ok(true)
    }
}
