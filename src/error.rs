// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

use crate::forms::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("corrupt data in {}: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode {collection}: {source}")]
    Serialize {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("could not create data directory {}: {source}", .path.display())]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        StoreError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
