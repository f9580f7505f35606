// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod calc;
pub mod cli;
pub mod collections;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod reconcile;
pub mod store;
pub mod utils;
pub mod wire;

pub use error::StoreError;
pub use store::{Collection, Store};
