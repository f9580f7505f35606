// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Collection operations on [`crate::store::Store`]. Each one locks its
//! collection, loads it whole, mutates, and saves it whole.

pub mod farmers;
pub mod sell_together;
pub mod transactions;

pub use sell_together::SellTogetherDetail;
pub use transactions::{KindFilter, Summary, TransactionFilter, TransactionRow};
