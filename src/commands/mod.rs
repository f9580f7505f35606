// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bills;
pub mod data;
pub mod exporter;
pub mod farmers;
pub mod reports;
pub mod sell_together;
pub mod serve;
pub mod spendings;
pub mod transactions;
