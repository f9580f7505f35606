// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keeps `Farmer::hidden_in_sell_together` in line with joint-sale
//! membership. Adding an entry only ever hides; unhiding needs the full
//! rescan in [`reconcile_visibility`].

use std::collections::HashSet;

use crate::models::{Farmer, SellTogetherEntry};

/// Hides every farmer listed in `ids`. Farmers not listed are untouched.
/// Returns how many flags changed.
pub fn hide_members(farmers: &mut [Farmer], ids: &[i64]) -> usize {
    let mut changed = 0;
    for f in farmers.iter_mut().filter(|f| ids.contains(&f.id)) {
        if !f.is_hidden() {
            changed += 1;
        }
        f.hidden_in_sell_together = Some(true);
    }
    changed
}

/// Sets every farmer's flag to membership in the union of `farmer_ids`
/// across `entries`. Farmers whose visibility is already right keep their
/// stored flag as is, absent included. Returns how many flags changed.
pub fn reconcile_visibility(farmers: &mut [Farmer], entries: &[SellTogetherEntry]) -> usize {
    let members: HashSet<i64> = entries
        .iter()
        .flat_map(|e| e.farmer_ids.iter().copied())
        .collect();
    let mut changed = 0;
    for f in farmers.iter_mut() {
        let hidden = members.contains(&f.id);
        if f.is_hidden() != hidden {
            f.hidden_in_sell_together = Some(hidden);
            changed += 1;
        }
    }
    changed
}
