// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Write-time derivations. Nothing here is recomputed on read; the store
//! persists whatever these functions return at the moment a record is
//! created or updated.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero and pins the scale to two places, so the
/// value prints as `123.40`. Past roughly 1e26 there is no room left for two
/// fraction digits and the scale stays lower; inputs capped at
/// [`crate::forms::MAX_INPUT`] never get there.
pub fn round2(d: Decimal) -> Decimal {
    let mut r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    r.rescale(2);
    r
}

fn percent_of(base: Decimal, pct: Decimal) -> Option<Decimal> {
    base.checked_mul(pct).map(|v| v / Decimal::ONE_HUNDRED)
}

/// `amount*quantity + amount*quantity*tax/100`
pub fn bill_total(amount: Decimal, quantity: Decimal, tax: Decimal) -> Decimal {
    let total = amount
        .checked_mul(quantity)
        .and_then(|gross| gross.checked_add(percent_of(gross, tax)?));
    round2(total.unwrap_or(Decimal::ZERO))
}

/// `amount*quantity − amount*quantity*discount/100`
pub fn spending_total(amount: Decimal, quantity: Decimal, discount: Decimal) -> Decimal {
    let total = amount
        .checked_mul(quantity)
        .and_then(|gross| gross.checked_sub(percent_of(gross, discount)?));
    round2(total.unwrap_or(Decimal::ZERO))
}

/// Returns `(man, total_hisaab)`. `total_hisaab` is taken from the
/// unrounded `man`; any overflow collapses that value to zero.
pub fn farmer_hisaab(
    bori: Decimal,
    bharti: Decimal,
    kad: Decimal,
    bhav: Decimal,
) -> (Decimal, Decimal) {
    let man = bharti
        .checked_sub(kad)
        .and_then(|net| bori.checked_mul(net));
    let hisaab = man.and_then(|m| m.checked_mul(bhav));
    (
        round2(man.unwrap_or(Decimal::ZERO)),
        round2(hisaab.unwrap_or(Decimal::ZERO)),
    )
}

/// Joint-sale expenses: majuri + bardan + bhadu + kharch.
pub fn total_kharch(parts: [Decimal; 4]) -> Decimal {
    parts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p))
        .unwrap_or(Decimal::ZERO)
}

pub fn sum_hisaab<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .unwrap_or(Decimal::ZERO)
}

/// `kul_rakam − total_kharch − total_hisaab`
pub fn profit_or_loss(kul_rakam: Decimal, total_kharch: Decimal, total_hisaab: Decimal) -> Decimal {
    kul_rakam
        .checked_sub(total_kharch)
        .and_then(|v| v.checked_sub(total_hisaab))
        .unwrap_or(Decimal::ZERO)
}
