// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::forms::BillForm;
use crate::models::{Transaction, TransactionKind};
use crate::store::Store;
use crate::utils::{optional_arg, parse_id, required_arg};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let draft = BillForm {
        description: required_arg(sub, "description")?,
        amount: required_arg(sub, "amount")?,
        quantity: required_arg(sub, "quantity")?,
        rate: required_arg(sub, "rate")?,
        tax: required_arg(sub, "tax")?,
    }
    .parse()?;
    let bill = store.add_bill(draft)?;
    println!(
        "Recorded bill {} '{}' total {}",
        bill.id, bill.description, bill.total
    );
    Ok(())
}

/// Flags left out keep the bill's current values.
fn update(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    let current = store
        .load_transactions()
        .into_iter()
        .find_map(|t| match t {
            Transaction::Bill(b) if b.id == id => Some(b),
            _ => None,
        })
        .ok_or_else(|| anyhow!("Bill {} not found", id))?;

    let (amount, quantity, rate, tax) = (
        current.amount.to_string(),
        current.quantity.to_string(),
        current.rate.to_string(),
        current.tax.to_string(),
    );
    let draft = BillForm {
        description: optional_arg(sub, "description").unwrap_or(&current.description),
        amount: optional_arg(sub, "amount").unwrap_or(&amount),
        quantity: optional_arg(sub, "quantity").unwrap_or(&quantity),
        rate: optional_arg(sub, "rate").unwrap_or(&rate),
        tax: optional_arg(sub, "tax").unwrap_or(&tax),
    }
    .parse()?;
    let bill = store.update_bill(id, draft)?;
    println!(
        "Updated bill {} total {} ({} spendings kept)",
        bill.id,
        bill.total,
        bill.spendings.len()
    );
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    store.delete_transaction(id, TransactionKind::Bill, None)?;
    println!("Removed bill {}", id);
    Ok(())
}
