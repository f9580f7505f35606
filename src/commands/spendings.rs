// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::forms::SpendingForm;
use crate::models::TransactionKind;
use crate::store::Store;
use crate::utils::{optional_arg, parse_id, required_arg};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let draft = SpendingForm {
        description: required_arg(sub, "description")?,
        amount: required_arg(sub, "amount")?,
        quantity: required_arg(sub, "quantity")?,
        rate: required_arg(sub, "rate")?,
        discount: required_arg(sub, "discount")?,
    }
    .parse()?;
    match optional_arg(sub, "bill").map(parse_id).transpose()? {
        Some(bill_id) => {
            let s = store.add_spending_to_bill(bill_id, draft)?;
            println!(
                "Recorded spending {} '{}' total {} under bill {}",
                s.id, s.description, s.total, bill_id
            );
        }
        None => {
            let s = store.add_standalone_spending(draft)?;
            println!("Recorded spending {} '{}' total {}", s.id, s.description, s.total);
        }
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    let parent = optional_arg(sub, "bill").map(parse_id).transpose()?;
    store.delete_transaction(id, TransactionKind::Spending, parent)?;
    println!("Removed spending {}", id);
    Ok(())
}
