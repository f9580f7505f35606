// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde_json::json;

use crate::collections::transactions::flatten;
use crate::store::Store;
use crate::utils::required_arg;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        Some(("farmers", sub)) => export_farmers(store, sub),
        _ => Ok(()),
    }
}

fn format_of(sub: &clap::ArgMatches) -> Result<String> {
    let fmt = required_arg(sub, "format")?.trim().to_lowercase();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    Ok(fmt)
}

fn export_transactions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = format_of(sub)?;
    let out = required_arg(sub, "out")?.trim();
    let rows = flatten(&store.load_transactions());

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "type",
                "bill",
                "description",
                "amount",
                "quantity",
                "rate",
                "tax_or_discount",
                "total",
                "date",
            ])?;
            for r in &rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.kind.as_str().to_string(),
                    r.parent_id.map(|p| p.to_string()).unwrap_or_default(),
                    r.description.clone(),
                    r.amount.to_string(),
                    r.quantity.to_string(),
                    r.rate.to_string(),
                    r.adjustment.to_string(),
                    r.total.to_string(),
                    r.date.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id,
                        "type": r.kind.as_str(),
                        "bill": r.parent_id,
                        "description": r.description,
                        "amount": r.amount.to_string(),
                        "quantity": r.quantity.to_string(),
                        "rate": r.rate.to_string(),
                        "taxOrDiscount": r.adjustment.to_string(),
                        "total": r.total.to_string(),
                        "date": r.date,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

fn export_farmers(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = format_of(sub)?;
    let out = required_arg(sub, "out")?.trim();
    let farmers = store.load_farmers();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "name",
                "bori",
                "bharti",
                "kad",
                "man",
                "bhav",
                "total_hisaab",
                "in_sell_together",
            ])?;
            for f in &farmers {
                wtr.write_record([
                    f.id.to_string(),
                    f.name.clone(),
                    f.bori.to_string(),
                    f.bharti.to_string(),
                    f.kad.to_string(),
                    f.man.to_string(),
                    f.bhav.to_string(),
                    f.total_hisaab.to_string(),
                    f.is_hidden().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&farmers)?)?;
        }
    }
    println!("Exported {} farmers to {}", farmers.len(), out);
    Ok(())
}
