// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::collections::{KindFilter, TransactionFilter, TransactionRow};
use crate::models::TransactionKind;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, optional_arg, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let count = data.len();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let adj = match r.kind {
                    TransactionKind::Bill => format!("{}% Tax", r.adjustment),
                    TransactionKind::Spending => format!("{}% Disc", r.adjustment),
                };
                vec![
                    r.id.to_string(),
                    r.kind.as_str().to_string(),
                    r.parent_id.map(|p| p.to_string()).unwrap_or_default(),
                    r.description.clone(),
                    fmt_money(&r.amount),
                    r.quantity.to_string(),
                    fmt_money(&r.rate),
                    adj,
                    fmt_money(&r.total),
                    r.date.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Type",
                    "Bill",
                    "Description",
                    "Amount",
                    "Qty",
                    "Rate",
                    "Tax/Disc",
                    "Total",
                    "Date"
                ],
                rows,
            )
        );
        println!("{} record{}", count, if count == 1 { "" } else { "s" });
    }
    Ok(())
}

pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let kind = match optional_arg(sub, "type").unwrap_or("all") {
        "all" => KindFilter::All,
        other => KindFilter::Only(other.parse::<TransactionKind>().map_err(|e| anyhow!(e))?),
    };
    let filter = TransactionFilter {
        kind,
        search: optional_arg(sub, "search").map(str::to_string),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    Ok(store.query_transactions(&filter))
}
