// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::forms::SellTogetherForm;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, optional_arg, parse_id, pretty_table, required_arg};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(required_arg(sub, "id")?)?;
            store.delete_sell_together(id)?;
            println!("Removed joint sale {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let draft = SellTogetherForm {
        farmer_ids: required_arg(sub, "farmers")?,
        kul_rakam: required_arg(sub, "kul-rakam")?,
        majuri: optional_arg(sub, "majuri").unwrap_or_default(),
        bardan: optional_arg(sub, "bardan").unwrap_or_default(),
        bhadu: optional_arg(sub, "bhadu").unwrap_or_default(),
        kharch: optional_arg(sub, "kharch").unwrap_or_default(),
    }
    .parse()?;
    let e = store.add_sell_together(draft)?;
    println!(
        "Recorded joint sale {} for {} farmers: hisaab {} kharch {} profit/loss {}",
        e.id,
        e.farmer_ids.len(),
        fmt_money(&e.total_hisaab),
        fmt_money(&e.total_kharch),
        fmt_money(&e.profit_or_loss)
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.load_sell_together();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    e.farmer_ids.len().to_string(),
                    fmt_money(&e.kul_rakam),
                    fmt_money(&e.total_hisaab),
                    fmt_money(&e.total_kharch),
                    fmt_money(&e.profit_or_loss),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Created",
                    "Farmers",
                    "Kul Rakam",
                    "Hisaab",
                    "Kharch",
                    "Profit/Loss"
                ],
                rows
            )
        );
    }
    Ok(())
}

fn show(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    let detail = store.sell_together_detail(id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &detail)? {
        return Ok(());
    }
    let e = &detail.entry;
    println!(
        "{}",
        pretty_table(
            &["Kul Rakam", "Hisaab", "Kharch", "Profit/Loss"],
            vec![vec![
                fmt_money(&e.kul_rakam),
                fmt_money(&e.total_hisaab),
                fmt_money(&e.total_kharch),
                fmt_money(&e.profit_or_loss),
            ]],
        )
    );
    let mut rows: Vec<Vec<String>> = detail
        .farmers
        .iter()
        .map(|f| {
            vec![
                f.name.clone(),
                fmt_money(&f.bori),
                fmt_money(&f.bharti),
                fmt_money(&f.kad),
                fmt_money(&f.man),
                fmt_money(&f.bhav),
                fmt_money(&f.total_hisaab),
            ]
        })
        .collect();
    for missing in &detail.missing {
        rows.push(vec![format!("farmer {} (deleted)", missing)]);
    }
    println!(
        "{}",
        pretty_table(
            &["Farmer", "Bori", "Bharti", "Kad", "Man", "Bhav", "Hisaab"],
            rows
        )
    );
    Ok(())
}
