// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::forms::FarmerForm;
use crate::models::Farmer;
use crate::store::Store;
use crate::utils::{
    display_date, fmt_money, maybe_print_json, optional_arg, parse_id, pretty_table, required_arg,
};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(required_arg(sub, "id")?)?;
            store.delete_farmer(id)?;
            println!("Removed farmer {}", id);
        }
        Some(("reconcile", _)) => {
            let changed = store.reconcile_farmers()?;
            println!("Reconciled joint-sale visibility ({} farmers changed)", changed);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let draft = FarmerForm {
        name: required_arg(sub, "name")?,
        bori: optional_arg(sub, "bori").unwrap_or_default(),
        bharti: optional_arg(sub, "bharti").unwrap_or_default(),
        kad: optional_arg(sub, "kad").unwrap_or_default(),
        bhav: optional_arg(sub, "bhav").unwrap_or_default(),
    }
    .parse()?;
    let f = store.add_farmer(draft)?;
    println!(
        "Recorded farmer {} '{}' man {} hisaab {}",
        f.id, f.name, f.man, f.total_hisaab
    );
    Ok(())
}

fn update(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    let current = store.farmer(id)?;
    let (bori, bharti, kad, bhav) = (
        current.bori.to_string(),
        current.bharti.to_string(),
        current.kad.to_string(),
        current.bhav.to_string(),
    );
    let draft = FarmerForm {
        name: optional_arg(sub, "name").unwrap_or(&current.name),
        bori: optional_arg(sub, "bori").unwrap_or(&bori),
        bharti: optional_arg(sub, "bharti").unwrap_or(&bharti),
        kad: optional_arg(sub, "kad").unwrap_or(&kad),
        bhav: optional_arg(sub, "bhav").unwrap_or(&bhav),
    }
    .parse()?;
    let f = store.update_farmer(id, draft)?;
    println!("Updated farmer {} hisaab {}", f.id, f.total_hisaab);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<Farmer> = if sub.get_flag("all") {
        store.load_farmers()
    } else {
        store.visible_farmers()
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|f| {
                vec![
                    f.id.to_string(),
                    f.name.clone(),
                    f.bori.to_string(),
                    f.bharti.to_string(),
                    f.kad.to_string(),
                    fmt_money(&f.man),
                    f.bhav.to_string(),
                    fmt_money(&f.total_hisaab),
                    if f.is_hidden() { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Name", "Bori", "Bharti", "Kad", "Man", "Bhav", "Hisaab", "In Sale"
                ],
                rows
            )
        );
    }
    Ok(())
}

/// Single-farmer slip: the inputs, the derived man and hisaab, and the
/// amount owed.
fn show(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    let f = store.farmer(id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &f)? {
        return Ok(());
    }
    println!("{} (#{})  {}", f.name, f.id, display_date());
    let rows = vec![
        vec!["Bori".to_string(), f.bori.to_string()],
        vec!["Bharti".to_string(), f.bharti.to_string()],
        vec!["Kad".to_string(), f.kad.to_string()],
        vec!["Man".to_string(), fmt_money(&f.man)],
        vec!["Bhav".to_string(), f.bhav.to_string()],
        vec!["Hisaab".to_string(), fmt_money(&f.total_hisaab)],
    ];
    println!("{}", pretty_table(&["Item", "Value"], rows));
    println!("Man = {} x ({} - {})", f.bori, f.bharti, f.kad);
    println!("Amount due: {}", fmt_money(&f.total_hisaab));
    if f.is_hidden() {
        println!("Part of a joint sale");
    }
    Ok(())
}
