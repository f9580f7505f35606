// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SubsecRound, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn parse_id(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid id '{}'", s))
}

pub fn required_arg<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.as_str())
        .with_context(|| format!("--{} is required", id))
}

pub fn optional_arg<'a>(m: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    m.get_one::<String>(id).map(|s| s.as_str())
}

pub fn fmt_money(d: &Decimal) -> String {
    crate::calc::round2(*d).to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Next id for a collection: the current millisecond clock, bumped past the
/// largest id already present so two records created in the same
/// millisecond never collide.
pub fn next_id<I: IntoIterator<Item = i64>>(existing: I) -> i64 {
    let now = Utc::now().timestamp_millis();
    match existing.into_iter().max() {
        Some(max) => now.max(max.saturating_add(1)),
        None => now,
    }
}

/// Current time cut to what the on-disk timestamp format keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Creation-day stamp stored on transactions, e.g. `11/5/2024`.
pub fn display_date() -> String {
    Local::now().format("%-m/%-d/%Y").to_string()
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
