// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hisaab::{cli, commands, config, store::Store};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let dir = config::resolve_data_dir(matches.get_one::<PathBuf>("data_dir").map(|p| p.as_path()))?;
    let store = Store::open(&dir)
        .with_context(|| format!("Cannot use data directory {}", dir.display()))?;

    match matches.subcommand() {
        Some(("data-dir", _)) => commands::data::data_dir(&store)?,
        Some(("clear", sub)) => commands::data::clear(&store, sub)?,
        Some(("bill", sub)) => commands::bills::handle(&store, sub)?,
        Some(("spending", sub)) => commands::spendings::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&store, sub)?,
        Some(("farmer", sub)) => commands::farmers::handle(&store, sub)?,
        Some(("sell", sub)) => commands::sell_together::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("serve", _)) => commands::serve::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
