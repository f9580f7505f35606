// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let s = store.summary();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec![
                "Bills".to_string(),
                s.bill_count.to_string(),
                fmt_money(&s.bills_amount),
            ],
            vec![
                "Spendings".to_string(),
                s.spending_count.to_string(),
                fmt_money(&s.spendings_amount),
            ],
            vec!["Net".to_string(), String::new(), fmt_money(&s.net)],
        ];
        println!("{}", pretty_table(&["", "Count", "Amount"], rows));
    }
    Ok(())
}
