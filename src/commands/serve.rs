// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::api::{Request, dispatch};
use crate::store::Store;

pub fn handle(store: &Store) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let served = serve(store, stdin.lock(), stdout.lock())?;
    debug!(served, "stdin closed");
    Ok(())
}

/// One JSON request per input line, one JSON response per output line.
/// Blank lines are skipped; a line that is not a request gets
/// `{"error": ...}` and the loop carries on. Returns how many requests were
/// dispatched.
pub fn serve<R: BufRead, W: Write>(store: &Store, input: R, mut output: W) -> Result<usize> {
    let mut served = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<Request>(&line) {
            Ok(req) => {
                served += 1;
                serde_json::to_string(&dispatch(store, req))?
            }
            Err(err) => {
                warn!(error = %err, "malformed request");
                json!({ "error": err.to_string() }).to_string()
            }
        };
        writeln!(output, "{}", reply)?;
        output.flush()?;
    }
    Ok(served)
}
