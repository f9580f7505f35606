// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::store::Store;

pub fn data_dir(store: &Store) -> Result<()> {
    println!("{}", store.dir().display());
    Ok(())
}

pub fn clear(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to delete all data without --yes");
    }
    store.clear_all()?;
    println!("Cleared all data in {}", store.dir().display());
    Ok(())
}
