// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.maashapura", "Hisaab", "hisaab"));

/// Set by portable builds to the directory holding the executable.
pub const PORTABLE_ENV: &str = "PORTABLE_EXECUTABLE_DIR";

/// Explicit data directory override, also accepted as `--data-dir`.
pub const DATA_DIR_ENV: &str = "HISAAB_DATA_DIR";

/// Where the JSON collections live: explicit override, then
/// `$PORTABLE_EXECUTABLE_DIR/data`, then the per-user data directory.
/// The directory is not created here; `Store::open` does that.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    resolve_from(override_dir, std::env::var_os(PORTABLE_ENV), platform_data_dir)
}

fn platform_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

fn resolve_from(
    override_dir: Option<&Path>,
    portable: Option<OsString>,
    platform: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(exe_dir) = portable.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(exe_dir).join("data"));
    }
    platform()
}
