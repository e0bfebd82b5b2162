//! Per-application storage.
//!
//! Each application owns one directory under the platform data directory,
//! keyed by its name and created on first use. The crate never interprets
//! what is stored there.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::Error;

/// Returns the application's support directory, creating it if needed.
pub fn support_dir(name: &str) -> Result<PathBuf, Error> {
    let base = BaseDirs::new().ok_or(Error::NoHomeDirectory)?;
    support_dir_in(base.data_dir(), name)
}

pub(crate) fn support_dir_in(base: &Path, name: &str) -> Result<PathBuf, Error> {
    let dir = base.join(name);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
