//! CLI Commands
//!
//! Inspect configuration sources the way the resolver sees them.

pub mod path;
pub mod sections;
pub mod show;

use std::path::PathBuf;

use figment::Figment;

use crate::config::ConfigLoader;
use crate::types::Result;

/// Default resolution chain, or explicit files (then env) when given
pub(crate) fn load_source(files: &[PathBuf]) -> Result<Figment> {
    if files.is_empty() {
        ConfigLoader::load()
    } else {
        ConfigLoader::load_from_files(files)
    }
}
