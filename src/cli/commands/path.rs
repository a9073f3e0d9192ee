//! Path Command
//!
//! Show where configuration is looked up.

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::constants::loader::{ENV_PREFIX, ENV_SEPARATOR};
use crate::types::Result;

pub fn run() -> Result<()> {
    let output = Output::new();

    output.section("Settings files (in merge order)");
    for path in ConfigLoader::default_paths() {
        let marker = if path.exists() { "✓" } else { "✗" };
        println!("  {} {}", marker, path.display());
    }

    output.section("Environment");
    println!(
        "  {}<SECTION>{}<KEY>  (overrides files)",
        ENV_PREFIX, ENV_SEPARATOR
    );
    Ok(())
}
