//! Sections Command
//!
//! List the top-level sections available for resolution.

use std::path::PathBuf;

use figment::value::{Dict, Value};

use super::load_source;
use crate::cli::Output;
use crate::types::Result;

pub fn run(files: &[PathBuf]) -> Result<()> {
    let source = load_source(files)?;
    let root: Dict = source.extract()?;
    let output = Output::new();

    if root.is_empty() {
        output.info("No configuration sections found.");
        return Ok(());
    }

    output.header("Sections");
    for line in describe(&root) {
        println!("  {}", line);
    }
    Ok(())
}

/// One line per section: name plus key count, or `(value)` for scalars
fn describe(root: &Dict) -> Vec<String> {
    root.iter()
        .map(|(name, value)| match value {
            Value::Dict(_, dict) => format!("{} ({} keys)", name, dict.len()),
            _ => format!("{} (value)", name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_sections() {
        let mut section = Dict::new();
        section.insert("port".to_string(), Value::from(80i32));
        section.insert("host".to_string(), Value::from("localhost"));

        let mut root = Dict::new();
        root.insert("server".to_string(), Value::from(section));
        root.insert("debug".to_string(), Value::from(true));

        assert_eq!(describe(&root), vec!["debug (value)", "server (2 keys)"]);
    }
}
