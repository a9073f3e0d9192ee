//! Show Command
//!
//! Print one section as the resolution log line would render it.
//!
//! Usage:
//!   autoconf show MyTestConfig
//!   autoconf show MyTestConfig -f appsettings.toml --format json

use std::path::PathBuf;

use figment::value::{Dict, Value};
use serde::Serialize;

use super::load_source;
use crate::cli::Output;
use crate::config::ConfigSource;
use crate::logging::LogRecord;
use crate::types::{AutoconfError, Result};

/// Machine-readable form of a section
#[derive(Debug, Serialize)]
struct SectionReport<'a> {
    section: &'a str,
    found: bool,
    values: Dict,
}

pub fn run(section: &str, files: &[PathBuf], format: &str) -> Result<()> {
    let source = load_source(files)?;
    let found = source.section(section)?;
    let output = Output::new();

    let values = match &found {
        Some(Value::Dict(_, dict)) => dict.clone(),
        Some(_) => {
            output.warning(&format!(
                "Section '{}' is a single value; resolution would use defaults",
                section
            ));
            Dict::new()
        }
        None => {
            output.warning(&format!(
                "Section '{}' not found; resolution would use defaults",
                section
            ));
            Dict::new()
        }
    };

    println!("{}", render(section, found.is_some(), values, format)?);
    Ok(())
}

/// Drop null leaves at any depth; they bind to nothing and TOML has no null
fn without_empty(dict: Dict) -> Dict {
    dict.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Empty(..) => None,
            Value::Dict(tag, nested) => Some((key, Value::Dict(tag, without_empty(nested)))),
            Value::Array(tag, items) => Some((
                key,
                Value::Array(
                    tag,
                    items
                        .into_iter()
                        .filter(|item| !matches!(item, Value::Empty(..)))
                        .collect(),
                ),
            )),
            other => Some((key, other)),
        })
        .collect()
}

fn render(section: &str, found: bool, values: Dict, format: &str) -> Result<String> {
    let values = without_empty(values);
    match format {
        "json" => {
            let report = SectionReport {
                section,
                found,
                values,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        "toml" => {
            let mut root = Dict::new();
            root.insert(section.to_string(), Value::from(values));
            toml::to_string_pretty(&root)
                .map_err(|e| AutoconfError::Config(format!("Cannot render TOML: {}", e)))
        }
        "text" => Ok(LogRecord::for_section(section, &values).render()),
        other => Err(AutoconfError::Config(format!(
            "Invalid format '{}'. Valid values: text, json, toml",
            other
        ))),
    }
}
