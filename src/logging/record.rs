//! Configuration Log Records
//!
//! A log record is a message template with named holes plus the positional
//! values that fill them, e.g.
//!
//! ```text
//! template: Configuration of 'MyTestConfig': PropInt={PropInt} PropBool={PropBool}
//! args:     [Int(123), Bool(true)]
//! rendered: Configuration of 'MyTestConfig': PropInt=123 PropBool=True
//! ```
//!
//! The template is kept separate so sinks with structured output can apply
//! their own formatting.

use std::fmt;

use figment::value::Dict;

use super::value::FieldValue;
use crate::binding::Configuration;
use crate::constants::logging::{PREFIX_CLOSE, PREFIX_OPEN};

/// Template plus positional arguments describing one resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    template: String,
    args: Vec<FieldValue>,
}

impl LogRecord {
    /// Start a record for the given section with just the prefix
    fn with_prefix(section: &str) -> Self {
        Self {
            template: format!("{}{}{}", PREFIX_OPEN, escape(section), PREFIX_CLOSE),
            args: Vec::new(),
        }
    }

    /// Append one ` Name={Name}` token and its value.
    ///
    /// Braces in `name` are doubled in the literal part and dropped from the
    /// hole label, so they never open or close a hole.
    fn push(&mut self, name: &str, value: FieldValue) {
        self.template.push(' ');
        self.template.push_str(&escape(name));
        self.template.push_str("={");
        self.template
            .extend(name.chars().filter(|c| *c != '{' && *c != '}'));
        self.template.push('}');
        self.args.push(value);
    }

    /// Build the record for a resolved configuration.
    ///
    /// Fields are visited in declaration order; fields whose value is absent
    /// are left out entirely.
    pub fn for_configuration<T: Configuration>(config: &T) -> Self {
        let mut record = Self::with_prefix(T::section_name());
        for field in T::fields() {
            if let Some(value) = field.render(config) {
                record.push(field.name(), value);
            }
        }
        record
    }

    /// Build a record straight from a raw section (keys sorted)
    pub fn for_section(name: &str, section: &Dict) -> Self {
        let mut record = Self::with_prefix(name);
        for (key, value) in section {
            if let Some(value) = FieldValue::from_value(value) {
                record.push(key, value);
            }
        }
        record
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn args(&self) -> &[FieldValue] {
        &self.args
    }

    /// Fill the template holes positionally.
    ///
    /// `{{` and `}}` are literal braces; a hole without a matching argument is
    /// kept verbatim.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.template.len() + self.args.len() * 8);
        let mut args = self.args.iter();
        let mut chars = self.template.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|(_, n)| *n) == Some('{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek().map(|(_, n)| *n) == Some('}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let Some(end) = self.template[start..].find('}') else {
                        out.push_str(&self.template[start..]);
                        break;
                    };
                    let hole = &self.template[start..start + end + 1];
                    match args.next() {
                        Some(value) => out.push_str(&value.to_string()),
                        None => out.push_str(hole),
                    }
                    // skip to the closing brace
                    while let Some((i, _)) = chars.peek() {
                        if *i > start + end {
                            break;
                        }
                        chars.next();
                    }
                }
                _ => out.push(c),
            }
        }

        out
    }
}

/// Double `{` and `}` so literal text survives [`LogRecord::render`]
fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::value::Value;

    fn record(template: &str, args: Vec<FieldValue>) -> LogRecord {
        LogRecord {
            template: template.to_string(),
            args,
        }
    }

    #[test]
    fn test_prefix_only() {
        let rec = LogRecord::with_prefix("Empty");
        assert_eq!(rec.template(), "Configuration of 'Empty':");
        assert!(rec.args().is_empty());
        assert_eq!(rec.render(), "Configuration of 'Empty':");
    }

    #[test]
    fn test_push_builds_named_holes() {
        let mut rec = LogRecord::with_prefix("Cfg");
        rec.push("PropInt", FieldValue::Int(123));
        rec.push("PropBool", FieldValue::Bool(true));

        assert_eq!(
            rec.template(),
            "Configuration of 'Cfg': PropInt={PropInt} PropBool={PropBool}"
        );
        assert_eq!(rec.render(), "Configuration of 'Cfg': PropInt=123 PropBool=True");
    }

    #[test]
    fn test_render_escaped_braces() {
        let rec = record("{{literal}} {A}", vec![FieldValue::Int(1)]);
        assert_eq!(rec.render(), "{literal} 1");
    }

    #[test]
    fn test_render_missing_argument_keeps_hole() {
        let rec = record("A={A} B={B}", vec![FieldValue::Int(1)]);
        assert_eq!(rec.render(), "A=1 B={B}");
    }

    #[test]
    fn test_render_unclosed_hole() {
        let rec = record("A={A", vec![FieldValue::Int(1)]);
        assert_eq!(rec.render(), "A={A");
    }

    #[test]
    fn test_argument_text_is_not_reinterpreted() {
        let rec = record("S={S}", vec![FieldValue::Text("{x}".into())]);
        assert_eq!(rec.render(), "S={x}");
    }

    #[test]
    fn test_braces_in_section_name_are_literal() {
        let mut section = Dict::new();
        section.insert("propint".to_string(), Value::from(123i32));

        let rec = LogRecord::for_section("x{", &section);
        assert_eq!(rec.template(), "Configuration of 'x{{': propint={propint}");
        assert_eq!(rec.render(), "Configuration of 'x{': propint=123");

        let rec = LogRecord::for_section("}y", &section);
        assert_eq!(rec.render(), "Configuration of '}y': propint=123");
    }

    #[test]
    fn test_braces_in_keys_do_not_shift_arguments() {
        let mut section = Dict::new();
        section.insert("a{b".to_string(), Value::from(1i32));
        section.insert("c".to_string(), Value::from(2i32));
        section.insert("d}".to_string(), Value::from(3i32));

        let rec = LogRecord::for_section("S", &section);
        assert_eq!(rec.template(), "Configuration of 'S': a{{b={ab} c={c} d}}={d}");
        assert_eq!(rec.render(), "Configuration of 'S': a{b=1 c=2 d}=3");
    }

    #[test]
    fn test_for_section_skips_empty_leaves() {
        let mut section = Dict::new();
        section.insert("Port".to_string(), Value::from(8080i32));
        section.insert("Host".to_string(), Value::from("localhost"));

        let rec = LogRecord::for_section("Server", &section);
        assert_eq!(
            rec.to_string(),
            "Configuration of 'Server': Host=localhost Port=8080"
        );
        assert_eq!(rec.args().len(), 2);
    }
}
