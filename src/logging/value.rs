//! Field Values
//!
//! Typed rendering of a single configuration field, used as a positional
//! argument of a [`LogRecord`](super::LogRecord).

use std::fmt;

use figment::value::Value;

/// A resolved field value as handed to a log sink
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Text(String),
    /// Items of a list field, `None` items already removed
    List(Vec<FieldValue>),
    /// Non-null fields of a nested configuration, in declaration order
    Nested(Vec<(String, FieldValue)>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{}", v),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Nested(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}={}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl FieldValue {
    /// Render a raw source value, `None` for empty/null leaves.
    ///
    /// Dictionary entries come out sorted by key.
    pub fn from_value(value: &Value) -> Option<Self> {
        let rendered = match value {
            Value::String(_, s) => Self::Text(s.clone()),
            Value::Char(_, c) => Self::Char(*c),
            Value::Bool(_, b) => Self::Bool(*b),
            Value::Num(..) => {
                if let Ok(v) = value.deserialize::<i64>() {
                    Self::Int(v)
                } else if let Ok(v) = value.deserialize::<u64>() {
                    Self::UInt(v)
                } else {
                    Self::F64(value.deserialize::<f64>().ok()?)
                }
            }
            Value::Empty(..) => return None,
            Value::Array(_, items) => {
                Self::List(items.iter().filter_map(Self::from_value).collect())
            }
            Value::Dict(_, dict) => Self::Nested(
                dict.iter()
                    .filter_map(|(k, v)| Some((k.clone(), Self::from_value(v)?)))
                    .collect(),
            ),
        };
        Some(rendered)
    }
}
