//! Field Conversion
//!
//! [`ConfigField`] converts one source leaf into a field value and renders a
//! field back into a [`FieldValue`] for logging.
//!
//! Conversion is lenient the way env and INI style sources need it: numbers
//! and booleans may arrive as strings, text fields accept numbers and booleans.

use std::path::PathBuf;
use std::str::FromStr;

use figment::value::Value;
use serde::de::DeserializeOwned;

use crate::logging::FieldValue;
use crate::types::{AutoconfError, Result};

/// A type usable as a configuration field
pub trait ConfigField: Sized {
    /// Convert a source leaf into a value of this type
    fn bind(value: &Value) -> Result<Self>;

    /// Render for logging, `None` when the value is absent
    fn render(&self) -> Option<FieldValue>;
}

/// Deserialize a typed leaf, falling back to parsing string leaves
fn bind_parsed<T>(value: &Value) -> Result<T>
where
    T: DeserializeOwned + FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Value::String(_, s) => s.trim().parse::<T>().map_err(AutoconfError::bind::<T>),
        Value::Dict(..) | Value::Array(..) => Err(AutoconfError::bind::<T>(
            "expected a single value, found a table or list",
        )),
        other => other.deserialize::<T>().map_err(AutoconfError::bind::<T>),
    }
}

macro_rules! signed_field {
    ($($ty:ty),*) => {$(
        impl ConfigField for $ty {
            fn bind(value: &Value) -> Result<Self> {
                bind_parsed(value)
            }

            fn render(&self) -> Option<FieldValue> {
                Some(FieldValue::Int(*self as i64))
            }
        }
    )*};
}

macro_rules! unsigned_field {
    ($($ty:ty),*) => {$(
        impl ConfigField for $ty {
            fn bind(value: &Value) -> Result<Self> {
                bind_parsed(value)
            }

            fn render(&self) -> Option<FieldValue> {
                Some(FieldValue::UInt(*self as u64))
            }
        }
    )*};
}

signed_field!(i8, i16, i32, i64, isize);
unsigned_field!(u8, u16, u32, u64, usize);

impl ConfigField for f32 {
    fn bind(value: &Value) -> Result<Self> {
        bind_parsed(value)
    }

    fn render(&self) -> Option<FieldValue> {
        Some(FieldValue::F32(*self))
    }
}

impl ConfigField for f64 {
    fn bind(value: &Value) -> Result<Self> {
        bind_parsed(value)
    }

    fn render(&self) -> Option<FieldValue> {
        Some(FieldValue::F64(*self))
    }
}

impl ConfigField for bool {
    fn bind(value: &Value) -> Result<Self> {
        match value {
            Value::String(_, s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(AutoconfError::bind::<bool>(format!(
                    "'{}' is not 'true' or 'false'",
                    other
                ))),
            },
            other => bind_parsed(other),
        }
    }

    fn render(&self) -> Option<FieldValue> {
        Some(FieldValue::Bool(*self))
    }
}

impl ConfigField for char {
    fn bind(value: &Value) -> Result<Self> {
        match value {
            Value::Char(_, c) => Ok(*c),
            Value::String(_, s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(AutoconfError::bind::<char>(format!(
                        "'{}' is not a single character",
                        s
                    ))),
                }
            }
            other => other.deserialize::<char>().map_err(AutoconfError::bind::<char>),
        }
    }

    fn render(&self) -> Option<FieldValue> {
        Some(FieldValue::Char(*self))
    }
}

impl ConfigField for String {
    fn bind(value: &Value) -> Result<Self> {
        match value {
            Value::String(_, s) => Ok(s.clone()),
            Value::Dict(..) | Value::Array(..) | Value::Empty(..) => Err(
                AutoconfError::bind::<String>("expected text, found a table, list or null"),
            ),
            // numbers, booleans and chars keep their rendered text
            other => FieldValue::from_value(other)
                .map(|v| v.to_string())
                .ok_or_else(|| AutoconfError::bind::<String>("value has no text form")),
        }
    }

    fn render(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.clone()))
    }
}

impl ConfigField for PathBuf {
    fn bind(value: &Value) -> Result<Self> {
        String::bind(value).map(PathBuf::from)
    }

    fn render(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.display().to_string()))
    }
}

impl<T: ConfigField> ConfigField for Option<T> {
    fn bind(value: &Value) -> Result<Self> {
        match value {
            Value::Empty(..) => Ok(None),
            other => T::bind(other).map(Some),
        }
    }

    fn render(&self) -> Option<FieldValue> {
        self.as_ref().and_then(ConfigField::render)
    }
}

impl<T: ConfigField> ConfigField for Vec<T> {
    fn bind(value: &Value) -> Result<Self> {
        match value {
            Value::Array(_, items) => items.iter().map(T::bind).collect(),
            // a lone value binds as a one-item list
            other => T::bind(other).map(|item| vec![item]),
        }
    }

    fn render(&self) -> Option<FieldValue> {
        Some(FieldValue::List(
            self.iter().filter_map(ConfigField::render).collect(),
        ))
    }
}
