//! Typed Configuration Binding
//!
//! A configuration type names its section and lists its fields, in declaration
//! order, as [`Field`] descriptors. The descriptors drive both binding a source
//! section onto the type and rendering the resolved values for logging.
//!
//! Most types use the [`configuration!`](crate::configuration) macro:
//!
//! ```ignore
//! autoconf::configuration! {
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct MyTestConfig {
//!         pub prop_int: i32 => "PropInt",
//!         pub prop_string: String => "PropString",
//!         pub prop_float: f32 => "PropFloat",
//!         pub prop_bool: bool => "PropBool",
//!     }
//! }
//! ```

mod field;
mod resolver;

pub use field::ConfigField;
pub use resolver::{bind_section, resolve_config, resolve_section};

use std::fmt;

use figment::value::Value;

use crate::logging::FieldValue;
use crate::types::Result;

/// A strongly-typed configuration bound from the section named after it
pub trait Configuration: Default + Send + Sync + 'static {
    /// Section name, the type's own name
    fn section_name() -> &'static str;

    /// Field descriptors in declaration order
    fn fields() -> Vec<Field<Self>>;
}

/// Binder writing a converted leaf into its field
pub type BindFn<T> = fn(&mut T, &Value) -> Result<()>;

/// Renderer reading a field for logging, `None` for absent values
pub type RenderFn<T> = fn(&T) -> Option<FieldValue>;

/// Describes one field of configuration type `T`
pub struct Field<T> {
    name: &'static str,
    bind: BindFn<T>,
    render: RenderFn<T>,
}

impl<T> Field<T> {
    pub const fn new(name: &'static str, bind: BindFn<T>, render: RenderFn<T>) -> Self {
        Self { name, bind, render }
    }

    /// Key matched against source leaves and printed in the log line
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bind(&self, target: &mut T, value: &Value) -> Result<()> {
        (self.bind)(target, value)
    }

    pub fn render(&self, source: &T) -> Option<FieldValue> {
        (self.render)(source)
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// Declare a configuration struct together with its field descriptors.
///
/// Each field may carry an explicit key (`=> "PropInt"`); without one the
/// Rust field name is used. The struct must implement `Default`, usually by
/// deriving it. Every field type must implement [`ConfigField`]; types declared
/// with this macro do, so they nest.
#[macro_export]
macro_rules! configuration {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Configuration for $name {
            fn section_name() -> &'static str {
                stringify!($name)
            }

            fn fields() -> ::std::vec::Vec<$crate::Field<Self>> {
                ::std::vec![
                    $(
                        $crate::Field::new(
                            $crate::__field_key!($field $(, $key)?),
                            |config: &mut Self, value: &$crate::Value| -> $crate::Result<()> {
                                config.$field = <$ty as $crate::ConfigField>::bind(value)?;
                                Ok(())
                            },
                            |config: &Self| <$ty as $crate::ConfigField>::render(&config.$field),
                        ),
                    )*
                ]
            }
        }

        impl $crate::ConfigField for $name {
            fn bind(value: &$crate::Value) -> $crate::Result<Self> {
                $crate::bind_section::<Self>(value)
            }

            fn render(&self) -> ::std::option::Option<$crate::FieldValue> {
                $crate::binding::render_nested(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_key {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $key:literal) => {
        $key
    };
}

/// Render a nested configuration as its non-null fields
pub fn render_nested<T: Configuration>(config: &T) -> Option<FieldValue> {
    Some(FieldValue::Nested(
        T::fields()
            .iter()
            .filter_map(|field| Some((field.name().to_string(), field.render(config)?)))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::configuration! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct Endpoint {
            host: String => "Host",
            port: u16 => "Port",
            tags: Vec<String>,
        }
    }

    crate::configuration! {
        #[derive(Debug, Default)]
        struct Outer {
            name: Option<String> => "Name",
            endpoint: Endpoint => "Endpoint",
        }
    }

    #[test]
    fn test_section_name_is_type_name() {
        assert_eq!(Endpoint::section_name(), "Endpoint");
        assert_eq!(Outer::section_name(), "Outer");
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let names: Vec<_> = Endpoint::fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Host", "Port", "tags"]);
    }

    #[test]
    fn test_field_bind_and_render() {
        let fields = Endpoint::fields();
        let mut endpoint = Endpoint::default();

        fields[1].bind(&mut endpoint, &Value::from(8080i32)).unwrap();
        assert_eq!(endpoint.port, 8080);
        assert_eq!(fields[1].render(&endpoint), Some(FieldValue::UInt(8080)));
    }

    #[test]
    fn test_nested_render_skips_absent_fields() {
        let outer = Outer {
            name: None,
            endpoint: Endpoint {
                host: "localhost".into(),
                port: 80,
                tags: vec![],
            },
        };

        let rendered = render_nested(&outer).unwrap().to_string();
        assert_eq!(rendered, "{Endpoint={Host=localhost Port=80 tags=[]}}");
    }
}
