//! Configuration Sources
//!
//! A [`ConfigSource`] is the read-only hierarchical tree sections are taken
//! from. Implemented for [`Figment`] (files, env, serialized defaults) and for
//! a plain in-memory [`Dict`].

use figment::Figment;
use figment::value::{Dict, Value};

use crate::types::Result;

/// Hierarchical key/value tree queried by section name
pub trait ConfigSource: Send + Sync {
    /// Fetch the named section, `None` when absent.
    ///
    /// Names match case-insensitively, ignoring `_` and `-`.
    fn section(&self, name: &str) -> Result<Option<Value>>;
}

impl ConfigSource for Figment {
    fn section(&self, name: &str) -> Result<Option<Value>> {
        let root: Dict = self.extract()?;
        Ok(find_key(&root, name).cloned())
    }
}

impl ConfigSource for Dict {
    fn section(&self, name: &str) -> Result<Option<Value>> {
        Ok(find_key(self, name).cloned())
    }
}

/// Look up `name` in `dict`: exact key first, then a normalized match
pub fn find_key<'a>(dict: &'a Dict, name: &str) -> Option<&'a Value> {
    if let Some(value) = dict.get(name) {
        return Some(value);
    }

    let wanted = normalize_key(name);
    dict.iter()
        .find(|(key, _)| normalize_key(key) == wanted)
        .map(|(_, value)| value)
}

/// Lowercase and drop `_` / `-`, so `PropInt`, `prop_int` and `PROP-INT` agree
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Toml};

    fn dict(entries: &[(&str, i32)]) -> Dict {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("PropInt"), "propint");
        assert_eq!(normalize_key("prop_int"), "propint");
        assert_eq!(normalize_key("PROP-INT"), "propint");
    }

    #[test]
    fn test_find_key_prefers_exact_match() {
        let d = dict(&[("propint", 1), ("PropInt", 2)]);
        let as_int = |v: Option<&Value>| v.and_then(|v| v.deserialize::<i32>().ok());
        assert_eq!(as_int(find_key(&d, "PropInt")), Some(2));
        assert_eq!(as_int(find_key(&d, "propint")), Some(1));
    }

    #[test]
    fn test_find_key_normalized() {
        let d = dict(&[("prop_int", 1)]);
        assert!(find_key(&d, "PropInt").is_some());
        assert!(find_key(&d, "PropIn").is_none());
    }

    #[test]
    fn test_dict_source() {
        let mut root = Dict::new();
        root.insert("Server".to_string(), Value::from(dict(&[("Port", 80)])));

        assert!(root.section("server").unwrap().is_some());
        assert!(root.section("Client").unwrap().is_none());
    }

    #[test]
    fn test_figment_source() {
        let figment = Figment::from(Toml::string("[Server]\nPort = 80\n"));

        let section = figment.section("Server").unwrap().unwrap();
        assert_eq!(section.as_dict().map(|d| d.len()), Some(1));
        assert!(figment.section("Missing").unwrap().is_none());
    }
}
