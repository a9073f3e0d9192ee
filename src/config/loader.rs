//! Configuration Loader (Figment-based)
//!
//! Builds the configuration source from multiple providers, later ones
//! overriding earlier ones:
//! 1. Serialized defaults (optional)
//! 2. Settings files (`appsettings.toml`, `appsettings.json` or explicit paths)
//! 3. Environment variables (`AUTOCONF_<SECTION>__<KEY>`)
//!
//! Every provider's keys are folded through [`normalize_key`] before merging,
//! so `MyTestConfig.PropInt` from a file and `AUTOCONF_MYTESTCONFIG__PROPINT`
//! land on the same entry.

use std::env;
use std::path::{Path, PathBuf};

use figment::value::{Dict, Map, Value};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Json, Serialized, Toml},
};
use serde::Serialize;
use tracing::debug;

use super::source::normalize_key;
use crate::constants::loader::{DEFAULT_FILES, ENV_PREFIX, ENV_SEPARATOR};
use crate::types::{AutoconfError, Result};

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
        }
    }

    /// Load with the default resolution chain:
    /// working-directory settings files → env vars
    pub fn load() -> Result<Figment> {
        let mut loader = Self::new();
        for path in Self::default_paths() {
            if path.exists() {
                loader = loader.with_file(&path)?;
            }
        }
        Ok(loader.with_env(ENV_PREFIX).build())
    }

    /// Load explicit settings files, then env vars
    pub fn load_from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Figment> {
        let mut loader = Self::new();
        for path in paths {
            loader = loader.with_file(path.as_ref())?;
        }
        Ok(loader.with_env(ENV_PREFIX).build())
    }

    /// Merge serialized defaults (lowest priority when added first)
    pub fn with_defaults<T: Serialize>(mut self, defaults: T) -> Self {
        self.figment = self.figment.merge(FoldKeys(Serialized::defaults(defaults)));
        self
    }

    /// Merge a settings file, format chosen by extension
    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        self.figment = match extension.as_deref() {
            Some("toml") => {
                debug!("Loading TOML settings from: {}", path.display());
                self.figment.merge(FoldKeys(Toml::file(path)))
            }
            Some("json") => {
                debug!("Loading JSON settings from: {}", path.display());
                self.figment.merge(FoldKeys(Json::file(path)))
            }
            _ => {
                return Err(AutoconfError::Config(format!(
                    "Unsupported settings file (expected .toml or .json): {}",
                    path.display()
                )));
            }
        };
        Ok(self)
    }

    /// Merge env vars with `prefix`, nested keys split on `__`
    /// (e.g. AUTOCONF_MYTESTCONFIG__PROP_INT -> mytestconfig.propint)
    pub fn with_env(mut self, prefix: &str) -> Self {
        self.figment = self
            .figment
            .merge(FoldKeys(Env::prefixed(prefix).split(ENV_SEPARATOR)));
        self
    }

    pub fn build(self) -> Figment {
        self.figment
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Settings files looked up in the working directory, in merge order
    pub fn default_paths() -> Vec<PathBuf> {
        let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        DEFAULT_FILES.iter().map(|name| base.join(name)).collect()
    }
}

// =============================================================================
// Key Folding
// =============================================================================

/// Provider wrapper normalizing every key of the wrapped provider's data
struct FoldKeys<P>(P);

impl<P: Provider> Provider for FoldKeys<P> {
    fn metadata(&self) -> Metadata {
        self.0.metadata()
    }

    fn data(&self) -> std::result::Result<Map<Profile, Dict>, figment::Error> {
        let data = self.0.data()?;
        Ok(data
            .into_iter()
            .map(|(profile, dict)| (profile, fold_dict(dict)))
            .collect())
    }

    fn profile(&self) -> Option<Profile> {
        self.0.profile()
    }
}

fn fold_dict(dict: Dict) -> Dict {
    dict.into_iter()
        .map(|(key, value)| (normalize_key(&key), fold_value(value)))
        .collect()
}

fn fold_value(value: Value) -> Value {
    match value {
        Value::Dict(tag, dict) => Value::Dict(tag, fold_dict(dict)),
        Value::Array(tag, items) => Value::Array(tag, items.into_iter().map(fold_value).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use figment::Jail;
    use std::io::Write;

    fn int_at(figment: &Figment, section: &str, key: &str) -> Option<i64> {
        let section = figment.section(section).unwrap()?;
        let dict = section.as_dict()?;
        crate::config::find_key(dict, key)?.deserialize::<i64>().ok()
    }

    #[test]
    fn test_load_default_files_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "appsettings.toml",
                "[MyTestConfig]\nPropInt = 1\nPropString = \"toml\"\n",
            )?;
            jail.create_file("appsettings.json", r#"{"MyTestConfig": {"PropInt": 2}}"#)?;
            jail.set_env("AUTOCONF_MYTESTCONFIG__PROPBOOL", "true");

            let figment = ConfigLoader::load().expect("load");

            // json overrides toml
            assert_eq!(int_at(&figment, "MyTestConfig", "PropInt"), Some(2));
            let section = figment.section("MyTestConfig").unwrap().unwrap();
            let dict = section.as_dict().unwrap();
            assert!(crate::config::find_key(dict, "PropString").is_some());
            assert!(crate::config::find_key(dict, "PropBool").is_some());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file("appsettings.json", r#"{"Server": {"Port": 80}}"#)?;
            jail.set_env("AUTOCONF_SERVER__PORT", "8080");

            let figment = ConfigLoader::load().expect("load");
            assert_eq!(int_at(&figment, "Server", "Port"), Some(8080));
            Ok(())
        });
    }

    #[test]
    fn test_load_without_files() {
        Jail::expect_with(|_jail| {
            let figment = ConfigLoader::load().expect("load");
            assert!(figment.section("Anything").unwrap().is_none());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[Cache]\nSize = 64").unwrap();

        let figment = ConfigLoader::load_from_files(&[file.path()]).unwrap();
        assert_eq!(int_at(&figment, "Cache", "Size"), Some(64));
    }

    #[test]
    fn test_mixed_case_keys_merge() {
        Jail::expect_with(|jail| {
            jail.create_file("appsettings.toml", "[my_test_config]\nprop_int = 1\n")?;
            jail.create_file("appsettings.json", r#"{"MyTestConfig": {"PropInt": 2}}"#)?;

            let figment = ConfigLoader::load().expect("load");
            let root: Dict = figment.extract().expect("extract");
            assert_eq!(root.len(), 1);
            assert_eq!(int_at(&figment, "MyTestConfig", "PropInt"), Some(2));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigLoader::new()
            .with_file(Path::new("settings.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported settings file"));
    }

    #[test]
    fn test_defaults_are_overridden() {
        Jail::expect_with(|jail| {
            jail.create_file("appsettings.toml", "[Cache]\nSize = 2\n")?;

            let figment = ConfigLoader::new()
                .with_defaults(serde_json::json!({"Cache": {"Size": 1, "Ttl": 30}}))
                .with_file(Path::new("appsettings.toml"))
                .expect("toml file")
                .build();

            assert_eq!(int_at(&figment, "Cache", "Size"), Some(2));
            assert_eq!(int_at(&figment, "Cache", "Ttl"), Some(30));
            Ok(())
        });
    }
}
