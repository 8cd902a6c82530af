//! Engine configuration
//!
//! Configuration is plain data with serde defaults for every field, so a TOML
//! document only needs the keys it wants to change:
//!
//! ```toml
//! binding = "first-child-only"
//! fill_mode = "append"
//! strict_fields = true
//! length_unit = "px"
//! id_prefix = "kd"
//! ```
//!
//! A missing file yields the defaults; a file that fails to parse is an error.

use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which children `Container::set_data` binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingPolicy {
    /// Every child whose field is defined in the record is bound
    #[default]
    AllMatching,
    /// Only the first child is considered; later children are left alone
    FirstChildOnly,
}

/// What `List` does with rows already rendered when new records arrive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillMode {
    /// Discard existing rows, then render one row per record
    #[default]
    Replace,
    /// Keep existing rows and append one row per record
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub binding: BindingPolicy,
    pub fill_mode: FillMode,
    /// Fail with `UnresolvedField` instead of skipping missing record fields
    pub strict_fields: bool,
    /// Unit appended to bare numeric lengths
    pub length_unit: String,
    /// Prefix of issued identifiers
    pub id_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            binding: BindingPolicy::default(),
            fill_mode: FillMode::default(),
            strict_fields: false,
            length_unit: "px".to_string(),
            id_prefix: "kd".to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .inspect_err(|e| warn!(target: "kdui.config", error = %e, "config_parse_failed"))
            .context("invalid kdui configuration")?;
        debug!(target: "kdui.config", ?config, "config_parsed");
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults when it does not exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(target: "kdui.config", path = %path.display(), "config_missing_using_defaults");
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn with_binding(mut self, binding: BindingPolicy) -> Self {
        self.binding = binding;
        self
    }

    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn with_strict_fields(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }

    pub fn with_length_unit(mut self, unit: impl Into<String>) -> Self {
        self.length_unit = unit.into();
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.binding, BindingPolicy::AllMatching);
        assert_eq!(config.fill_mode, FillMode::Replace);
        assert!(!config.strict_fields);
        assert_eq!(config.length_unit, "px");
        assert_eq!(config.id_prefix, "kd");
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            "binding = \"first-child-only\"\nfill_mode = \"append\"\nstrict_fields = true\n",
        )
        .unwrap();

        assert_eq!(config.binding, BindingPolicy::FirstChildOnly);
        assert_eq!(config.fill_mode, FillMode::Append);
        assert!(config.strict_fields);
        assert_eq!(config.length_unit, "px");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::from_toml_str("binding = \"sometimes\"").is_err());
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kdui.toml");

        let missing = Config::load_from(&path).unwrap();
        assert_eq!(missing, Config::default());

        std::fs::write(&path, "length_unit = \"rem\"\nid_prefix = \"w\"\n").unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.length_unit, "rem");
        assert_eq!(loaded.id_prefix, "w");
    }

    #[test]
    fn test_missing_file_is_logged() {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = BufferWriter {
            inner: Arc::clone(&buf),
        };
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();

        let dir = tempfile::tempdir().unwrap();
        with_default(subscriber, || {
            Config::load_from(dir.path().join("absent.toml")).unwrap();
        });

        let output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(output.contains("config_missing_using_defaults"));
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_binding(BindingPolicy::FirstChildOnly)
            .with_fill_mode(FillMode::Append)
            .with_strict_fields(true)
            .with_length_unit("em")
            .with_id_prefix("x");

        assert_eq!(config.binding, BindingPolicy::FirstChildOnly);
        assert_eq!(config.fill_mode, FillMode::Append);
        assert!(config.strict_fields);
        assert_eq!(config.length_unit, "em");
        assert_eq!(config.id_prefix, "x");
    }
}
