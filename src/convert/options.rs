//! Converter configuration and per-call overrides.

use crate::decode::DEFAULT_ENCODING;
use crate::error::Result;
use crate::model::IdHashKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Instance-level defaults, fixed when a converter is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Drop lines that look like rows of a numeric table
    pub remove_numeric_tables: bool,

    /// ISO 639-1 codes the text is expected to be in (empty = no check)
    pub valid_languages: Vec<String>,

    /// Document attributes that feed the identity hash
    pub id_hash_keys: Vec<IdHashKey>,

    /// Text encoding label of source files
    pub encoding: String,
}

impl ConverterConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable numeric-table removal.
    pub fn with_remove_numeric_tables(mut self, remove: bool) -> Self {
        self.remove_numeric_tables = remove;
        self
    }

    /// Set the expected languages.
    pub fn with_valid_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the identity hash keys.
    pub fn with_id_hash_keys(mut self, keys: Vec<IdHashKey>) -> Self {
        self.id_hash_keys = keys;
        self
    }

    /// Set the default source encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            remove_numeric_tables: false,
            valid_languages: Vec::new(),
            id_hash_keys: IdHashKey::default_keys(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

/// Per-call settings; `None` falls back to the converter's [`ConverterConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOverrides {
    /// Override numeric-table removal
    pub remove_numeric_tables: Option<bool>,

    /// Override the expected languages
    pub valid_languages: Option<Vec<String>>,

    /// Override the identity hash keys
    pub id_hash_keys: Option<Vec<IdHashKey>>,

    /// Override the source encoding
    pub encoding: Option<String>,
}

impl ConvertOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override numeric-table removal.
    pub fn with_remove_numeric_tables(mut self, remove: bool) -> Self {
        self.remove_numeric_tables = Some(remove);
        self
    }

    /// Override the expected languages.
    pub fn with_valid_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Override the identity hash keys.
    pub fn with_id_hash_keys(mut self, keys: Vec<IdHashKey>) -> Self {
        self.id_hash_keys = Some(keys);
        self
    }

    /// Override the source encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Merge with instance defaults. Values set here always win.
    pub fn resolve(&self, config: &ConverterConfig) -> ResolvedOptions {
        ResolvedOptions {
            remove_numeric_tables: self
                .remove_numeric_tables
                .unwrap_or(config.remove_numeric_tables),
            valid_languages: self
                .valid_languages
                .clone()
                .unwrap_or_else(|| config.valid_languages.clone()),
            id_hash_keys: self
                .id_hash_keys
                .clone()
                .unwrap_or_else(|| config.id_hash_keys.clone()),
            encoding: self
                .encoding
                .clone()
                .unwrap_or_else(|| config.encoding.clone()),
        }
    }
}

/// Fully resolved settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Drop numeric-table rows
    pub remove_numeric_tables: bool,

    /// Expected languages (empty = no check)
    pub valid_languages: Vec<String>,

    /// Identity hash keys for the output document
    pub id_hash_keys: Vec<IdHashKey>,

    /// Source encoding label
    pub encoding: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert!(!config.remove_numeric_tables);
        assert!(config.valid_languages.is_empty());
        assert_eq!(config.id_hash_keys, vec![IdHashKey::Content]);
        assert_eq!(config.encoding, "utf-8");
    }

    #[test]
    fn test_config_builder() {
        let config = ConverterConfig::new()
            .with_remove_numeric_tables(true)
            .with_valid_languages(["en", "de"])
            .with_id_hash_keys(vec![IdHashKey::Content, IdHashKey::Meta])
            .with_encoding("latin-1");

        assert!(config.remove_numeric_tables);
        assert_eq!(config.valid_languages, vec!["en", "de"]);
        assert_eq!(config.id_hash_keys.len(), 2);
        assert_eq!(config.encoding, "latin-1");
    }

    #[test]
    fn test_empty_overrides_use_config() {
        let config = ConverterConfig::new()
            .with_remove_numeric_tables(true)
            .with_valid_languages(["en"]);
        let resolved = ConvertOverrides::new().resolve(&config);

        assert!(resolved.remove_numeric_tables);
        assert_eq!(resolved.valid_languages, vec!["en"]);
        assert_eq!(resolved.id_hash_keys, vec![IdHashKey::Content]);
        assert_eq!(resolved.encoding, "utf-8");
    }

    #[test]
    fn test_overrides_win_over_config() {
        let config = ConverterConfig::new()
            .with_remove_numeric_tables(true)
            .with_valid_languages(["en"]);
        let overrides = ConvertOverrides::new()
            .with_remove_numeric_tables(false)
            .with_valid_languages(Vec::<String>::new())
            .with_id_hash_keys(vec![IdHashKey::Meta])
            .with_encoding("utf-16le");
        let resolved = overrides.resolve(&config);

        assert!(!resolved.remove_numeric_tables);
        assert!(resolved.valid_languages.is_empty());
        assert_eq!(resolved.id_hash_keys, vec![IdHashKey::Meta]);
        assert_eq!(resolved.encoding, "utf-16le");
    }

    #[test]
    fn test_config_from_json_partial() {
        let config =
            ConverterConfig::from_json_str(r#"{"remove_numeric_tables": true, "id_hash_keys": ["content", "meta"]}"#)
                .unwrap();
        assert!(config.remove_numeric_tables);
        assert_eq!(config.id_hash_keys, vec![IdHashKey::Content, IdHashKey::Meta]);
        assert_eq!(config.encoding, "utf-8");
    }

    #[test]
    fn test_config_from_json_rejects_unknown_key() {
        let result = ConverterConfig::from_json_str(r#"{"id_hash_keys": ["embedding"]}"#);
        assert!(result.is_err());
    }
}
