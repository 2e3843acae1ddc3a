//! Plain-text file converter.

use crate::cleanup::clean_pages;
use crate::decode;
use crate::error::Result;
use crate::language::{LanguageValidator, WhatlangValidator};
use crate::model::{Document, Meta, Page};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::{ConvertOverrides, ConvertResult, ConverterConfig, DocumentConverter};

/// Plain-text converter.
///
/// Splits a file into form-feed delimited pages, optionally drops numeric
/// table rows, and emits exactly one document per file.
#[derive(Clone)]
pub struct TextConverter {
    config: ConverterConfig,
    validator: Arc<dyn LanguageValidator>,
}

impl TextConverter {
    /// Create a text converter with default configuration.
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Create a text converter with the given instance defaults.
    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            config,
            validator: Arc::new(WhatlangValidator::new()),
        }
    }

    /// Replace the language validator.
    pub fn with_validator(mut self, validator: impl LanguageValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Convert a file and report cleaning statistics.
    pub fn convert_with_stats(
        &self,
        path: &Path,
        meta: Option<Meta>,
        overrides: &ConvertOverrides,
    ) -> Result<ConvertResult> {
        let options = overrides.resolve(&self.config);

        let raw = decode::read_text(path, &options.encoding)?;
        let pages = Page::split_pages(&raw);
        let cleaned = clean_pages(&pages, options.remove_numeric_tables, path);
        let text = cleaned.text();

        if !options.valid_languages.is_empty()
            && !self.validator.validate(&text, &options.valid_languages)
        {
            log::warn!(
                "The language for {} is not one of {:?}. The file may not have been decoded in the correct text format.",
                path.display(),
                options.valid_languages
            );
        }

        let document = Document::new(text, meta.unwrap_or_default(), options.id_hash_keys);
        Ok(ConvertResult::new(vec![document], cleaned.stats))
    }
}

impl Default for TextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextConverter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DocumentConverter for TextConverter {
    fn name(&self) -> &str {
        "text"
    }

    fn convert(
        &self,
        path: &Path,
        meta: Option<Meta>,
        overrides: &ConvertOverrides,
    ) -> Result<Vec<Document>> {
        self.convert_with_stats(path, meta, overrides)
            .map(ConvertResult::into_documents)
    }
}
