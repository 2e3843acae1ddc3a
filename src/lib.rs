//! # textconv
//!
//! Plain-text file conversion for document pipelines.
//!
//! A text file is read in a chosen encoding, split into pages on form feeds,
//! optionally stripped of lines that look like numeric table rows, checked
//! against a set of expected languages, and returned as a single [`Document`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use textconv::{convert_file_with_config, ConverterConfig};
//!
//! fn main() -> textconv::Result<()> {
//!     let config = ConverterConfig::new()
//!         .with_remove_numeric_tables(true)
//!         .with_valid_languages(["en"]);
//!
//!     let docs = convert_file_with_config("annual_report.txt", config)?;
//!     println!("{} ({})", docs[0].content(), docs[0].id());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Encoding selection**: WHATWG labels plus literal `ascii`/`latin-1`/`utf-8-sig`, undecodable bytes dropped
//! - **Numeric-table filter**: drops rows of figures, keeps sentences
//! - **Language validation**: pluggable [`LanguageValidator`], `whatlang` by default
//! - **Content identity**: document ids hashed from selected attributes
//! - **Batch runs**: sequential conversion with ligature expansion

pub mod cleanup;
pub mod convert;
pub mod decode;
pub mod error;
pub mod language;
pub mod model;

// Re-export commonly used types
pub use cleanup::{ConversionStats, KNOWN_LIGATURES};
pub use convert::{
    BatchMeta, ConvertOverrides, ConvertResult, ConverterConfig, DocumentConverter,
    ResolvedOptions, TextConverter,
};
pub use error::{Error, Result};
pub use language::{detect_language, LanguageValidator, WhatlangValidator};
pub use model::{ContentType, Document, IdHashKey, Meta, Page};

use std::path::Path;

/// Convert a text file with default settings.
///
/// # Example
///
/// ```no_run
/// use textconv::convert_file;
///
/// let docs = convert_file("notes.txt").unwrap();
/// assert_eq!(docs.len(), 1);
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    TextConverter::new().convert(path.as_ref(), None, &ConvertOverrides::default())
}

/// Convert a text file with the given converter defaults.
pub fn convert_file_with_config<P: AsRef<Path>>(
    path: P,
    config: ConverterConfig,
) -> Result<Vec<Document>> {
    TextConverter::with_config(config).convert(path.as_ref(), None, &ConvertOverrides::default())
}

/// Extract the cleaned text of a file.
///
/// # Example
///
/// ```no_run
/// use textconv::extract_text;
///
/// let text = extract_text("notes.txt").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let documents = convert_file(path)?;
    Ok(documents
        .into_iter()
        .map(Document::into_content)
        .collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_convert_file_missing_path() {
        let result = convert_file("/no/such/dir/file.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_convert_file_defaults_keep_numbers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.txt");
        fs::write(&path, "1 2 3\nwords").unwrap();

        let docs = convert_file(&path).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content(), "1 2 3\nwords");
        assert!(docs[0].meta().is_empty());
    }

    #[test]
    fn test_convert_file_with_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.txt");
        fs::write(&path, "1 2 3\nwords").unwrap();

        let config = ConverterConfig::new().with_remove_numeric_tables(true);
        let docs = convert_file_with_config(&path, config).unwrap();
        assert_eq!(docs[0].content(), "words");
    }

    #[test]
    fn test_extract_text_joins_pages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pages.txt");
        fs::write(&path, "page1\u{000C}page2").unwrap();

        assert_eq!(extract_text(&path).unwrap(), "page1page2");
    }
}
