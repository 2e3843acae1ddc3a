//! File converters turning source files into [`Document`]s.
//!
//! A converter carries immutable [`ConverterConfig`] defaults fixed at
//! construction. Each call may pass [`ConvertOverrides`]; they are merged once
//! into [`ResolvedOptions`] before any work happens.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use textconv::convert::{ConvertOverrides, ConverterConfig, DocumentConverter, TextConverter};
//!
//! fn main() -> textconv::Result<()> {
//!     let converter = TextConverter::with_config(
//!         ConverterConfig::new().with_valid_languages(["en"]),
//!     );
//!
//!     let overrides = ConvertOverrides::new().with_remove_numeric_tables(true);
//!     let docs = converter.convert(Path::new("report.txt"), None, &overrides)?;
//!     println!("{}", docs[0].content());
//!     Ok(())
//! }
//! ```

mod options;
mod text;

pub use options::{ConvertOverrides, ConverterConfig, ResolvedOptions};
pub use text::TextConverter;

use crate::cleanup::{expand_ligatures, ConversionStats};
use crate::error::{Error, Result};
use crate::model::{Document, Meta};
use std::path::{Path, PathBuf};

/// Result of converting one file, with statistics.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted documents (one per file for text sources)
    pub documents: Vec<Document>,

    /// What the cleaning pass did
    pub stats: ConversionStats,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(documents: Vec<Document>, stats: ConversionStats) -> Self {
        Self { documents, stats }
    }

    /// Discard statistics and keep the documents.
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

/// Metadata for a batch of files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BatchMeta {
    /// No metadata
    #[default]
    None,

    /// The same metadata for every file
    Shared(Meta),

    /// One metadata map per file, in path order
    PerFile(Vec<Meta>),
}

impl BatchMeta {
    /// Expand into one entry per file.
    ///
    /// Fails when a per-file list does not match `files`.
    pub fn for_files(self, files: usize) -> Result<Vec<Option<Meta>>> {
        match self {
            BatchMeta::None => Ok(vec![None; files]),
            BatchMeta::Shared(meta) => Ok(vec![Some(meta); files]),
            BatchMeta::PerFile(metas) if metas.len() == files => {
                Ok(metas.into_iter().map(Some).collect())
            }
            BatchMeta::PerFile(metas) => Err(Error::MetaCountMismatch {
                files,
                metas: metas.len(),
            }),
        }
    }
}

/// Trait for file converters.
pub trait DocumentConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert one file into documents.
    fn convert(
        &self,
        path: &Path,
        meta: Option<Meta>,
        overrides: &ConvertOverrides,
    ) -> Result<Vec<Document>>;

    /// Convert several files in order and expand ligatures in each result.
    ///
    /// Pass [`KNOWN_LIGATURES`](crate::cleanup::KNOWN_LIGATURES) for the
    /// standard table or an empty slice to leave content untouched. Stops at
    /// the first file that fails.
    fn run(
        &self,
        paths: &[PathBuf],
        meta: BatchMeta,
        overrides: &ConvertOverrides,
        ligatures: &[(&str, &str)],
    ) -> Result<Vec<Document>> {
        let metas = meta.for_files(paths.len())?;
        let mut documents = Vec::with_capacity(paths.len());

        for (path, file_meta) in paths.iter().zip(metas) {
            log::debug!("{}: converting {}", self.name(), path.display());
            for document in self.convert(path, file_meta, overrides)? {
                let expanded = expand_ligatures(document.content(), ligatures);
                if expanded == document.content() {
                    documents.push(document);
                } else {
                    documents.push(document.with_content(expanded));
                }
            }
        }

        Ok(documents)
    }
}
