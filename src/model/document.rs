//! Document record and identity hashing.

use crate::error::{Error, Result};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Caller-supplied document metadata.
///
/// A `BTreeMap` keeps key order stable, which the identity hash relies on.
pub type Meta = BTreeMap<String, String>;

/// Kind of content carried by a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Plain text
    #[default]
    Text,
}

impl ContentType {
    /// Name used in serialized output and identity hashing.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document attribute that contributes to the identity hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdHashKey {
    /// The document text
    Content,
    /// The content type name
    ContentType,
    /// The metadata map
    Meta,
}

impl IdHashKey {
    /// Attribute name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdHashKey::Content => "content",
            IdHashKey::ContentType => "content_type",
            IdHashKey::Meta => "meta",
        }
    }

    /// Keys used when the caller selects none: the content alone.
    pub fn default_keys() -> Vec<IdHashKey> {
        vec![IdHashKey::Content]
    }
}

impl FromStr for IdHashKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "content" => Ok(IdHashKey::Content),
            "content_type" => Ok(IdHashKey::ContentType),
            "meta" => Ok(IdHashKey::Meta),
            _ => Err(Error::InvalidIdHashKey(s.to_string())),
        }
    }
}

impl fmt::Display for IdHashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A converted document.
///
/// The `id` is derived from the attributes named in `id_hash_keys` when the
/// document is built, so documents are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    content: String,
    content_type: ContentType,
    meta: Meta,
    id_hash_keys: Vec<IdHashKey>,
}

impl Document {
    /// Build a text document and compute its identity hash.
    pub fn new(content: impl Into<String>, meta: Meta, id_hash_keys: Vec<IdHashKey>) -> Self {
        let content = content.into();
        let content_type = ContentType::Text;
        let id = compute_id(&content, content_type, &meta, &id_hash_keys);
        Self {
            id,
            content,
            content_type,
            meta,
            id_hash_keys,
        }
    }

    /// Build a text document hashed on its content only.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self::new(content, Meta::new(), IdHashKey::default_keys())
    }

    /// Rebuild this document with new content, recomputing the id.
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self::new(content, self.meta, self.id_hash_keys)
    }

    /// Identity hash (lowercase hex).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Document text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content type.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Metadata map.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Attributes the id was derived from.
    pub fn id_hash_keys(&self) -> &[IdHashKey] {
        &self.id_hash_keys
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Consume the document and return its content.
    pub fn into_content(self) -> String {
        self.content
    }
}

fn compute_id(
    content: &str,
    content_type: ContentType,
    meta: &Meta,
    id_hash_keys: &[IdHashKey],
) -> String {
    let mut hasher = Md5::new();
    for key in id_hash_keys {
        match key {
            IdHashKey::Content => hasher.update(content.as_bytes()),
            IdHashKey::ContentType => hasher.update(content_type.as_str().as_bytes()),
            // A string-to-string map always serializes
            IdHashKey::Meta => {
                hasher.update(serde_json::to_string(meta).unwrap_or_default().as_bytes())
            }
        }
    }
    format!("{:x}", hasher.finalize())
}
