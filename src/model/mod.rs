//! Document model types for converted text.
//!
//! A source file is read into [`Page`]s, cleaned, and emitted as a single
//! [`Document`] whose id is derived from the attributes the caller selects.

mod document;
mod page;

pub use document::{ContentType, Document, IdHashKey, Meta};
pub use page::{split_lines, Page, FORM_FEED};
