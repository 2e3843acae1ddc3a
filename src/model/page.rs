//! Page-level types.

use serde::{Deserialize, Serialize};

/// Page delimiter in plain-text sources.
pub const FORM_FEED: char = '\u{000C}';

/// A form-feed delimited segment of a text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: usize,

    /// Lines on the page, without terminators
    pub lines: Vec<String>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }

    /// Build a page from raw text, splitting it into lines.
    pub fn from_text(number: usize, text: &str) -> Self {
        Self {
            number,
            lines: split_lines(text).into_iter().map(String::from).collect(),
        }
    }

    /// Split raw file content into pages on the form-feed character.
    ///
    /// Always yields at least one page; empty input gives one empty page.
    pub fn split_pages(text: &str) -> Vec<Page> {
        text.split(FORM_FEED)
            .enumerate()
            .map(|(i, page)| Page::from_text(i + 1, page))
            .collect()
    }

    /// Add a line to the page.
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with single newlines, no trailing newline.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split text into lines on universal line boundaries.
///
/// `\r\n` counts as one boundary. Terminators are not kept, and a trailing
/// terminator does not produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{001C}'
            | '\u{001D}'
            | '\u{001E}'
            | '\u{0085}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
