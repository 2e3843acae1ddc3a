//! Reading text files in a caller-selected encoding.

use crate::error::{Error, Result};
use encoding_rs::{DecoderResult, Encoding, UTF_8};
use std::fs;
use std::path::Path;

/// Encoding used when the caller does not name one.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// A resolved source encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// 7-bit ASCII; bytes above 0x7F are dropped
    Ascii,

    /// ISO-8859-1; each byte is the code point of the same value
    Latin1,

    /// UTF-8 with one leading byte order mark stripped
    Utf8Sig,

    /// Any encoding from the WHATWG label table
    Whatwg(&'static Encoding),
}

impl SourceEncoding {
    /// Canonical name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Ascii => "ascii",
            SourceEncoding::Latin1 => "latin-1",
            SourceEncoding::Utf8Sig => "utf-8-sig",
            SourceEncoding::Whatwg(encoding) => encoding.name(),
        }
    }
}

/// Look up an encoding by label.
///
/// `ascii`, `latin-1` and `utf-8-sig` (in any of their usual spellings) are
/// decoded literally. Everything else goes through the WHATWG label table
/// (`utf-8`, `windows-1252`, `shift_jis`, ...), also accepting `_` for `-`.
///
/// # Example
/// ```
/// use textconv::decode::{resolve_encoding, SourceEncoding};
///
/// let encoding = resolve_encoding("UTF_8").unwrap();
/// assert_eq!(encoding.name(), "UTF-8");
/// assert_eq!(resolve_encoding("latin-1").unwrap(), SourceEncoding::Latin1);
/// ```
pub fn resolve_encoding(label: &str) -> Result<SourceEncoding> {
    let label = label.trim();
    let dashed = label.replace('_', "-");
    let compact = dashed.replace('-', "").to_ascii_lowercase();

    match compact.as_str() {
        "ascii" | "usascii" | "646" | "us" => return Ok(SourceEncoding::Ascii),
        "latin1" | "latin" | "l1" | "iso88591" | "8859" | "cp819" => {
            return Ok(SourceEncoding::Latin1)
        }
        "utf8sig" => return Ok(SourceEncoding::Utf8Sig),
        _ => {}
    }

    [label, dashed.as_str(), compact.as_str()]
        .iter()
        .find_map(|candidate| Encoding::for_label(candidate.as_bytes()))
        .map(SourceEncoding::Whatwg)
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decode bytes, dropping anything that is malformed in `encoding`.
///
/// A UTF-8 byte order mark is kept as U+FEFF unless the encoding is
/// [`SourceEncoding::Utf8Sig`]; other WHATWG encodings consume theirs.
pub fn decode_ignoring_errors(bytes: &[u8], encoding: SourceEncoding) -> String {
    match encoding {
        SourceEncoding::Ascii => {
            let kept: String = bytes
                .iter()
                .filter(|b| b.is_ascii())
                .map(|&b| char::from(b))
                .collect();
            log_dropped(bytes.len() - kept.len(), encoding);
            kept
        }
        SourceEncoding::Latin1 => encoding_rs::mem::decode_latin1(bytes).into_owned(),
        SourceEncoding::Utf8Sig => {
            let body = bytes.strip_prefix(UTF_8_BOM).unwrap_or(bytes);
            decode_whatwg(body, UTF_8)
        }
        SourceEncoding::Whatwg(encoding) => decode_whatwg(bytes, encoding),
    }
}

const UTF_8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn decode_whatwg(bytes: &[u8], encoding: &'static Encoding) -> String {
    let mut decoder = if encoding == UTF_8 {
        encoding.new_decoder_without_bom_handling()
    } else {
        encoding.new_decoder()
    };

    let mut output = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len()),
    );
    let mut input = bytes;
    let mut dropped = 0usize;

    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut output, true);
        input = &input[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(input.len())
                    .unwrap_or(input.len());
                output.reserve(needed.max(16));
            }
            DecoderResult::Malformed(len, _) => dropped += usize::from(len),
        }
    }

    log_dropped(dropped, SourceEncoding::Whatwg(encoding));
    output
}

fn log_dropped(dropped: usize, encoding: SourceEncoding) {
    if dropped > 0 {
        log::debug!("Dropped {} undecodable bytes ({})", dropped, encoding.name());
    }
}

/// Read a whole file and decode it with the encoding named by `label`.
pub fn read_text<P: AsRef<Path>>(path: P, label: &str) -> Result<String> {
    let encoding = resolve_encoding(label)?;
    let bytes = fs::read(path)?;
    Ok(decode_ignoring_errors(&bytes, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, UTF_16LE, WINDOWS_1252};

    fn utf8() -> SourceEncoding {
        SourceEncoding::Whatwg(UTF_8)
    }

    #[test]
    fn test_resolve_common_labels() {
        assert_eq!(resolve_encoding("utf-8").unwrap(), utf8());
        assert_eq!(resolve_encoding("UTF8").unwrap(), utf8());
        assert_eq!(resolve_encoding("utf_8").unwrap(), utf8());
        assert_eq!(
            resolve_encoding("windows-1252").unwrap(),
            SourceEncoding::Whatwg(WINDOWS_1252)
        );
        assert_eq!(
            resolve_encoding("shift_jis").unwrap(),
            SourceEncoding::Whatwg(SHIFT_JIS)
        );
    }

    #[test]
    fn test_resolve_literal_labels() {
        assert_eq!(resolve_encoding("ascii").unwrap(), SourceEncoding::Ascii);
        assert_eq!(resolve_encoding("US-ASCII").unwrap(), SourceEncoding::Ascii);
        assert_eq!(resolve_encoding("latin-1").unwrap(), SourceEncoding::Latin1);
        assert_eq!(resolve_encoding("latin_1").unwrap(), SourceEncoding::Latin1);
        assert_eq!(resolve_encoding("ISO-8859-1").unwrap(), SourceEncoding::Latin1);
        assert_eq!(resolve_encoding("utf-8-sig").unwrap(), SourceEncoding::Utf8Sig);
        assert_eq!(resolve_encoding("utf_8_sig").unwrap(), SourceEncoding::Utf8Sig);
    }

    #[test]
    fn test_resolve_unknown_label() {
        let result = resolve_encoding("klingon-8");
        assert!(matches!(result, Err(Error::UnknownEncoding(label)) if label == "klingon-8"));
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let bytes = b"caf\xC3\xA9 \xFF\xFEok";
        assert_eq!(decode_ignoring_errors(bytes, utf8()), "café ok");
    }

    #[test]
    fn test_truncated_sequence_at_end_is_dropped() {
        let bytes = b"abc\xE2\x82";
        assert_eq!(decode_ignoring_errors(bytes, utf8()), "abc");
    }

    #[test]
    fn test_utf8_bom_is_kept() {
        let bytes = b"\xEF\xBB\xBFhi";
        assert_eq!(decode_ignoring_errors(bytes, utf8()), "\u{FEFF}hi");
    }

    #[test]
    fn test_utf8_sig_strips_one_bom() {
        let bytes = b"\xEF\xBB\xBFhi";
        assert_eq!(decode_ignoring_errors(bytes, SourceEncoding::Utf8Sig), "hi");
        let twice = b"\xEF\xBB\xBF\xEF\xBB\xBFhi";
        assert_eq!(
            decode_ignoring_errors(twice, SourceEncoding::Utf8Sig),
            "\u{FEFF}hi"
        );
        assert_eq!(decode_ignoring_errors(b"plain", SourceEncoding::Utf8Sig), "plain");
    }

    #[test]
    fn test_ascii_drops_high_bytes() {
        let bytes = b"caf\xe9 \x80ok";
        assert_eq!(decode_ignoring_errors(bytes, SourceEncoding::Ascii), "caf ok");
    }

    #[test]
    fn test_latin1_maps_bytes_to_code_points() {
        assert_eq!(
            decode_ignoring_errors(b"\x80\x93", SourceEncoding::Latin1),
            "\u{0080}\u{0093}"
        );
        assert_eq!(
            decode_ignoring_errors(b"caf\xe9", SourceEncoding::Latin1),
            "café"
        );
    }

    #[test]
    fn test_windows_1252() {
        let bytes = b"na\xEFve \x80";
        assert_eq!(
            decode_ignoring_errors(bytes, SourceEncoding::Whatwg(WINDOWS_1252)),
            "naïve €"
        );
    }

    #[test]
    fn test_utf16le() {
        let bytes = [0x68, 0x00, 0x69, 0x00];
        assert_eq!(
            decode_ignoring_errors(&bytes, SourceEncoding::Whatwg(UTF_16LE)),
            "hi"
        );
    }

    #[test]
    fn test_read_text_missing_file() {
        let result = read_text("/definitely/not/here.txt", DEFAULT_ENCODING);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
