//! Language validation for converted text.
//!
//! Converters only ask one question: is this text written in one of the
//! expected languages? [`LanguageValidator`] is that seam. The default
//! [`WhatlangValidator`] answers it with trigram detection from `whatlang`.

/// Decides whether text is written in one of a set of languages.
pub trait LanguageValidator: Send + Sync {
    /// Return `true` if `text` is in one of `valid_languages` (ISO 639-1 codes).
    ///
    /// An empty `valid_languages` always validates.
    fn validate(&self, text: &str, valid_languages: &[String]) -> bool;
}

/// Validator backed by `whatlang` detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangValidator;

impl WhatlangValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }
}

impl LanguageValidator for WhatlangValidator {
    fn validate(&self, text: &str, valid_languages: &[String]) -> bool {
        if valid_languages.is_empty() {
            return true;
        }

        match detect_language(text) {
            Some(detected) => valid_languages
                .iter()
                .any(|code| code_matches(detected, code)),
            None => {
                log::debug!("Could not detect a language");
                false
            }
        }
    }
}

impl<F> LanguageValidator for F
where
    F: Fn(&str, &[String]) -> bool + Send + Sync,
{
    fn validate(&self, text: &str, valid_languages: &[String]) -> bool {
        self(text, valid_languages)
    }
}

/// Detect the dominant language of `text` as an ISO 639-1 code.
///
/// Returns `None` for text with no detectable language (empty, digits only).
///
/// # Example
/// ```
/// use textconv::language::detect_language;
///
/// let lang = detect_language("The quick brown fox jumps over the lazy dog and keeps running.");
/// assert_eq!(lang, Some("en"));
/// ```
pub fn detect_language(text: &str) -> Option<&'static str> {
    let info = whatlang::detect(text)?;
    iso639_1(info.lang().code())
}

/// Compare a detected ISO 639-1 code with a requested one.
///
/// Case-insensitive; a region suffix (`zh-cn`, `pt_BR`) compares on the primary
/// subtag, and `no` matches Norwegian Bokmål.
fn code_matches(detected: &str, requested: &str) -> bool {
    let requested = requested.trim().to_lowercase();
    let primary = requested
        .split(['-', '_'])
        .next()
        .unwrap_or(requested.as_str());
    let primary = if primary == "no" { "nb" } else { primary };
    primary == detected
}

/// Map a `whatlang` ISO 639-3 code to ISO 639-1.
fn iso639_1(code: &str) -> Option<&'static str> {
    let mapped = match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        _ => return None,
    };
    Some(mapped)
}
