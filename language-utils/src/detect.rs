//! Lightweight language guessing for short user submissions.
//!
//! This is a heuristic, not a classifier: it only distinguishes Spanish from
//! English. Text is Spanish if it contains a Spanish-specific character, or if
//! more than [`STOPWORD_RATIO`] of its words are common Spanish function
//! words. Everything else is English.

use unicode_normalization::UnicodeNormalization;

use crate::Language;
use crate::text_cleanup::words;

/// Share of words that must be Spanish stopwords for the text to count as Spanish.
pub const STOPWORD_RATIO: f64 = 0.3;

const SPANISH_MARKERS: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'ñ', 'ü', '¿', '¡'];

// Words shared with English ("a", "no", "me", "he") are left out so short
// English sentences don't cross the threshold.
const SPANISH_STOPWORDS: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "los", "se", "del", "las", "un", "por", "con", "una",
    "su", "para", "es", "al", "lo", "como", "mas", "pero", "sus", "le", "ya", "este", "si",
    "porque", "esta", "entre", "cuando", "muy", "sin", "sobre", "tambien", "hasta", "hay",
    "donde", "quien", "desde", "todo", "nos", "durante", "todos", "uno", "les", "ni", "contra",
    "otros", "ese", "eso", "ante", "ellos", "esto", "antes", "algunos", "unos", "yo", "otro",
    "otras", "otra", "tanto", "esa", "estos", "mucho", "nada", "muchos", "poco", "ella", "estar",
    "algo", "nosotros", "mi", "mis", "tu", "te", "ti", "tus", "ellas", "estoy", "estamos", "estan",
    "soy", "eres", "somos", "son", "fue", "hola", "pues", "bien", "gracias", "hoy",
];

/// Returns `true` if the text contains a character only Spanish uses among
/// the supported languages (accented vowels, `ñ`, inverted punctuation).
pub fn has_spanish_markers(text: &str) -> bool {
    text.nfc()
        .flat_map(char::to_lowercase)
        .any(|c| SPANISH_MARKERS.contains(&c))
}

/// Fraction of words in `text` that are Spanish stopwords, ignoring accents.
///
/// Returns `0.0` for text without words.
pub fn spanish_stopword_ratio(text: &str) -> f64 {
    let words = words(text);
    if words.is_empty() {
        return 0.0;
    }
    let hits = words
        .iter()
        .filter(|word| {
            let folded = crate::text_cleanup::fold_accents(&word.to_lowercase());
            SPANISH_STOPWORDS.contains(&folded.as_str())
        })
        .count();
    hits as f64 / words.len() as f64
}

/// Guess the language of `text`.
///
/// Returns `None` for text with no letters at all, so callers can fall back to
/// their own default.
pub fn detect_language(text: &str) -> Option<Language> {
    if !text.chars().any(char::is_alphabetic) {
        return None;
    }
    if has_spanish_markers(text) || spanish_stopword_ratio(text) > STOPWORD_RATIO {
        Some(Language::Spanish)
    } else {
        Some(Language::English)
    }
}
