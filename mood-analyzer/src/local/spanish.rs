//! Fixed table of common Spanish misspellings and chat abbreviations.

use language_utils::Language;
use language_utils::text_cleanup::{map_words, match_case};

use crate::backend::SpellCorrector;
use crate::error::BackendError;

/// (misspelled, corrected), lowercase. Ambiguous forms ("mas"/"más",
/// "esta"/"está") are deliberately absent.
const MISSPELLINGS: &[(&str, &str)] = &[
    ("ablar", "hablar"),
    ("alegria", "alegría"),
    ("aser", "hacer"),
    ("asi", "así"),
    ("bamos", "vamos"),
    ("bn", "bien"),
    ("boi", "voy"),
    ("dia", "día"),
    ("dias", "días"),
    ("dificil", "difícil"),
    ("ermoso", "hermoso"),
    ("estoi", "estoy"),
    ("exelente", "excelente"),
    ("facil", "fácil"),
    ("felis", "feliz"),
    ("felisidad", "felicidad"),
    ("grasias", "gracias"),
    ("increible", "increíble"),
    ("io", "yo"),
    ("k", "que"),
    ("kiero", "quiero"),
    ("llo", "yo"),
    ("mui", "muy"),
    ("nose", "no sé"),
    ("ola", "hola"),
    ("orible", "horrible"),
    ("orrible", "horrible"),
    ("oy", "hoy"),
    ("porfavor", "por favor"),
    ("pq", "porque"),
    ("q", "que"),
    ("qiero", "quiero"),
    ("tambien", "también"),
    ("tmb", "también"),
    ("trabaho", "trabajo"),
    ("tranqilo", "tranquilo"),
    ("travajo", "trabajo"),
    ("tristesa", "tristeza"),
    ("triztesa", "tristeza"),
    ("vien", "bien"),
    ("vueno", "bueno"),
    ("xq", "porque"),
];

/// Look up the correction for one word, ignoring case.
pub fn lookup(word: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    MISSPELLINGS
        .binary_search_by(|(wrong, _)| (*wrong).cmp(lower.as_str()))
        .ok()
        .map(|index| MISSPELLINGS[index].1)
}

/// Replace every known misspelling in `text`, keeping each word's capitalization.
pub fn correct_misspellings(text: &str) -> String {
    map_words(text, |word| match lookup(word) {
        Some(fixed) => match_case(word, fixed),
        None => word.to_string(),
    })
}

/// [`SpellCorrector`] over the misspelling table. Spanish only.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpanishDictionary;

impl SpellCorrector for SpanishDictionary {
    fn correct(&self, text: &str, language: Language) -> Result<String, BackendError> {
        if language != Language::Spanish {
            return Err(BackendError::UnsupportedLanguage {
                backend: self.name(),
                language,
            });
        }
        Ok(correct_misspellings(text))
    }

    fn name(&self) -> &'static str {
        "spanish-dictionary"
    }
}
