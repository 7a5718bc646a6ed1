//! Offline backends bundled with the crate.

pub mod lexicon;
pub mod spanish;
pub mod speller;

pub use lexicon::LexiconScorer;
pub use spanish::SpanishDictionary;
pub use speller::FrequencySpeller;

use language_utils::Language;

use crate::backend::{LanguageDetector, SpellCorrector};
use crate::error::BackendError;

/// Accent and stopword heuristic from `language_utils::detect`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicDetector;

impl LanguageDetector for HeuristicDetector {
    fn detect(&self, text: &str) -> Result<Option<Language>, BackendError> {
        Ok(language_utils::detect_language(text))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

/// English frequency speller plus the Spanish misspelling table.
#[derive(Debug, Clone)]
pub struct LocalCorrector {
    english: FrequencySpeller,
}

impl LocalCorrector {
    pub fn new() -> Self {
        Self {
            english: FrequencySpeller::english(),
        }
    }
}

impl Default for LocalCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpellCorrector for LocalCorrector {
    fn correct(&self, text: &str, language: Language) -> Result<String, BackendError> {
        match language {
            Language::English => self.english.correct(text, language),
            Language::Spanish => SpanishDictionary.correct(text, language),
            _ => Err(BackendError::UnsupportedLanguage {
                backend: self.name(),
                language,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
