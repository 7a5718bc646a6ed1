//! Best-effort spelling correction.
//!
//! English goes straight to the spelling backend. Other languages are
//! translated to English, corrected there and translated back; Spanish can
//! additionally (or instead) go through the fixed misspelling table. Every
//! backend failure falls through to the next strategy and finally to the
//! original text, so [`TextCorrector::correct`] never fails.

use language_utils::{Language, LanguagePair};
use language_utils::text_cleanup::eq_ignore_case;
use serde::{Deserialize, Serialize};

use crate::backend::{self, LanguageDetector, SpellCorrector, Translator};
use crate::error::{BackendError, ConfigError};
use crate::local::spanish;

/// Language corrections are routed through when the source isn't English.
pub const PIVOT_LANGUAGE: Language = Language::English;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanishStrategy {
    /// Misspelling table only, no translation.
    Dictionary,
    /// Translation round trip only.
    RoundTrip,
    /// Misspelling table, then a round trip on its output.
    #[default]
    DictionaryThenRoundTrip,
}

impl std::str::FromStr for SpanishStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "dictionary" => Ok(SpanishStrategy::Dictionary),
            "round-trip" => Ok(SpanishStrategy::RoundTrip),
            "dictionary-then-round-trip" => Ok(SpanishStrategy::DictionaryThenRoundTrip),
            _ => Err(ConfigError::InvalidSpanishStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for SpanishStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpanishStrategy::Dictionary => "dictionary",
            SpanishStrategy::RoundTrip => "round-trip",
            SpanishStrategy::DictionaryThenRoundTrip => "dictionary-then-round-trip",
        };
        write!(f, "{name}")
    }
}

/// Which path produced the corrected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionMethod {
    /// Blank input or correction disabled; no backend was called.
    Unchanged,
    Direct,
    Dictionary,
    RoundTrip,
    /// Every strategy failed; the original text is returned.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub original: String,
    pub corrected: String,
    /// Case-insensitive inequality of `original` and `corrected`.
    pub changed: bool,
    pub language: Language,
    pub method: CorrectionMethod,
}

impl CorrectionResult {
    pub fn new(
        original: &str,
        corrected: String,
        language: Language,
        method: CorrectionMethod,
    ) -> Self {
        Self {
            changed: !eq_ignore_case(original, &corrected),
            original: original.to_string(),
            corrected,
            language,
            method,
        }
    }

    pub fn unchanged(original: &str, language: Language) -> Self {
        Self::new(
            original,
            original.to_string(),
            language,
            CorrectionMethod::Unchanged,
        )
    }
}

pub struct TextCorrector<'a> {
    speller: &'a dyn SpellCorrector,
    detector: &'a dyn LanguageDetector,
    translator: Option<&'a dyn Translator>,
    strategy: SpanishStrategy,
}

impl<'a> TextCorrector<'a> {
    pub fn new(
        speller: &'a dyn SpellCorrector,
        detector: &'a dyn LanguageDetector,
        translator: Option<&'a dyn Translator>,
        strategy: SpanishStrategy,
    ) -> Self {
        Self {
            speller,
            detector,
            translator,
            strategy,
        }
    }

    /// The hint if given, otherwise the detector's guess; English when
    /// neither knows.
    pub fn resolve_language(&self, text: &str, hint: Option<Language>) -> Language {
        if let Some(language) = hint {
            return language;
        }
        match self.detector.detect(text) {
            Ok(Some(language)) => language,
            Ok(None) => PIVOT_LANGUAGE,
            Err(e) => {
                log::warn!(
                    "Language detection with {} failed, assuming {PIVOT_LANGUAGE}: {e}",
                    self.detector.name()
                );
                PIVOT_LANGUAGE
            }
        }
    }

    pub fn correct(&self, text: &str, hint: Option<Language>) -> CorrectionResult {
        if text.trim().is_empty() {
            return CorrectionResult::unchanged(text, hint.unwrap_or(PIVOT_LANGUAGE));
        }
        let language = self.resolve_language(text, hint);

        if language == PIVOT_LANGUAGE {
            return match self.speller.correct(text, language) {
                Ok(corrected) => {
                    CorrectionResult::new(text, corrected, language, CorrectionMethod::Direct)
                }
                Err(e) => {
                    log::warn!("Correction with {} failed: {e}", self.speller.name());
                    CorrectionResult::new(
                        text,
                        text.to_string(),
                        language,
                        CorrectionMethod::Fallback,
                    )
                }
            };
        }

        let (source, dictionary_applied) = match (language, self.strategy) {
            (Language::Spanish, SpanishStrategy::Dictionary) => {
                let corrected = spanish::correct_misspellings(text);
                return CorrectionResult::new(
                    text,
                    corrected,
                    language,
                    CorrectionMethod::Dictionary,
                );
            }
            (Language::Spanish, SpanishStrategy::DictionaryThenRoundTrip) => {
                (spanish::correct_misspellings(text), true)
            }
            _ => (text.to_string(), false),
        };

        match self.round_trip(&source, language) {
            Ok(corrected) => {
                return CorrectionResult::new(
                    text,
                    corrected,
                    language,
                    CorrectionMethod::RoundTrip,
                );
            }
            Err(e) => log::warn!("Correction round trip for {language} failed: {e}"),
        }

        match self.speller.correct(&source, language) {
            Ok(corrected) => {
                return CorrectionResult::new(text, corrected, language, CorrectionMethod::Direct);
            }
            Err(e) => log::warn!(
                "Direct {language} correction with {} failed: {e}",
                self.speller.name()
            ),
        }

        if dictionary_applied {
            CorrectionResult::new(text, source, language, CorrectionMethod::Dictionary)
        } else {
            CorrectionResult::new(text, source, language, CorrectionMethod::Fallback)
        }
    }

    /// source -> pivot, correct in the pivot language, pivot -> source.
    fn round_trip(&self, text: &str, source: Language) -> Result<String, BackendError> {
        let translator = self.translator.ok_or(BackendError::NoTranslator)?;
        backend::round_trip(
            translator,
            text,
            LanguagePair::new(source, PIVOT_LANGUAGE),
            |pivot_text| self.speller.correct(pivot_text, PIVOT_LANGUAGE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::IdentityTranslator;
    use crate::local::{FrequencySpeller, HeuristicDetector, LocalCorrector};

    #[test]
    fn test_result_changed_is_case_insensitive() {
        let same = CorrectionResult::new(
            "hello",
            "Hello".into(),
            Language::English,
            CorrectionMethod::Direct,
        );
        assert!(!same.changed);
        let fixed = CorrectionResult::new(
            "hapy",
            "happy".into(),
            Language::English,
            CorrectionMethod::Direct,
        );
        assert!(fixed.changed);
    }

    #[test]
    fn test_spanish_strategy_parse() {
        assert_eq!(
            "round_trip".parse::<SpanishStrategy>().unwrap(),
            SpanishStrategy::RoundTrip
        );
        assert_eq!(
            SpanishStrategy::default().to_string(),
            "dictionary-then-round-trip"
        );
        assert!("guess".parse::<SpanishStrategy>().is_err());
    }

    #[test]
    fn test_english_goes_direct() {
        let speller = FrequencySpeller::english();
        let corrector = TextCorrector::new(
            &speller,
            &HeuristicDetector,
            None,
            SpanishStrategy::default(),
        );
        let result = corrector.correct("I am feeling very hapy", None);
        assert_eq!(result.corrected, "I am feeling very happy");
        assert_eq!(result.method, CorrectionMethod::Direct);
        assert_eq!(result.language, Language::English);
        assert!(result.changed);
    }

    #[test]
    fn test_spanish_dictionary_then_failed_round_trip_keeps_dictionary_output() {
        let speller = LocalCorrector::new();
        let corrector = TextCorrector::new(
            &speller,
            &HeuristicDetector,
            None,
            SpanishStrategy::DictionaryThenRoundTrip,
        );
        // no translator: the round trip fails, direct Spanish correction
        // goes through the local table again
        let result = corrector.correct("estoi mui felis", Some(Language::Spanish));
        assert_eq!(result.corrected, "estoy muy feliz");
        assert_eq!(result.method, CorrectionMethod::Direct);
    }

    #[test]
    fn test_untranslated_round_trip_keeps_source_words() {
        let speller = FrequencySpeller::english();
        let corrector = TextCorrector::new(
            &speller,
            &HeuristicDetector,
            Some(&IdentityTranslator),
            SpanishStrategy::RoundTrip,
        );
        let text = "hola amigos, estoy muy feliz";
        let result = corrector.correct(text, Some(Language::Spanish));
        assert_eq!(result.corrected, text);
        assert!(!result.changed);
        // the English speller can't take Spanish directly either
        assert_eq!(result.method, CorrectionMethod::Fallback);
    }

    #[test]
    fn test_untranslated_round_trip_falls_back_to_spanish_table() {
        let speller = LocalCorrector::new();
        let corrector = TextCorrector::new(
            &speller,
            &HeuristicDetector,
            Some(&IdentityTranslator),
            SpanishStrategy::RoundTrip,
        );
        let result = corrector.correct("hola amigos, estoi mui felis", Some(Language::Spanish));
        assert_eq!(result.corrected, "hola amigos, estoy muy feliz");
        assert_eq!(result.method, CorrectionMethod::Direct);
    }
}
