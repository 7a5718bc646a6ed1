//! Capability traits for the external collaborators.
//!
//! Scoring, spelling correction, translation and language detection are all
//! delegated. The classifier and corrector only ever see these traits, so any
//! backend (the bundled heuristics, a remote API, a test double) can be
//! swapped in.

use std::sync::Arc;

use language_utils::{Language, LanguagePair};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Raw output of a sentiment scorer, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// -1 (negative) to 1 (positive)
    pub polarity: f64,
    /// 0 (objective) to 1 (subjective)
    pub subjectivity: f64,
}

pub trait SentimentScorer {
    fn score(&self, text: &str) -> Result<Scores, BackendError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

pub trait SpellCorrector {
    /// Return `text` with spelling fixed. Backends that can't handle
    /// `language` return [`BackendError::UnsupportedLanguage`].
    fn correct(&self, text: &str, language: Language) -> Result<String, BackendError>;

    fn name(&self) -> &'static str;
}

pub trait Translator {
    fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, BackendError>;

    fn name(&self) -> &'static str;
}

pub trait LanguageDetector {
    /// `Ok(None)` means the backend could not tell, or answered with a
    /// language this crate doesn't know.
    fn detect(&self, text: &str) -> Result<Option<Language>, BackendError>;

    fn name(&self) -> &'static str;
}

impl<T: Translator + ?Sized> Translator for Arc<T> {
    fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, BackendError> {
        (**self).translate(text, source, target)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// lets one client serve as both translator and detector
impl<T: LanguageDetector + ?Sized> LanguageDetector for Arc<T> {
    fn detect(&self, text: &str) -> Result<Option<Language>, BackendError> {
        (**self).detect(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Translator that hands text back untouched.
///
/// Useful offline and in tests. [`round_trip`] rejects its output as
/// untranslated, so correction through it falls back to the source language.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(
        &self,
        text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<String, BackendError> {
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Translate `text` along `pair`, apply `fix` to the translation and
/// translate the result back.
///
/// A first leg that returns the text unchanged is an error: `fix` expects
/// `pair.target_language` and would rewrite source-language words.
pub fn round_trip<F>(
    translator: &dyn Translator,
    text: &str,
    pair: LanguagePair,
    fix: F,
) -> Result<String, BackendError>
where
    F: FnOnce(&str) -> Result<String, BackendError>,
{
    if pair.is_identity() {
        return fix(text);
    }
    let there = translator.translate(text, pair.source_language, pair.target_language)?;
    if there.trim() == text.trim() {
        return Err(BackendError::Untranslated {
            translator: translator.name(),
            pair,
        });
    }
    let fixed = fix(&there)?;
    log::debug!("Round trip {pair} fixed {there:?} to {fixed:?}");
    let back = pair.reversed();
    translator.translate(&fixed, back.source_language, back.target_language)
}

/// The full set of collaborators an analyzer works with.
pub struct Backends {
    pub scorer: Box<dyn SentimentScorer>,
    pub corrector: Box<dyn SpellCorrector>,
    pub detector: Box<dyn LanguageDetector>,
    pub translator: Option<Box<dyn Translator>>,
}

impl Backends {
    /// Bundled offline backends: lexicon scorer, frequency speller backed by
    /// the Spanish dictionary, heuristic detector, no translator.
    pub fn local() -> Result<Self, BackendError> {
        Ok(Self {
            scorer: Box::new(crate::local::LexiconScorer::english()?),
            corrector: Box::new(crate::local::LocalCorrector::new()),
            detector: Box::new(crate::local::HeuristicDetector),
            translator: None,
        })
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("scorer", &self.scorer.name())
            .field("corrector", &self.corrector.name())
            .field("detector", &self.detector.name())
            .field("translator", &self.translator.as_ref().map(|t| t.name()))
            .finish()
    }
}
