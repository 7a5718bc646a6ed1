//! Sentiment analysis with best-effort spelling correction.
//!
//! Text is corrected first (directly for English, through an English
//! round trip or a misspelling table for other languages), then scored and
//! bucketed into positive, negative or neutral.

pub mod backend;
pub mod config;
pub mod correction;
pub mod error;
pub mod local;
pub mod remote;
pub mod sentiment;
pub mod session;

use language_utils::Language;
use serde::{Deserialize, Serialize};

pub use backend::{Backends, LanguageDetector, Scores, SentimentScorer, SpellCorrector, Translator};
pub use config::AnalyzerConfig;
pub use correction::{
    CorrectionMethod, CorrectionResult, PIVOT_LANGUAGE, SpanishStrategy, TextCorrector,
};
pub use error::{AnalyzeError, BackendError, ConfigError};
pub use sentiment::{AnalysisResult, Category, SentimentClassifier, Thresholds};
pub use session::Session;

/// Everything produced for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub language: Language,
    pub correction: CorrectionResult,
    pub sentiment: AnalysisResult,
}

#[derive(Debug)]
pub struct MoodAnalyzer {
    backends: Backends,
    config: AnalyzerConfig,
}

impl MoodAnalyzer {
    pub fn new(backends: Backends, config: AnalyzerConfig) -> Self {
        log::info!("Analyzer ready with {backends:?}");
        Self { backends, config }
    }

    /// Offline analyzer over the bundled backends.
    pub fn local(config: AnalyzerConfig) -> Result<Self, BackendError> {
        Ok(Self::new(Backends::local()?, config))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    pub fn corrector(&self) -> TextCorrector<'_> {
        TextCorrector::new(
            self.backends.corrector.as_ref(),
            self.backends.detector.as_ref(),
            self.backends.translator.as_deref(),
            self.config.spanish_strategy,
        )
    }

    pub fn classifier(&self) -> SentimentClassifier<'_> {
        SentimentClassifier::new(self.backends.scorer.as_ref(), self.config.thresholds)
    }

    /// Correct, then score the corrected text.
    ///
    /// `hint` takes precedence over the configured language. Blank input
    /// returns `Ok(None)` without touching any backend.
    pub fn analyze(
        &self,
        text: &str,
        hint: Option<Language>,
    ) -> Result<Option<Analysis>, AnalyzeError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let hint = hint.or(self.config.language);
        let corrector = self.corrector();

        let correction = if self.config.correct {
            corrector.correct(text, hint)
        } else {
            let language = corrector.resolve_language(text, hint);
            CorrectionResult::unchanged(text, language)
        };
        let language = correction.language;

        let scored_text = self.scoring_text(&correction.corrected, language);
        let sentiment = self
            .classifier()
            .classify(&scored_text)
            .map_err(AnalyzeError::Scoring)?;

        Ok(Some(Analysis {
            language,
            correction,
            sentiment,
        }))
    }

    /// The English translation of `text` when pivot scoring applies,
    /// otherwise `text` itself.
    fn scoring_text(&self, text: &str, language: Language) -> String {
        if !self.config.score_via_pivot || language == PIVOT_LANGUAGE {
            return text.to_string();
        }
        let Some(translator) = self.backends.translator.as_deref() else {
            return text.to_string();
        };
        match translator.translate(text, language, PIVOT_LANGUAGE) {
            Ok(translated) => {
                log::debug!("Scoring {PIVOT_LANGUAGE} translation: {translated}");
                translated
            }
            Err(e) => {
                log::warn!(
                    "Translating {language} text for scoring with {} failed, scoring as is: {e}",
                    translator.name()
                );
                text.to_string()
            }
        }
    }
}
