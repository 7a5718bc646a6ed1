use language_utils::{Language, LanguagePair};

/// A failed call into a scoring, correction, translation or detection backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("malformed response from {service}: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    #[error("{backend} does not support {language}")]
    UnsupportedLanguage {
        backend: &'static str,
        language: Language,
    },

    #[error("{0} not set")]
    MissingCredentials(&'static str),

    #[error("no translator configured")]
    NoTranslator,

    #[error("{translator} returned the text untranslated for {pair}")]
    Untranslated {
        translator: &'static str,
        pair: LanguagePair,
    },

    #[error("cache I/O error")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Failure of a full analysis. Only scoring can fail; correction always
/// falls back to the original text.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("sentiment scoring failed")]
    Scoring(#[source] BackendError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid threshold {0:?}: expected \"wide\", \"narrow\" or a number in (0, 1]")]
    InvalidThreshold(String),

    #[error("invalid Spanish strategy {0:?}")]
    InvalidSpanishStrategy(String),

    #[error("invalid boolean {value:?} for {key}")]
    InvalidFlag { key: &'static str, value: String },

    #[error(transparent)]
    UnknownLanguage(#[from] language_utils::UnknownLanguage),
}
