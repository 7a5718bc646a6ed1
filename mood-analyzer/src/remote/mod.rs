//! HTTP backends. Both use a blocking `reqwest` client.

pub mod google_translate;
pub mod languagetool;

use std::path::PathBuf;
use std::sync::Arc;

pub use google_translate::GoogleTranslator;
pub use languagetool::LanguageTool;

use crate::backend::Backends;
use crate::error::BackendError;
use crate::local::LexiconScorer;

pub const CACHE_DIR_VAR: &str = "MOOD_CACHE_DIR";

const TIMEOUT_SECS: u64 = 20;

/// `MOOD_CACHE_DIR`, or `.mood-cache` in the working directory.
pub fn cache_dir_from_env() -> PathBuf {
    std::env::var(CACHE_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".mood-cache"))
}

/// Google Translate for translation and detection, LanguageTool for
/// correction. Scoring stays on the bundled lexicon, fed with English
/// translations.
pub fn backends_from_env() -> Result<Backends, BackendError> {
    let google = Arc::new(GoogleTranslator::from_env(
        cache_dir_from_env().join("google_translate"),
    )?);
    Ok(Backends {
        scorer: Box::new(LexiconScorer::english()?),
        corrector: Box::new(LanguageTool::from_env()?),
        detector: Box::new(Arc::clone(&google)),
        translator: Some(Box::new(google)),
    })
}
