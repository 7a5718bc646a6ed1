use std::collections::HashMap;

use language_utils::Language;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::AnalyzeError;
use crate::{Analysis, MoodAnalyzer};

/// Memoizes analyses for the lifetime of one interactive session.
pub struct Session<'a> {
    analyzer: &'a MoodAnalyzer,
    cache: HashMap<u64, Analysis>,
}

impl<'a> Session<'a> {
    pub fn new(analyzer: &'a MoodAnalyzer) -> Self {
        Self {
            analyzer,
            cache: HashMap::new(),
        }
    }

    pub fn analyzer(&self) -> &MoodAnalyzer {
        self.analyzer
    }

    /// Like [`MoodAnalyzer::analyze`], but a repeated `(hint, text)` pair is
    /// answered from memory. Errors are not remembered.
    pub fn analyze(
        &mut self,
        text: &str,
        hint: Option<Language>,
    ) -> Result<Option<Analysis>, AnalyzeError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let key = cache_key(text, hint);
        if let Some(analysis) = self.cache.get(&key) {
            log::debug!("Session cache hit for {key:016x}");
            return Ok(Some(analysis.clone()));
        }
        let analysis = self.analyzer.analyze(text, hint)?;
        if let Some(analysis) = &analysis {
            self.cache.insert(key, analysis.clone());
        }
        Ok(analysis)
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn cache_key(text: &str, hint: Option<Language>) -> u64 {
    let hint = hint.map(|language| language.iso_639_1()).unwrap_or("auto");
    xxh3_64(format!("{hint}::{text}").as_bytes())
}
