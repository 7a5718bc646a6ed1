use language_utils::Language;
use serde::{Deserialize, Serialize};

use crate::correction::SpanishStrategy;
use crate::error::ConfigError;
use crate::sentiment::Thresholds;

pub const THRESHOLDS_VAR: &str = "MOOD_THRESHOLDS";
pub const CORRECT_VAR: &str = "MOOD_CORRECT";
pub const SPANISH_STRATEGY_VAR: &str = "MOOD_SPANISH_STRATEGY";
pub const SCORE_VIA_PIVOT_VAR: &str = "MOOD_SCORE_VIA_PIVOT";
pub const LANGUAGE_VAR: &str = "MOOD_LANGUAGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub thresholds: Thresholds,
    /// Run spelling correction before scoring.
    pub correct: bool,
    pub spanish_strategy: SpanishStrategy,
    /// Score the English translation of non-English text when a translator
    /// is available.
    pub score_via_pivot: bool,
    /// Skip detection and treat every submission as this language.
    pub language: Option<Language>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            correct: true,
            spanish_strategy: SpanishStrategy::default(),
            score_via_pivot: true,
            language: None,
        }
    }
}

impl AnalyzerConfig {
    /// Defaults overridden by whichever `MOOD_*` variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(THRESHOLDS_VAR) {
            config.thresholds = value.parse()?;
        }
        if let Some(value) = lookup(CORRECT_VAR) {
            config.correct = parse_flag(CORRECT_VAR, &value)?;
        }
        if let Some(value) = lookup(SPANISH_STRATEGY_VAR) {
            config.spanish_strategy = value.parse()?;
        }
        if let Some(value) = lookup(SCORE_VIA_PIVOT_VAR) {
            config.score_via_pivot = parse_flag(SCORE_VIA_PIVOT_VAR, &value)?;
        }
        if let Some(value) = lookup(LANGUAGE_VAR) {
            if !value.trim().is_empty() {
                config.language = Some(value.trim().parse()?);
            }
        }
        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}
