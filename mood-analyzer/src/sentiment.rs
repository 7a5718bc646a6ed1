use serde::{Deserialize, Serialize};

use crate::backend::SentimentScorer;
use crate::error::{BackendError, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Neutral => "neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Positive => "😊",
            Category::Negative => "😔",
            Category::Neutral => "😐",
        }
    }

    /// e.g. "😊 Positive Sentiment"
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Positive => "Positive",
            Category::Negative => "Negative",
            Category::Neutral => "Neutral",
        };
        write!(f, "{} {name} Sentiment", self.emoji())
    }
}

/// Symmetric category bands: Positive at `polarity >= t`, Negative at
/// `polarity <= -t`, Neutral in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Thresholds {
    positive: f64,
}

impl Thresholds {
    /// ±0.5
    pub const WIDE: Thresholds = Thresholds { positive: 0.5 };
    /// ±0.1
    pub const NARROW: Thresholds = Thresholds { positive: 0.1 };

    pub fn symmetric(threshold: f64) -> Result<Self, ConfigError> {
        if threshold > 0.0 && threshold <= 1.0 {
            Ok(Self {
                positive: threshold,
            })
        } else {
            Err(ConfigError::InvalidThreshold(threshold.to_string()))
        }
    }

    pub fn positive(&self) -> f64 {
        self.positive
    }

    pub fn negative(&self) -> f64 {
        -self.positive
    }

    pub fn categorize(&self, polarity: f64) -> Category {
        if polarity >= self.positive() {
            Category::Positive
        } else if polarity <= self.negative() {
            Category::Negative
        } else {
            Category::Neutral
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::WIDE
    }
}

impl std::str::FromStr for Thresholds {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wide" => Ok(Thresholds::WIDE),
            "narrow" => Ok(Thresholds::NARROW),
            other => other
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidThreshold(s.to_string()))
                .and_then(Thresholds::symmetric),
        }
    }
}

impl std::fmt::Display for Thresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Thresholds::WIDE {
            write!(f, "wide")
        } else if *self == Thresholds::NARROW {
            write!(f, "narrow")
        } else {
            write!(f, "{}", self.positive)
        }
    }
}

impl TryFrom<String> for Thresholds {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Thresholds> for String {
    fn from(value: Thresholds) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub polarity: f64,
    pub subjectivity: f64,
    pub category: Category,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores text through a [`SentimentScorer`] and buckets the polarity.
pub struct SentimentClassifier<'a> {
    scorer: &'a dyn SentimentScorer,
    thresholds: Thresholds,
}

impl<'a> SentimentClassifier<'a> {
    pub fn new(scorer: &'a dyn SentimentScorer, thresholds: Thresholds) -> Self {
        Self { scorer, thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Scorer errors are returned as is.
    pub fn classify(&self, text: &str) -> Result<AnalysisResult, BackendError> {
        let scores = self.scorer.score(text)?;
        let polarity = round2(scores.polarity);
        let subjectivity = round2(scores.subjectivity);
        let category = self.thresholds.categorize(polarity);
        log::debug!(
            "{} scored polarity={polarity} subjectivity={subjectivity} -> {}",
            self.scorer.name(),
            category.as_str()
        );
        Ok(AnalysisResult {
            polarity,
            subjectivity,
            category,
        })
    }
}
