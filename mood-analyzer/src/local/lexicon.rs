//! Lexicon-based sentiment scoring.
//!
//! Each known word carries a polarity, a subjectivity and an intensity.
//! Modifiers ("very", "slightly") scale the next scored word by their
//! intensity; a negation ("not", "isn't") multiplies the next scored word's
//! polarity by -0.5. The text's scores are the mean over all assessed words.

use std::collections::HashMap;

use language_utils::text_cleanup::{Token, tokenize};
use serde::Deserialize;

use crate::backend::{Scores, SentimentScorer};
use crate::error::BackendError;

const ENGLISH_LEXICON: &str = include_str!("../../data/en_lexicon.json");

const NEGATIONS: &[&str] = &["not", "never", "no", "nothing", "nobody", "neither", "nor"];

const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    #[serde(default)]
    pub modifier: bool,
}

fn default_intensity() -> f64 {
    1.0
}

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    entries: HashMap<String, LexiconEntry>,
}

/// A modifier that hasn't found a word to modify yet.
struct Pending {
    entry: LexiconEntry,
    intensity: f64,
}

impl LexiconScorer {
    pub fn new(entries: HashMap<String, LexiconEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self, BackendError> {
        let entries: HashMap<String, LexiconEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// The bundled English lexicon.
    pub fn english() -> Result<Self, BackendError> {
        Self::from_json(ENGLISH_LEXICON)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-word `(polarity, subjectivity)` assessments, in text order.
    pub fn assessments(&self, text: &str) -> Vec<(f64, f64)> {
        let mut assessments = Vec::new();
        let mut negated = false;
        let mut pending: Option<Pending> = None;

        let push = |assessments: &mut Vec<(f64, f64)>, mut p: f64, s: f64, negated: &mut bool| {
            if *negated {
                p *= NEGATION_FACTOR;
                *negated = false;
            }
            assessments.push((p.clamp(-1.0, 1.0), s.clamp(0.0, 1.0)));
        };

        for token in tokenize(text) {
            let word = match token {
                Token::Word(word) => word.to_lowercase().replace('\u{2019}', "'"),
                Token::Separator(separator) => {
                    if separator.contains(['.', '!', '?', ';', ',']) {
                        if let Some(m) = pending.take() {
                            push(
                                &mut assessments,
                                m.entry.polarity,
                                m.entry.subjectivity,
                                &mut negated,
                            );
                        }
                        negated = false;
                    }
                    continue;
                }
            };

            if NEGATIONS.contains(&word.as_str()) || word.ends_with("n't") {
                negated = true;
                continue;
            }

            match self.entries.get(&word) {
                Some(entry) if entry.modifier => {
                    pending = Some(match pending.take() {
                        Some(previous) => Pending {
                            entry: *entry,
                            intensity: previous.intensity * entry.intensity,
                        },
                        None => Pending {
                            entry: *entry,
                            intensity: entry.intensity,
                        },
                    });
                }
                Some(entry) => {
                    let scale = pending.take().map_or(1.0, |m| m.intensity);
                    push(
                        &mut assessments,
                        entry.polarity * scale,
                        entry.subjectivity * scale,
                        &mut negated,
                    );
                }
                None => {
                    if let Some(m) = pending.take() {
                        push(
                            &mut assessments,
                            m.entry.polarity,
                            m.entry.subjectivity,
                            &mut negated,
                        );
                    }
                }
            }
        }
        if let Some(m) = pending.take() {
            push(
                &mut assessments,
                m.entry.polarity,
                m.entry.subjectivity,
                &mut negated,
            );
        }
        assessments
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<Scores, BackendError> {
        let assessments = self.assessments(text);
        if assessments.is_empty() {
            return Ok(Scores {
                polarity: 0.0,
                subjectivity: 0.0,
            });
        }
        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;
        Ok(Scores {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        })
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
