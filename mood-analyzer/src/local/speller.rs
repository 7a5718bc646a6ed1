//! Frequency-list spelling correction.
//!
//! Words found in the list, and regular inflections of them (plurals, `-ed`,
//! `-ing`, `-er`, `-est`, `-ly`), are kept. Anything else is replaced by the
//! most frequent known word one edit away (delete, transpose, replace,
//! insert), then two edits away. Words with no known neighbour are left alone.

use std::collections::{HashMap, HashSet};

use language_utils::Language;
use language_utils::text_cleanup::{map_words, match_case};

use crate::backend::SpellCorrector;
use crate::error::BackendError;

const ENGLISH_WORDS: &str = include_str!("../../data/en_words.txt");

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

// edits2 grows quadratically with word length
const MAX_EDIT2_LEN: usize = 12;

const VERB_AND_ADJECTIVE_SUFFIXES: [&str; 4] = ["ed", "ing", "er", "est"];

#[derive(Debug, Clone)]
pub struct FrequencySpeller {
    language: Language,
    /// word -> weight, higher is more common
    frequencies: HashMap<String, u32>,
}

impl FrequencySpeller {
    /// Build from a list ordered from most to least frequent, one word per line.
    pub fn from_ranked_list(language: Language, list: &str) -> Self {
        let words: Vec<&str> = list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        let total = words.len() as u32;
        let mut frequencies = HashMap::with_capacity(words.len());
        for (rank, word) in words.into_iter().enumerate() {
            frequencies
                .entry(word.to_lowercase())
                .or_insert(total - rank as u32);
        }
        Self {
            language,
            frequencies,
        }
    }

    pub fn english() -> Self {
        Self::from_ranked_list(Language::English, ENGLISH_WORDS)
    }

    pub fn is_known(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.frequencies.contains_key(&lower) || self.is_inflection_of_known(&lower)
    }

    fn is_listed_stem(&self, stem: &str) -> bool {
        stem.len() >= 2 && self.frequencies.contains_key(stem)
    }

    /// `friends`, `parties`, `planned`, `baking`, `happily` and the like,
    /// for lowercase ASCII `word`.
    fn is_inflection_of_known(&self, word: &str) -> bool {
        let known = |stem: &str| self.is_listed_stem(stem);
        if let Some(stem) = word.strip_suffix("ies") {
            if known(&format!("{stem}y")) {
                return true;
            }
        }
        if word.strip_suffix("es").is_some_and(known) {
            return true;
        }
        if !word.ends_with("ss") && word.strip_suffix('s').is_some_and(known) {
            return true;
        }
        for suffix in VERB_AND_ADJECTIVE_SUFFIXES {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if known(stem) || known(&format!("{stem}e")) {
                return true;
            }
            // planned -> plan
            if let [.., a, b] = stem.as_bytes() {
                let doubled = a == b && !b"aeiou".contains(b) && stem.len() >= 3;
                if doubled && known(&stem[..stem.len() - 1]) {
                    return true;
                }
            }
            if let Some(root) = stem.strip_suffix('i') {
                if known(&format!("{root}y")) {
                    return true;
                }
            }
        }
        if let Some(stem) = word.strip_suffix("ly") {
            return known(stem)
                || stem
                    .strip_suffix('i')
                    .is_some_and(|root| known(&format!("{root}y")));
        }
        false
    }

    /// Correct a single word, keeping its capitalization.
    pub fn correct_word(&self, word: &str) -> String {
        let lower = word.to_lowercase().replace('\u{2019}', "'");
        if self.frequencies.contains_key(&lower)
            || lower.chars().count() < 2
            || !lower.chars().all(|c| c.is_ascii_lowercase())
            || self.is_inflection_of_known(&lower)
        {
            return word.to_string();
        }

        let edits = edits1(&lower);
        let best = self.most_frequent(edits.iter()).or_else(|| {
            if lower.len() > MAX_EDIT2_LEN {
                return None;
            }
            let second: Vec<String> = edits.iter().flat_map(|e| edits1(e)).collect();
            self.most_frequent(second.iter())
        });

        match best {
            Some(candidate) => {
                log::debug!("{word} -> {candidate}");
                match_case(word, candidate)
            }
            None => word.to_string(),
        }
    }

    fn most_frequent<'a, I>(&self, candidates: I) -> Option<&str>
    where
        I: Iterator<Item = &'a String>,
    {
        candidates
            .filter_map(|c| self.frequencies.get_key_value(c))
            .max_by_key(|(_, weight)| **weight)
            .map(|(word, _)| word.as_str())
    }
}

fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut edits = HashSet::with_capacity(54 * n + 25);
    for i in 0..=n {
        let (left, right) = chars.split_at(i);
        let left: String = left.iter().collect();
        if !right.is_empty() {
            // delete
            edits.insert(format!("{left}{}", right[1..].iter().collect::<String>()));
            // transpose
            if right.len() > 1 {
                edits.insert(format!(
                    "{left}{}{}{}",
                    right[1],
                    right[0],
                    right[2..].iter().collect::<String>()
                ));
            }
            // replace
            for c in ALPHABET.chars() {
                edits.insert(format!("{left}{c}{}", right[1..].iter().collect::<String>()));
            }
        }
        // insert
        let rest: String = right.iter().collect();
        for c in ALPHABET.chars() {
            edits.insert(format!("{left}{c}{rest}"));
        }
    }
    edits
}

impl SpellCorrector for FrequencySpeller {
    fn correct(&self, text: &str, language: Language) -> Result<String, BackendError> {
        if language != self.language {
            return Err(BackendError::UnsupportedLanguage {
                backend: self.name(),
                language,
            });
        }
        Ok(map_words(text, |word| self.correct_word(word)))
    }

    fn name(&self) -> &'static str {
        "frequency-speller"
    }
}
