//! Word-level text utilities
//!
//! Corrections are applied word by word while everything between words
//! (spaces, punctuation, emoji) is carried through untouched. The helpers here
//! split text into that shape and put it back together.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A slice of the input: either a word or the run of characters between words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Separator(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Word(s) | Token::Separator(s) => s,
        }
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Split text into words and separators.
///
/// A word is a run of letters (combining marks included). An apostrophe
/// between two letters stays inside the word, so "don't" is one word.
/// Concatenating the `as_str()` of every token reproduces the input exactly.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let is_word_char = |i: usize| -> bool {
        let c = chars[i].1;
        if c.is_alphabetic() || (is_combining_mark(c) && i > 0) {
            return true;
        }
        is_apostrophe(c)
            && i > 0
            && i + 1 < chars.len()
            && chars[i - 1].1.is_alphabetic()
            && chars[i + 1].1.is_alphabetic()
    };

    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_word = None;
    for i in 0..chars.len() {
        let word_char = is_word_char(i);
        match in_word {
            None => in_word = Some(word_char),
            Some(current) if current != word_char => {
                let (offset, _) = chars[i];
                let slice = &text[start..offset];
                tokens.push(if current {
                    Token::Word(slice)
                } else {
                    Token::Separator(slice)
                });
                start = offset;
                in_word = Some(word_char);
            }
            Some(_) => {}
        }
    }
    if let Some(current) = in_word {
        let slice = &text[start..];
        tokens.push(if current {
            Token::Word(slice)
        } else {
            Token::Separator(slice)
        });
    }
    tokens
}

/// The words of `text`, in order.
pub fn words(text: &str) -> Vec<&str> {
    tokenize(text)
        .into_iter()
        .filter_map(|token| match token {
            Token::Word(word) => Some(word),
            Token::Separator(_) => None,
        })
        .collect()
}

/// Rebuild `text` with every word passed through `f`, keeping separators.
pub fn map_words<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut result = String::with_capacity(text.len());
    for token in tokenize(text) {
        match token {
            Token::Word(word) => result.push_str(&f(word)),
            Token::Separator(separator) => result.push_str(separator),
        }
    }
    result
}

/// Give `replacement` the capitalization pattern of `template`.
///
/// - All-caps templates of two or more letters ("HAPY") produce all caps
/// - A leading capital ("Hapy") capitalizes the first letter
/// - Anything else returns the replacement as given
pub fn match_case(template: &str, replacement: &str) -> String {
    let letters: Vec<char> = template.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    if letters.first().is_some_and(|c| c.is_uppercase()) {
        return capitalize(replacement);
    }
    replacement.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip diacritics: "también" becomes "tambien".
pub fn fold_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Case-insensitive comparison used to decide whether a correction changed anything.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
