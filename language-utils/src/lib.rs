pub mod detect;
pub mod text_cleanup;

pub use detect::detect_language;

#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Portuguese,
    Italian,
}

impl Language {
    pub fn iso_639_3(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Spanish => "spa",
            Language::French => "fra",
            Language::German => "deu",
            Language::Portuguese => "por",
            Language::Italian => "ita",
        }
    }

    pub fn iso_639_1(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Portuguese => "pt",
            Language::Italian => "it",
        }
    }

    /// Look up a language by its two-letter code.
    ///
    /// Region suffixes are ignored, so `"en-US"` and `"es_MX"` resolve too.
    pub fn from_iso_639_1(code: &str) -> Option<Language> {
        let base = code
            .split(['-', '_'])
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase();
        LANGUAGES
            .iter()
            .copied()
            .find(|language| language.iso_639_1() == base)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Spanish => write!(f, "Spanish"),
            Language::French => write!(f, "French"),
            Language::German => write!(f, "German"),
            Language::Portuguese => write!(f, "Portuguese"),
            Language::Italian => write!(f, "Italian"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl std::fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown language: {:?}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts ISO 639-1 codes (with optional region), ISO 639-3 codes and
    /// English names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(language) = Language::from_iso_639_1(trimmed) {
            return Ok(language);
        }
        let lowered = trimmed.to_lowercase();
        LANGUAGES
            .iter()
            .copied()
            .find(|language| {
                language.iso_639_3() == lowered || language.to_string().to_lowercase() == lowered
            })
            .ok_or_else(|| UnknownLanguage(trimmed.to_string()))
    }
}

/// A source/target pair for a translation step.
#[derive(Copy, Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePair {
    pub source_language: Language,
    pub target_language: Language,
}

impl LanguagePair {
    pub fn new(source_language: Language, target_language: Language) -> Self {
        Self {
            source_language,
            target_language,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            source_language: self.target_language,
            target_language: self.source_language,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.source_language == self.target_language
    }
}

impl std::fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}->{}",
            self.source_language.iso_639_1(),
            self.target_language.iso_639_1()
        )
    }
}

pub const LANGUAGES: &[Language] = &[
    Language::English,
    Language::Spanish,
    Language::French,
    Language::German,
    Language::Portuguese,
    Language::Italian,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iso_639_1_ignores_region() {
        assert_eq!(Language::from_iso_639_1("en-US"), Some(Language::English));
        assert_eq!(Language::from_iso_639_1("es_MX"), Some(Language::Spanish));
        assert_eq!(Language::from_iso_639_1("ES"), Some(Language::Spanish));
        assert_eq!(Language::from_iso_639_1("ko"), None);
    }

    #[test]
    fn test_parse_language_names_and_codes() {
        assert_eq!("spa".parse::<Language>(), Ok(Language::Spanish));
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert_eq!(" fr ".parse::<Language>(), Ok(Language::French));
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_pair_reversed() {
        let pair = LanguagePair::new(Language::Spanish, Language::English);
        assert_eq!(pair.to_string(), "es->en");
        assert_eq!(pair.reversed().to_string(), "en->es");
        assert!(!pair.is_identity());
        assert!(LanguagePair::new(Language::English, Language::English).is_identity());
    }
}
