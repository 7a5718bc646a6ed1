use std::cell::Cell;
use std::rc::Rc;

use language_utils::Language;
use mood_analyzer::{
    AnalyzerConfig, Backends, BackendError, Category, CorrectionMethod, LanguageDetector,
    MoodAnalyzer, Scores, SentimentScorer, Session, SpanishStrategy, SpellCorrector, Thresholds,
    Translator,
    backend::IdentityTranslator,
    local::{HeuristicDetector, LexiconScorer, LocalCorrector},
};

/// Shared call counter.
#[derive(Clone, Default)]
struct Calls(Rc<Cell<usize>>);

impl Calls {
    fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }
    fn get(&self) -> usize {
        self.0.get()
    }
}

struct CountingScorer {
    inner: LexiconScorer,
    calls: Calls,
}

impl SentimentScorer for CountingScorer {
    fn score(&self, text: &str) -> Result<Scores, BackendError> {
        self.calls.bump();
        self.inner.score(text)
    }
    fn name(&self) -> &'static str {
        "counting"
    }
}

struct FailingScorer;

impl SentimentScorer for FailingScorer {
    fn score(&self, _text: &str) -> Result<Scores, BackendError> {
        Err(BackendError::Api {
            service: "scorer",
            status: 503,
            message: "unavailable".into(),
        })
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

struct FailingCorrector;

impl SpellCorrector for FailingCorrector {
    fn correct(&self, _text: &str, _language: Language) -> Result<String, BackendError> {
        Err(BackendError::MissingCredentials("SPELL_KEY"))
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

struct FailingTranslator;

impl Translator for FailingTranslator {
    fn translate(&self, _: &str, _: Language, _: Language) -> Result<String, BackendError> {
        Err(BackendError::MissingCredentials("TRANSLATE_KEY"))
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

struct FailingDetector;

impl LanguageDetector for FailingDetector {
    fn detect(&self, _text: &str) -> Result<Option<Language>, BackendError> {
        Err(BackendError::MissingCredentials("DETECT_KEY"))
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Any call is a test failure.
struct Untouchable;

impl SentimentScorer for Untouchable {
    fn score(&self, text: &str) -> Result<Scores, BackendError> {
        panic!("scorer called with {text:?}")
    }
    fn name(&self) -> &'static str {
        "untouchable"
    }
}

impl SpellCorrector for Untouchable {
    fn correct(&self, text: &str, _: Language) -> Result<String, BackendError> {
        panic!("corrector called with {text:?}")
    }
    fn name(&self) -> &'static str {
        "untouchable"
    }
}

impl LanguageDetector for Untouchable {
    fn detect(&self, text: &str) -> Result<Option<Language>, BackendError> {
        panic!("detector called with {text:?}")
    }
    fn name(&self) -> &'static str {
        "untouchable"
    }
}

impl Translator for Untouchable {
    fn translate(&self, text: &str, _: Language, _: Language) -> Result<String, BackendError> {
        panic!("translator called with {text:?}")
    }
    fn name(&self) -> &'static str {
        "untouchable"
    }
}

fn counting_backends(calls: &Calls) -> Backends {
    Backends {
        scorer: Box::new(CountingScorer {
            inner: LexiconScorer::english().unwrap(),
            calls: calls.clone(),
        }),
        corrector: Box::new(LocalCorrector::new()),
        detector: Box::new(HeuristicDetector),
        translator: None,
    }
}

#[test]
fn misspelled_text_is_scored_after_correction() {
    let analyzer = MoodAnalyzer::local(AnalyzerConfig::default()).unwrap();
    let analysis = analyzer
        .analyze("I am feeling very hapy", None)
        .unwrap()
        .unwrap();
    assert_eq!(analysis.language, Language::English);
    assert_eq!(analysis.correction.original, "I am feeling very hapy");
    assert_eq!(analysis.correction.corrected, "I am feeling very happy");
    assert!(analysis.correction.changed);
    assert_eq!(analysis.sentiment.category, Category::Positive);
}

#[test]
fn correct_text_is_left_alone() {
    let analyzer = MoodAnalyzer::local(AnalyzerConfig::default()).unwrap();
    let text = "The movie was terrible and I am sad.";
    let analysis = analyzer.analyze(text, None).unwrap().unwrap();
    assert_eq!(analysis.correction.corrected, text);
    assert!(!analysis.correction.changed);
    assert_eq!(analysis.sentiment.category, Category::Negative);

    let again = analyzer
        .corrector()
        .correct(&analysis.correction.corrected, None);
    assert_eq!(again.corrected, text);
}

#[test]
fn everyday_english_is_not_rewritten() {
    let analyzer = MoodAnalyzer::local(AnalyzerConfig::default()).unwrap();
    for text in [
        "My friends planned a beautiful birthday party",
        "I drink coffee in the garden",
        "We had a delicious dinner at the restaurant yesterday",
        "Our neighbours invited us to their wedding next summer.",
        "I really enjoyed the concert, the music was wonderful.",
        "The weather is cold and rainy, so we stayed at home.",
        "I am so tired after working all day at the office.",
        "This book is boring and the ending makes no sense.",
        "The hotel room was clean, quiet and comfortable.",
        "Thanks for helping me move into my new apartment!",
    ] {
        let analysis = analyzer.analyze(text, None).unwrap().unwrap();
        assert!(
            !analysis.correction.changed,
            "{text:?} became {:?}",
            analysis.correction.corrected
        );
    }
}

#[test]
fn thresholds_change_only_the_category() {
    let narrow = MoodAnalyzer::local(AnalyzerConfig {
        thresholds: Thresholds::NARROW,
        ..Default::default()
    })
    .unwrap();
    let wide = MoodAnalyzer::local(AnalyzerConfig::default()).unwrap();

    // (0.6 - 0.5 + 0.5) / 3
    let text = "nice and sad and okay";
    let a = narrow.analyze(text, None).unwrap().unwrap().sentiment;
    let b = wide.analyze(text, None).unwrap().unwrap().sentiment;
    assert_eq!(a.polarity, 0.2);
    assert_eq!(a.polarity, b.polarity);
    assert_eq!(a.category, Category::Positive);
    assert_eq!(b.category, Category::Neutral);
}

#[test]
fn session_does_not_rescore_repeated_text() {
    let calls = Calls::default();
    let analyzer = MoodAnalyzer::new(counting_backends(&calls), AnalyzerConfig::default());
    let mut session = Session::new(&analyzer);

    let first = session.analyze("what a wonderful day", None).unwrap();
    assert_eq!(calls.get(), 1);
    let second = session.analyze("what a wonderful day", None).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(first, second);

    // different hint, different entry
    session
        .analyze("what a wonderful day", Some(Language::English))
        .unwrap();
    assert_eq!(calls.get(), 2);
    assert_eq!(session.len(), 2);
}

#[test]
fn failed_analysis_is_not_cached() {
    let analyzer = MoodAnalyzer::new(
        Backends {
            scorer: Box::new(FailingScorer),
            corrector: Box::new(LocalCorrector::new()),
            detector: Box::new(HeuristicDetector),
            translator: None,
        },
        AnalyzerConfig::default(),
    );
    let mut session = Session::new(&analyzer);
    let err = session.analyze("good news", None).unwrap_err();
    assert!(matches!(err, mood_analyzer::AnalyzeError::Scoring(_)));
    assert!(session.is_empty());
}

#[test]
fn blank_input_calls_no_backend() {
    let analyzer = MoodAnalyzer::new(
        Backends {
            scorer: Box::new(Untouchable),
            corrector: Box::new(Untouchable),
            detector: Box::new(Untouchable),
            translator: Some(Box::new(Untouchable)),
        },
        AnalyzerConfig::default(),
    );
    assert!(analyzer.analyze("", None).unwrap().is_none());
    assert!(analyzer.analyze(" \t\n", Some(Language::Spanish)).unwrap().is_none());

    let result = analyzer.corrector().correct("   ", None);
    assert!(!result.changed);
    assert_eq!(result.method, CorrectionMethod::Unchanged);

    let mut session = Session::new(&analyzer);
    assert!(session.analyze("  ", None).unwrap().is_none());
}

#[test]
fn every_backend_failing_returns_the_original() {
    let analyzer = MoodAnalyzer::new(
        Backends {
            scorer: Box::new(LexiconScorer::english().unwrap()),
            corrector: Box::new(FailingCorrector),
            detector: Box::new(FailingDetector),
            translator: Some(Box::new(FailingTranslator)),
        },
        AnalyzerConfig {
            spanish_strategy: SpanishStrategy::RoundTrip,
            ..Default::default()
        },
    );
    let corrector = analyzer.corrector();

    // detector failure means English
    let english = corrector.correct("I am hapy", None);
    assert_eq!(english.language, Language::English);
    assert_eq!(english.corrected, "I am hapy");
    assert_eq!(english.method, CorrectionMethod::Fallback);

    let spanish = corrector.correct("estoi mui felis", Some(Language::Spanish));
    assert_eq!(spanish.corrected, "estoi mui felis");
    assert!(!spanish.changed);
    assert_eq!(spanish.method, CorrectionMethod::Fallback);

    // pivot translation fails too, the corrected text is scored as is
    let analysis = analyzer
        .analyze("estoi mui felis", Some(Language::Spanish))
        .unwrap()
        .unwrap();
    assert_eq!(analysis.correction.corrected, "estoi mui felis");
}

#[test]
fn dictionary_survives_round_trip_failure() {
    let analyzer = MoodAnalyzer::new(
        Backends {
            scorer: Box::new(LexiconScorer::english().unwrap()),
            corrector: Box::new(FailingCorrector),
            detector: Box::new(HeuristicDetector),
            translator: Some(Box::new(FailingTranslator)),
        },
        AnalyzerConfig::default(),
    );
    let result = analyzer
        .corrector()
        .correct("Ola, estoi mui felis", Some(Language::Spanish));
    assert_eq!(result.corrected, "Hola, estoy muy feliz");
    assert_eq!(result.method, CorrectionMethod::Dictionary);
    assert!(result.changed);
}

#[test]
fn detected_spanish_without_misspellings_is_unchanged() {
    let analyzer = MoodAnalyzer::new(
        Backends {
            scorer: Box::new(LexiconScorer::english().unwrap()),
            corrector: Box::new(LocalCorrector::new()),
            detector: Box::new(HeuristicDetector),
            translator: Some(Box::new(IdentityTranslator)),
        },
        AnalyzerConfig {
            spanish_strategy: SpanishStrategy::Dictionary,
            ..Default::default()
        },
    );
    let text = "Hoy estoy muy feliz";
    let result = analyzer.corrector().correct(text, None);
    assert_eq!(result.language, Language::Spanish);
    assert_eq!(result.corrected, text);
    assert!(!result.changed);
}

#[test]
fn analysis_serializes_to_json() {
    let analyzer = MoodAnalyzer::local(AnalyzerConfig::default()).unwrap();
    let analysis = analyzer.analyze("I love it", None).unwrap().unwrap();
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["language"], "English");
    assert_eq!(json["sentiment"]["category"], "positive");
    assert_eq!(json["correction"]["method"], "direct");
}
