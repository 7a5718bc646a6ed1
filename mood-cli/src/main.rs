mod render;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use language_utils::Language;
use mood_analyzer::{
    Analysis, AnalyzerConfig, Backends, MoodAnalyzer, Session, SpanishStrategy, Thresholds,
};

#[derive(Parser, Debug)]
#[command(version, about = "Sentiment analysis with spelling correction", long_about = None)]
struct Args {
    /// Text to analyze. Without it, reads one submission per line from stdin.
    text: Vec<String>,

    /// Category bands: wide (±0.5), narrow (±0.1) or a number in (0, 1]
    #[arg(short, long)]
    thresholds: Option<Thresholds>,

    /// Language of the input (en, es, ...). Detected when omitted.
    #[arg(short, long)]
    language: Option<Language>,

    /// dictionary, round-trip or dictionary-then-round-trip
    #[arg(long)]
    spanish_strategy: Option<SpanishStrategy>,

    /// Score the text as typed
    #[arg(long)]
    no_correct: bool,

    /// Score non-English text directly instead of its English translation
    #[arg(long)]
    no_pivot: bool,

    /// Use Google Translate and LanguageTool instead of the bundled backends
    #[arg(long)]
    remote: bool,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Environment config with flags on top.
    fn config(&self) -> Result<AnalyzerConfig> {
        let mut config = AnalyzerConfig::from_env().context("Invalid MOOD_* environment")?;
        if let Some(thresholds) = self.thresholds {
            config.thresholds = thresholds;
        }
        if let Some(language) = self.language {
            config.language = Some(language);
        }
        if let Some(strategy) = self.spanish_strategy {
            config.spanish_strategy = strategy;
        }
        if self.no_correct {
            config.correct = false;
        }
        if self.no_pivot {
            config.score_via_pivot = false;
        }
        Ok(config)
    }
}

fn print_analysis(analysis: Option<&Analysis>, json: bool) -> Result<()> {
    match analysis {
        None => println!("{}", render::EMPTY_HINT),
        Some(analysis) if json => println!(
            "{}",
            serde_json::to_string_pretty(analysis).context("Failed to serialize analysis")?
        ),
        Some(analysis) => println!("{}", render::render(analysis)),
    }
    Ok(())
}

fn repl(analyzer: &MoodAnalyzer, json: bool) -> Result<()> {
    let mut session = Session::new(analyzer);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match session.analyze(&line, None) {
            Ok(analysis) => print_analysis(analysis.as_ref(), json)?,
            Err(e) => eprintln!("✗ {:#}", anyhow::Error::from(e)),
        }
        print!("\n> ");
        stdout.flush()?;
    }
    println!();
    log::info!("Session ended with {} cached analyses", session.len());
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = args.config()?;

    let backends = if args.remote {
        mood_analyzer::remote::backends_from_env().context("Failed to set up remote backends")?
    } else {
        Backends::local().context("Failed to load bundled backends")?
    };
    let analyzer = MoodAnalyzer::new(backends, config);

    if args.text.is_empty() {
        return repl(&analyzer, args.json);
    }

    let text = args.text.join(" ");
    let analysis = analyzer.analyze(&text, None).context("Analysis failed")?;
    print_analysis(analysis.as_ref(), args.json)
}
