use mood_analyzer::{Analysis, AnalysisResult};

pub const EMPTY_HINT: &str = "✍️ Enter text to see the analysis";
pub const CORRECTED: &str = "✅ Errors have been corrected in the text";
pub const ALREADY_CORRECT: &str = "🎉 The text is already correct";

const GAUGE_WIDTH: usize = 20;

/// `[████████░░░░]`, filled in proportion to where `value` sits in `min..=max`.
pub fn gauge(value: f64, min: f64, max: f64, width: usize) -> String {
    let fraction = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_scores(sentiment: &AnalysisResult) -> String {
    format!(
        "Polarity:     {:>5.2}  (-1 to 1)  {}\nSubjectivity: {:>5.2}  (0 to 1)   {}\n",
        sentiment.polarity,
        gauge(sentiment.polarity, -1.0, 1.0, GAUGE_WIDTH),
        sentiment.subjectivity,
        gauge(sentiment.subjectivity, 0.0, 1.0, GAUGE_WIDTH),
    )
}

pub fn render(analysis: &Analysis) -> String {
    let correction = &analysis.correction;
    let mut out = render_scores(&analysis.sentiment);
    out.push_str(&format!("{}\n\n", analysis.sentiment.category.label()));
    out.push_str(&format!("Language:  {}\n", analysis.language));
    out.push_str(&format!("Original:  {}\n", correction.original));
    out.push_str(&format!("Corrected: {}\n", correction.corrected));
    out.push_str(if correction.changed {
        CORRECTED
    } else {
        ALREADY_CORRECT
    });
    out
}
