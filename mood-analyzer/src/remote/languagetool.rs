use std::time::Duration;

use language_utils::Language;
use serde::Deserialize;

use crate::backend::SpellCorrector;
use crate::error::BackendError;

pub const URL_VAR: &str = "LANGUAGETOOL_URL";
pub const DEFAULT_URL: &str = "https://api.languagetool.org";

const SERVICE: &str = "LanguageTool";

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<Match>,
}

/// Offsets and lengths count UTF-16 code units.
#[derive(Debug, Deserialize)]
struct Match {
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

/// Spelling and grammar correction through a LanguageTool server.
pub struct LanguageTool {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl LanguageTool {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(super::TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `LANGUAGETOOL_URL`, or the public API.
    pub fn from_env() -> Result<Self, BackendError> {
        let url = std::env::var(URL_VAR).unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(url)
    }

    fn check(&self, text: &str, language: Language) -> Result<CheckResponse, BackendError> {
        let resp = self
            .client
            .post(format!("{}/v2/check", self.base_url))
            .form(&[("text", text), ("language", language_code(language))])
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message: resp.text().unwrap_or_default(),
            });
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn language_code(language: Language) -> &'static str {
    match language {
        Language::English => "en-US",
        Language::Portuguese => "pt-PT",
        Language::German => "de-DE",
        other => other.iso_639_1(),
    }
}

/// Apply the first suggestion of each match, skipping matches that overlap
/// an earlier one or fall outside the text.
fn apply_replacements(text: &str, mut matches: Vec<Match>) -> String {
    matches.sort_by_key(|m| m.offset);
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut out: Vec<u16> = Vec::with_capacity(units.len());
    let mut cursor = 0;
    for m in matches {
        let Some(replacement) = m.replacements.first() else {
            continue;
        };
        let Some(end) = m.offset.checked_add(m.length) else {
            continue;
        };
        if m.offset < cursor || end > units.len() {
            continue;
        }
        out.extend_from_slice(&units[cursor..m.offset]);
        out.extend(replacement.value.encode_utf16());
        cursor = end;
    }
    out.extend_from_slice(&units[cursor..]);
    String::from_utf16_lossy(&out)
}

impl SpellCorrector for LanguageTool {
    fn correct(&self, text: &str, language: Language) -> Result<String, BackendError> {
        let response = self.check(text, language)?;
        log::debug!("{SERVICE} found {} issues", response.matches.len());
        Ok(apply_replacements(text, response.matches))
    }

    fn name(&self) -> &'static str {
        "languagetool"
    }
}
