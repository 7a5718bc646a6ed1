use std::path::PathBuf;
use std::time::Duration;

use dashmap::DashMap;
use html_escape::decode_html_entities;
use language_utils::{Language, LanguagePair};
use xxhash_rust::xxh3::xxh3_64;

use crate::backend::{LanguageDetector, Translator};
use crate::error::BackendError;

pub const API_KEY_VAR: &str = "GOOGLE_TRANSLATE_API_KEY";

const SERVICE: &str = "Google Translate";
const TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const DETECT_URL: &str = "https://translation.googleapis.com/language/translate/v2/detect";

/// Google Cloud Translation (v2) client.
///
/// Translations are cached in memory and on disk under `cache_dir`: each new
/// translation is written to `<hash>.json`, and those files are folded into
/// `master_cache.json` on startup and on drop.
pub struct GoogleTranslator {
    client: reqwest::blocking::Client,
    api_key: String,
    cache: DashMap<u64, String>, // hash -> translation
    cache_dir: PathBuf,
    master_cache_file: PathBuf,
}

impl GoogleTranslator {
    pub fn new(api_key: String, cache_dir: PathBuf) -> Result<Self, BackendError> {
        std::fs::create_dir_all(&cache_dir)?;

        let master_cache_file = cache_dir.join("master_cache.json");
        let cache: DashMap<u64, String> = if master_cache_file.exists() {
            let master_content = std::fs::read_to_string(&master_cache_file)?;
            serde_json::from_str(&master_content).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable translation cache {master_cache_file:?}: {e}");
                DashMap::new()
            })
        } else {
            DashMap::new()
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(super::TIMEOUT_SECS))
            .build()?;

        let res = Self {
            client,
            api_key,
            cache,
            cache_dir,
            master_cache_file,
        };
        res.consolidate_cache();
        log::info!(
            "Google Translate cache at {:?} holds {} translations",
            res.cache_dir,
            res.cache.len()
        );
        Ok(res)
    }

    /// Reads the key from `GOOGLE_TRANSLATE_API_KEY`.
    pub fn from_env(cache_dir: PathBuf) -> Result<Self, BackendError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(BackendError::MissingCredentials(API_KEY_VAR))?;
        Self::new(api_key, cache_dir)
    }

    pub fn cached_translations(&self) -> usize {
        self.cache.len()
    }

    fn post(&self, url: &str, form: &[(&str, &str)]) -> Result<serde_json::Value, BackendError> {
        let resp = self
            .client
            .post(format!("{url}?key={}", self.api_key))
            .form(form)
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(BackendError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn consolidate_cache(&self) {
        let mut files_to_delete = Vec::new();

        if let Ok(entries) = std::fs::read_dir(&self.cache_dir) {
            for entry in entries.flatten() {
                let path = entry.path();

                if path == self.master_cache_file
                    || path.extension().and_then(|s| s.to_str()) != Some("json")
                {
                    continue;
                }

                if let Some(hash) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|stem| stem.parse::<u64>().ok())
                {
                    if let Ok(translation) = std::fs::read_to_string(&path) {
                        self.cache.entry(hash).or_insert(translation);
                        files_to_delete.push(path);
                    }
                }
            }
        }

        // only delete individual files once the master file is written
        match serde_json::to_string_pretty(&self.cache) {
            Ok(json) => match std::fs::write(&self.master_cache_file, json) {
                Ok(()) => {
                    for file in files_to_delete {
                        let _ = std::fs::remove_file(file);
                    }
                }
                Err(e) => log::warn!("Failed to write {:?}: {e}", self.master_cache_file),
            },
            Err(e) => log::warn!("Failed to serialize translation cache: {e}"),
        }
    }
}

fn cache_key(text: &str, pair: LanguagePair) -> u64 {
    let hash_input = format!(
        "{}::{}::{text}",
        pair.source_language.iso_639_1(),
        pair.target_language.iso_639_1()
    );
    xxh3_64(hash_input.as_bytes())
}

/// `error.message` from a JSON error body, otherwise the body itself.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    match parsed.as_ref().and_then(|v| v["error"]["message"].as_str()) {
        Some(message) => message.to_string(),
        None if body.trim().is_empty() => "no error message".to_string(),
        None => body.trim().to_string(),
    }
}

fn parse_translation(value: &serde_json::Value) -> Result<String, BackendError> {
    let translated = value["data"]["translations"][0]["translatedText"]
        .as_str()
        .ok_or_else(|| BackendError::MalformedResponse {
            service: SERVICE,
            reason: "missing data.translations[0].translatedText".to_string(),
        })?;
    Ok(decode_html_entities(translated).to_string())
}

fn parse_detection(value: &serde_json::Value) -> Result<Option<Language>, BackendError> {
    let code = value["data"]["detections"][0][0]["language"]
        .as_str()
        .ok_or_else(|| BackendError::MalformedResponse {
            service: SERVICE,
            reason: "missing data.detections[0][0].language".to_string(),
        })?;
    Ok(Language::from_iso_639_1(code))
}

impl Translator for GoogleTranslator {
    fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, BackendError> {
        let pair = LanguagePair::new(source, target);
        if pair.is_identity() || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let hash = cache_key(text, pair);
        if let Some(t) = self.cache.get(&hash) {
            log::debug!("Translation cache hit for {pair}");
            return Ok(t.clone());
        }

        let value = self.post(
            TRANSLATE_URL,
            &[
                ("q", text),
                ("source", source.iso_639_1()),
                ("target", target.iso_639_1()),
                ("format", "text"),
            ],
        )?;
        let translated = parse_translation(&value)?;
        self.cache.insert(hash, translated.clone());

        let cache_file = self.cache_dir.join(format!("{hash}.json"));
        if let Err(e) = std::fs::write(&cache_file, &translated) {
            log::warn!("Failed to write {cache_file:?}: {e}");
        }
        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "google-translate"
    }
}

impl LanguageDetector for GoogleTranslator {
    fn detect(&self, text: &str) -> Result<Option<Language>, BackendError> {
        let value = self.post(DETECT_URL, &[("q", text)])?;
        parse_detection(&value)
    }

    fn name(&self) -> &'static str {
        "google-translate"
    }
}

impl Drop for GoogleTranslator {
    fn drop(&mut self) {
        self.consolidate_cache();
    }
}
