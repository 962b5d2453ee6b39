use anyhow::{Context, Result};

use crate::errors::AppError;

const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TTS_MODEL: &str = "playai-tts";
const DEFAULT_TTS_VOICE: &str = "Fritz-PlayAI";
const DEFAULT_SLIDE_FONT: &str = "arial.ttf";

/// Legacy variable name used by the first proof-of-concept `.env` files.
const LEGACY_API_KEY_VAR: &str = "career-growth";

/// Application configuration loaded from environment variables.
/// Fails at startup if the completion-service key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API (chat completions + speech).
    pub api_base: String,
    pub llm_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub slide_font: String,
    pub ffmpeg_bin: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: require_api_key()?,
            api_base: env_or("LLM_API_BASE", DEFAULT_API_BASE),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            tts_model: env_or("TTS_MODEL", DEFAULT_TTS_MODEL),
            tts_voice: env_or("TTS_VOICE", DEFAULT_TTS_VOICE),
            slide_font: env_or("SLIDE_FONT", DEFAULT_SLIDE_FONT),
            ffmpeg_bin: env_or("FFMPEG_BIN", "ffmpeg"),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Reads the API key from `GROQ_API_KEY`, falling back to the legacy variable.
/// A blank value counts as missing.
fn require_api_key() -> Result<String> {
    let key = std::env::var("GROQ_API_KEY")
        .or_else(|_| std::env::var(LEGACY_API_KEY_VAR))
        .ok();
    validate_api_key(key)
        .map_err(anyhow::Error::from)
        .context("Completion service credentials are not configured")
}

pub(crate) fn validate_api_key(key: Option<String>) -> Result<String, AppError> {
    match key {
        Some(k) if !k.trim().is_empty() => Ok(k.trim().to_string()),
        Some(_) => Err(AppError::Config(
            "GROQ_API_KEY is set but empty".to_string(),
        )),
        None => Err(AppError::Config(
            "Required environment variable 'GROQ_API_KEY' is not set".to_string(),
        )),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
