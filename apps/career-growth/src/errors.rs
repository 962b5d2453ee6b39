use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;
use crate::speech::SpeechError;

/// Application-level error type.
/// Every variant aborts the current run; `main` maps it to an exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input closed before question {question} was answered")]
    InputClosed { question: usize },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Completion service broke the response contract: {0}")]
    Contract(#[from] ContractError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Speech synthesis error: {0}")]
    Speech(#[from] SpeechError),

    #[error("Video assembly error: {0}")]
    Assembly(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable code, logged alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::InputClosed { .. } => "INPUT_CLOSED",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Contract(_) => "CONTRACT_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Speech(_) => "SPEECH_ERROR",
            AppError::Assembly(_) => "ASSEMBLY_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::InputClosed { .. } => 3,
            AppError::Llm(_) => 4,
            AppError::Contract(_) => 5,
            AppError::Render(_) | AppError::Speech(_) | AppError::Assembly(_) => 6,
            AppError::Io(_) | AppError::Internal(_) => 1,
        }
    }
}

/// Violations of the JSON shape the completion service was asked to return.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("response is not valid JSON for {what}: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected exactly {expected} {what}, got {actual}")]
    WrongCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} #{index}: field `{field}` is empty")]
    EmptyField {
        what: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("{what} #{index}: expected {min}–{max} bullets, got {actual}")]
    BulletCount {
        what: &'static str,
        index: usize,
        min: usize,
        max: usize,
        actual: usize,
    },
}
