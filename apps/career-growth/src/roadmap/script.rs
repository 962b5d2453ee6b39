//! Script Generator — asks the completion service for the slide-by-slide script.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contract::{parse_exact_array, require_non_empty};
use crate::errors::{AppError, ContractError};
use crate::llm_client::{CompletionClient, CompletionRequest};
use crate::roadmap::prompts::{
    build_script_prompt, MAX_BULLETS, MIN_BULLETS, SCRIPT_MAX_TOKENS, SCRIPT_TEMPERATURE,
    SLIDE_COUNT,
};

const WHAT: &str = "slides";

/// One unit of the generated video script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    /// 2–3 bullet points, drawn below the title.
    pub bullets: Vec<String>,
    /// Narration text synthesized into the slide's audio track.
    pub voiceover: String,
}

/// Generates and validates the 6-slide script for `career`.
pub async fn generate_script(
    career: &str,
    llm: &dyn CompletionClient,
) -> Result<Vec<Slide>, AppError> {
    let prompt = build_script_prompt(career);
    info!(career, "Requesting slide script");

    let text = llm
        .complete(&CompletionRequest {
            prompt: &prompt,
            temperature: SCRIPT_TEMPERATURE,
            max_tokens: SCRIPT_MAX_TOKENS,
        })
        .await?;

    Ok(parse_slides(&text)?)
}

/// Parses the model's reply into exactly `SLIDE_COUNT` slides.
///
/// Every slide needs a title, a voiceover and 2–3 non-blank bullets.
pub fn parse_slides(text: &str) -> Result<Vec<Slide>, ContractError> {
    let slides: Vec<Slide> = parse_exact_array(text, WHAT, SLIDE_COUNT)?;

    for (i, slide) in slides.iter().enumerate() {
        let index = i + 1;
        require_non_empty(&slide.title, WHAT, index, "title")?;
        require_non_empty(&slide.voiceover, WHAT, index, "voiceover")?;

        if !(MIN_BULLETS..=MAX_BULLETS).contains(&slide.bullets.len()) {
            return Err(ContractError::BulletCount {
                what: WHAT,
                index,
                min: MIN_BULLETS,
                max: MAX_BULLETS,
                actual: slide.bullets.len(),
            });
        }
        for bullet in &slide.bullets {
            require_non_empty(bullet, WHAT, index, "bullets")?;
        }
    }

    Ok(slides)
}
