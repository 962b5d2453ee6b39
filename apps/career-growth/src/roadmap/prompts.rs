// All LLM prompt constants for the roadmap video script.

use crate::llm_client::prompts::JSON_ARRAY_ONLY;

/// Number of slides in every roadmap video.
pub const SLIDE_COUNT: usize = 6;
pub const MIN_BULLETS: usize = 2;
pub const MAX_BULLETS: usize = 3;

pub const SCRIPT_TEMPERATURE: f32 = 0.5;
pub const SCRIPT_MAX_TOKENS: u32 = 2048;

/// Slide script prompt template.
/// Replace: {career}, {json_only}
pub const SCRIPT_PROMPT_TEMPLATE: &str = r#"Create a short 6-slide educational video script explaining the career path of {career}.
For each slide include:
- Title
- 2-3 bullet points
- Short voiceover narration (two or three sentences)

{json_only}
Return a JSON ARRAY of exactly 6 objects:
[
  {
    "title": "...",
    "bullets": ["...", "..."],
    "voiceover": "..."
  }
]"#;

pub fn build_script_prompt(career: &str) -> String {
    SCRIPT_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ARRAY_ONLY)
        .replace("{career}", career.trim())
}
