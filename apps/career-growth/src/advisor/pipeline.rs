//! Career Suggestion Pipeline — orchestrates one interactive run.
//!
//! Flow: collect_answers → build_career_prompt → complete → parse_career_suggestions
//!       → print_suggestions.

use std::io::{BufRead, Write};

use tracing::info;

use crate::advisor::collector::collect_answers;
use crate::advisor::prompts::{build_career_prompt, CAREER_MAX_TOKENS, CAREER_TEMPERATURE};
use crate::advisor::questions::QUESTIONS;
use crate::advisor::suggestions::{parse_career_suggestions, print_suggestions, CareerSuggestion};
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, CompletionRequest};

/// Runs the full question → suggestion pipeline against `input` / `output`.
///
/// Returns the validated suggestions after printing them.
pub async fn run_career_suggestions<R, W>(
    input: &mut R,
    output: &mut W,
    llm: &dyn CompletionClient,
) -> Result<Vec<CareerSuggestion>, AppError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "\n==== IT Career Predictor ====\n")?;

    let answers = collect_answers(&QUESTIONS, input, output)?;
    info!("Collected {} answers", answers.len());

    let prompt = build_career_prompt(&answers);

    writeln!(output, "\nGenerating career suggestions...\n")?;
    output.flush()?;

    let text = llm
        .complete(&CompletionRequest {
            prompt: &prompt,
            temperature: CAREER_TEMPERATURE,
            max_tokens: CAREER_MAX_TOKENS,
        })
        .await?;

    let suggestions = parse_career_suggestions(&text)?;
    info!("Received {} career suggestions", suggestions.len());

    writeln!(output, "Recommended Careers\n")?;
    print_suggestions(output, &suggestions)?;
    output.flush()?;

    Ok(suggestions)
}
