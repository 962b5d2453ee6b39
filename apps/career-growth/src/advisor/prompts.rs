// All LLM prompt constants for the career advisor.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::advisor::collector::AnswerSet;
use crate::llm_client::prompts::JSON_ARRAY_ONLY;

/// Number of careers the model must recommend.
pub const CAREER_COUNT: usize = 4;

pub const CAREER_TEMPERATURE: f32 = 0.4;
pub const CAREER_MAX_TOKENS: u32 = 1200;

/// Career recommendation prompt template.
/// Replace: {responses}, {json_only}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"You are an expert IT career advisor.

Based on the user's answers, recommend EXACTLY 4 suitable IT careers.
For each career provide:
1. Title (example: "Data Engineer")
2. One-line reason why it matches the user
3. Top 5 skills to learn

User responses:
{responses}

{json_only}
Return a JSON ARRAY of exactly 4 objects:
[
  {
    "title": "...",
    "reason": "...",
    "skills": ["...", "...", "...", "...", "..."]
  }
]"#;

/// Builds the career prompt: one `- question: answer` line per answer, in order.
///
/// Question text goes in verbatim. Line breaks inside an answer are folded to
/// single spaces so every question keeps exactly one bulleted line.
pub fn build_career_prompt(answers: &AnswerSet) -> String {
    let responses = answers
        .iter()
        .map(|(question, answer)| format!("- {question}: {}", fold_lines(answer)))
        .collect::<Vec<_>>()
        .join("\n");

    CAREER_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ARRAY_ONLY)
        .replace("{responses}", &responses)
}

/// Replaces each run of line breaks (`\n` or `\r\n`) with one space.
/// Everything else, surrounding whitespace included, is kept as typed.
fn fold_lines(answer: &str) -> String {
    let mut folded = String::with_capacity(answer.len());
    let mut in_break = false;
    let mut chars = answer.chars().peekable();

    while let Some(c) = chars.next() {
        let is_break = c == '\n' || (c == '\r' && chars.peek() == Some(&'\n'));
        if is_break {
            if !in_break {
                folded.push(' ');
            }
            in_break = true;
        } else {
            folded.push(c);
            in_break = false;
        }
    }
    folded
}
