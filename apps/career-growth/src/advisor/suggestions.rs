//! Result Parser / Printer for career suggestions.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::advisor::prompts::CAREER_COUNT;
use crate::contract::{parse_exact_array, require_non_empty};
use crate::errors::ContractError;

const WHAT: &str = "career suggestions";

/// One recommended career as returned by the completion service.
///
/// `skills` holds five entries by convention; the count is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerSuggestion {
    pub title: String,
    pub reason: String,
    pub skills: Vec<String>,
}

/// Parses and validates the model's reply: exactly `CAREER_COUNT` suggestions,
/// each with a non-empty title and reason.
pub fn parse_career_suggestions(text: &str) -> Result<Vec<CareerSuggestion>, ContractError> {
    let suggestions: Vec<CareerSuggestion> = parse_exact_array(text, WHAT, CAREER_COUNT)?;

    for (i, s) in suggestions.iter().enumerate() {
        require_non_empty(&s.title, WHAT, i + 1, "title")?;
        require_non_empty(&s.reason, WHAT, i + 1, "reason")?;
    }

    Ok(suggestions)
}

/// Writes one `Career:` / `Reason:` / `Skills:` block per suggestion, in order.
pub fn print_suggestions<W: Write>(
    out: &mut W,
    suggestions: &[CareerSuggestion],
) -> std::io::Result<()> {
    for s in suggestions {
        writeln!(out, "Career: {}", s.title)?;
        writeln!(out, "Reason: {}", s.reason)?;
        writeln!(out, "Skills: {}", s.skills.join(", "))?;
        writeln!(out)?;
    }
    Ok(())
}
