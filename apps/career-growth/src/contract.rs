//! Response contract enforcement for completion-service output.
//!
//! The model is asked for a JSON array of a fixed shape and length. Generic JSON
//! parsing checks field presence and types; the caller-supplied count check and
//! per-item validation turn everything else into a typed `ContractError`.

use serde::de::DeserializeOwned;

use crate::errors::ContractError;
use crate::llm_client::strip_json_fences;

/// Parses `text` as a JSON array of exactly `expected` items of `T`.
///
/// Code fences are stripped first. A short or long array is an error, never
/// silently truncated or padded.
pub fn parse_exact_array<T: DeserializeOwned>(
    text: &str,
    what: &'static str,
    expected: usize,
) -> Result<Vec<T>, ContractError> {
    let items: Vec<T> = serde_json::from_str(strip_json_fences(text))
        .map_err(|source| ContractError::Malformed { what, source })?;

    if items.len() != expected {
        return Err(ContractError::WrongCount {
            what,
            expected,
            actual: items.len(),
        });
    }

    Ok(items)
}

/// Fails with `EmptyField` when `value` is blank.
pub fn require_non_empty(
    value: &str,
    what: &'static str,
    index: usize,
    field: &'static str,
) -> Result<(), ContractError> {
    if value.trim().is_empty() {
        Err(ContractError::EmptyField { what, index, field })
    } else {
        Ok(())
    }
}
