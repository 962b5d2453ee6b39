// Shared prompt fragments.
// Each pipeline that needs LLM calls defines its own prompts.rs alongside it.

/// Appended to every prompt that expects a JSON array back.
pub const JSON_ARRAY_ONLY: &str = "\
    Respond ONLY with valid JSON. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
