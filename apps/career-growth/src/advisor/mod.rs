// Career Suggestion Pipeline
// Question Set → Answer Collector → Prompt Builder → Completion Client → Result Parser → Printer.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod collector;
pub mod pipeline;
pub mod prompts;
pub mod questions;
pub mod suggestions;

pub use pipeline::run_career_suggestions;
