// Roadmap Video Pipeline
// Script Generator → per-slide {Slide Renderer, Narration Synthesizer} → Slide Encoder → Video Assembler.
// Per-slide work runs concurrently; assembly restores slide order.

pub mod pipeline;
pub mod prompts;
pub mod script;

pub use pipeline::{RoadmapPipeline, RoadmapReport};
