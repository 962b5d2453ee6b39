// Slide Encoder + Video Assembler.
// In-memory PNG/WAV buffers become scoped temp files, then one MP4 at a fixed frame rate.

pub mod assembler;
pub mod encoder;

pub use assembler::{FfmpegAssembler, VideoAssembler};
pub use encoder::{encode_slide, MaterializedClip, SlideAssets};
