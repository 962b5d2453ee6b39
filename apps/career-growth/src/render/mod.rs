// Slide rendering: fixed 1280×720 layout, greedy word wrap, TrueType or built-in bitmap font.
// Rendering is CPU-bound; the roadmap pipeline runs it inside tokio::task::spawn_blocking.

pub mod bitmap_font;
pub mod font;
pub mod slide;
pub mod wrap;

use thiserror::Error;

pub use slide::SlideRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
