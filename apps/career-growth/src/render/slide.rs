//! Slide Renderer — (title, bullets) → PNG bytes.
//!
//! Layout is fixed: dark 1280×720 canvas, title at the top-left, bullets below with a
//! hanging indent, each bullet word-wrapped to the content width.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use tracing::{debug, warn};

use crate::render::font::{load_font_file, SlideFont};
use crate::render::wrap::{wrap_text, TextMeasure};
use crate::render::RenderError;
use crate::roadmap::script::Slide;

pub const CANVAS_WIDTH: u32 = 1280;
pub const CANVAS_HEIGHT: u32 = 720;
pub const BACKGROUND: Rgb<u8> = Rgb([30, 30, 40]);
pub const FOREGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const TITLE_PX: f32 = 60.0;
const BODY_PX: f32 = 40.0;
const TITLE_X: i32 = 50;
const TITLE_Y: i32 = 50;
const BULLET_X: i32 = 80;
const BULLET_TOP: i32 = 200;
const RIGHT_MARGIN: u32 = 80;
const LINE_HEIGHT: i32 = 50;
/// Extra space between two bullets, on top of `LINE_HEIGHT`.
const BULLET_GAP: i32 = 30;
const BULLET_MARKER: &str = "- ";

/// Width available to bullet text, marker included.
pub const CONTENT_WIDTH: u32 = CANVAS_WIDTH - BULLET_X as u32 - RIGHT_MARGIN;

/// One line of text positioned on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub is_title: bool,
}

/// Renders slides with a title font and a body font.
#[derive(Debug, Clone)]
pub struct SlideRenderer {
    title_font: SlideFont,
    body_font: SlideFont,
}

impl SlideRenderer {
    pub fn new(title_font: SlideFont, body_font: SlideFont) -> Self {
        Self {
            title_font,
            body_font,
        }
    }

    /// Loads both fonts from `font_path`, falling back to the built-in bitmap font.
    pub fn from_font_file(font_path: &Path) -> Self {
        let face = load_font_file(font_path);
        Self::new(
            SlideFont::sized(face.as_ref(), TITLE_PX),
            SlideFont::sized(face.as_ref(), BODY_PX),
        )
    }

    /// Renderer that always uses the built-in bitmap font.
    pub fn builtin() -> Self {
        Self::new(SlideFont::bitmap(TITLE_PX), SlideFont::bitmap(BODY_PX))
    }

    /// Computes every line's position without drawing anything.
    pub fn layout(&self, slide: &Slide) -> Vec<PlacedLine> {
        let mut lines = vec![PlacedLine {
            x: TITLE_X,
            y: TITLE_Y,
            text: slide.title.trim().to_string(),
            is_title: true,
        }];

        let marker_width = self.body_font.measure(BULLET_MARKER);
        let text_x = BULLET_X + marker_width as i32;
        let text_width = CONTENT_WIDTH.saturating_sub(marker_width);

        let mut y = BULLET_TOP;
        for bullet in &slide.bullets {
            let wrapped = wrap_text(bullet, text_width, &self.body_font);
            for (i, text) in wrapped.into_iter().enumerate() {
                if i == 0 {
                    lines.push(PlacedLine {
                        x: BULLET_X,
                        y,
                        text: BULLET_MARKER.trim_end().to_string(),
                        is_title: false,
                    });
                }
                lines.push(PlacedLine {
                    x: text_x,
                    y,
                    text,
                    is_title: false,
                });
                y += LINE_HEIGHT;
            }
            y += BULLET_GAP;
        }

        if y - BULLET_GAP > CANVAS_HEIGHT as i32 {
            warn!(
                title = %slide.title,
                "Slide bullets overflow the canvas and will be clipped"
            );
        }
        lines
    }

    /// Draws the slide and encodes it as PNG.
    pub fn render(&self, slide: &Slide) -> Result<Vec<u8>, RenderError> {
        let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);

        for line in self.layout(slide) {
            let font = if line.is_title {
                &self.title_font
            } else {
                &self.body_font
            };
            font.draw(&mut canvas, FOREGROUND, line.x, line.y, &line.text);
        }

        let mut png = Vec::new();
        canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        debug!(title = %slide.title, bytes = png.len(), "Rendered slide");
        Ok(png)
    }
}
