//! Slide fonts: a TrueType face when one can be loaded, the built-in bitmap font otherwise.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use tracing::{debug, warn};

use crate::render::bitmap_font::{self, CELL_HEIGHT};
use crate::render::wrap::TextMeasure;

/// A font at a fixed pixel size.
#[derive(Clone)]
pub enum SlideFont {
    TrueType { font: Font<'static>, scale: Scale },
    /// Built-in 5×7 font; each font pixel is a `scale`×`scale` block.
    Bitmap { scale: u32 },
}

impl std::fmt::Debug for SlideFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlideFont::TrueType { scale, .. } => write!(f, "TrueType({}px)", scale.y),
            SlideFont::Bitmap { scale } => write!(f, "Bitmap(x{scale})"),
        }
    }
}

/// Reads and parses a TrueType/OpenType font file. `None` if either step fails.
pub fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!(
                "Font file {} unavailable ({e}); using built-in bitmap font",
                path.display()
            );
            return None;
        }
    };

    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        warn!(
            "Font file {} could not be parsed; using built-in bitmap font",
            path.display()
        );
    } else {
        debug!("Loaded slide font {}", path.display());
    }
    font
}

impl SlideFont {
    /// Uses `face` at `px` pixels when present, else the bitmap font scaled to
    /// roughly the same height.
    pub fn sized(face: Option<&Font<'static>>, px: f32) -> Self {
        match face {
            Some(font) => SlideFont::TrueType {
                font: font.clone(),
                scale: Scale::uniform(px),
            },
            None => SlideFont::bitmap(px),
        }
    }

    pub fn bitmap(px: f32) -> Self {
        SlideFont::Bitmap {
            scale: ((px / CELL_HEIGHT as f32).round() as u32).max(1),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SlideFont::Bitmap { .. })
    }

    /// Draws `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            SlideFont::TrueType { font, scale } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            SlideFont::Bitmap { scale } => {
                bitmap_font::draw(canvas, color, x, y, *scale, text);
            }
        }
    }
}

impl TextMeasure for SlideFont {
    fn measure(&self, text: &str) -> u32 {
        match self {
            SlideFont::TrueType { font, scale } => {
                let v_metrics = font.v_metrics(*scale);
                font.layout(text, *scale, point(0.0, v_metrics.ascent))
                    .last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .map(|w| w.ceil().max(0.0) as u32)
                    .unwrap_or(0)
            }
            SlideFont::Bitmap { scale } => bitmap_font::measure(text, *scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::wrap::wrap_text;

    #[test]
    fn test_missing_file_falls_back_to_bitmap() {
        let face = load_font_file(Path::new("/definitely/not/here/arial.ttf"));
        assert!(face.is_none());
        let font = SlideFont::sized(face.as_ref(), 60.0);
        assert!(font.is_fallback());
    }

    #[test]
    fn test_garbage_file_falls_back_to_bitmap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        assert!(load_font_file(&path).is_none());
    }

    #[test]
    fn test_bitmap_scale_tracks_pixel_size() {
        assert!(matches!(SlideFont::bitmap(60.0), SlideFont::Bitmap { scale: 8 }));
        assert!(matches!(SlideFont::bitmap(40.0), SlideFont::Bitmap { scale: 5 }));
        assert!(matches!(SlideFont::bitmap(2.0), SlideFont::Bitmap { scale: 1 }));
    }

    const FONT_DIRS: [&str; 3] = ["/usr/share/fonts", "/usr/local/share/fonts", "/Library/Fonts"];

    /// First parseable `.ttf` under the usual system font directories.
    fn system_font() -> Option<Font<'static>> {
        fn walk(dir: &Path, depth: u32) -> Option<Font<'static>> {
            let entries = std::fs::read_dir(dir).ok()?;
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() && depth < 4 {
                    if let Some(font) = walk(&path, depth + 1) {
                        return Some(font);
                    }
                } else if path
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
                {
                    if let Some(font) = std::fs::read(&path).ok().and_then(Font::try_from_vec) {
                        return Some(font);
                    }
                }
            }
            None
        }
        FONT_DIRS.iter().find_map(|d| walk(Path::new(d), 0))
    }

    #[test]
    fn test_truetype_wrap_stays_within_width() {
        let Some(face) = system_font() else {
            eprintln!("no system TrueType font found; skipping");
            return;
        };
        let font = SlideFont::sized(Some(&face), 40.0);
        assert!(!font.is_fallback());

        let text = "Build a portfolio of end to end projects covering ingestion, \
                    modelling, evaluation and deployment to production";
        let width = 600;
        let lines = wrap_text(text, width, &font);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(font.measure(line) <= width, "line too wide: {line}");
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>());
        assert!(font.measure("Roadmap") > 0);
    }

    #[test]
    fn test_truetype_draw_marks_canvas() {
        let Some(face) = system_font() else {
            eprintln!("no system TrueType font found; skipping");
            return;
        };
        let font = SlideFont::sized(Some(&face), 60.0);
        let background = Rgb([30, 30, 40]);
        let mut canvas = RgbImage::from_pixel(400, 120, background);

        font.draw(&mut canvas, Rgb([255, 255, 255]), 10, 10, "Roadmap");

        let inked = canvas.pixels().filter(|p| **p != background).count();
        assert!(inked > 0);
        let right = 10 + font.measure("Roadmap");
        assert!(canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != background)
            .all(|(x, _, _)| x <= right + 15));
    }

    #[test]
    fn test_bitmap_measure_delegates() {
        let font = SlideFont::bitmap(40.0);
        assert_eq!(font.measure("ab"), bitmap_font::measure("ab", 5));
    }
}
