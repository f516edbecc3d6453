//! Font metrics and single-line text drawing

use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use image::{Pixel, Rgba, RgbaImage};

use crate::geometry::Point;

/// A font request: family name, pixel size, weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: String,
    pub pixel_size: i32,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: String::new(),
            pixel_size: 12,
            bold: true,
        }
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, pixel_size: i32, bold: bool) -> Self {
        Self {
            family: family.into(),
            pixel_size,
            bold,
        }
    }

    /// Line height used for every text line: 1.2 x the pixel size, rounded up.
    pub fn line_height(&self) -> i32 {
        (self.pixel_size.max(1) * 6 + 4) / 5
    }
}

/// Measures and draws single lines of text.
///
/// The renderer and the size hint both go through this trait, so what is
/// measured is what gets drawn.
pub trait TextRenderer {
    /// Advance width of `text` in pixels.
    fn text_width(&mut self, font: &FontSpec, text: &str) -> i32;

    /// Height of one line in pixels.
    fn line_height(&mut self, font: &FontSpec) -> i32 {
        font.line_height()
    }

    /// Draw `text` with its line box top-left at `origin`.
    fn draw_text(&mut self, canvas: &mut RgbaImage, font: &FontSpec, color: Rgba<u8>, origin: Point, text: &str);
}

/// [`TextRenderer`] backed by cosmic-text with system fonts.
pub struct CosmicTextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl CosmicTextRenderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    fn shaped(&mut self, font: &FontSpec, text: &str) -> Buffer {
        let size = font.pixel_size.max(1) as f32;
        let line_height = font.line_height() as f32;
        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(size, line_height));
        // Wide enough that a single line never wraps.
        buffer.set_size(&mut self.font_system, f32::MAX, line_height);

        let family = if font.family.trim().is_empty() {
            Family::SansSerif
        } else {
            Family::Name(font.family.trim())
        };
        let mut attrs = Attrs::new().family(family);
        if font.bold {
            attrs = attrs.weight(Weight::BOLD);
        }
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer
    }
}

impl Default for CosmicTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer for CosmicTextRenderer {
    fn text_width(&mut self, font: &FontSpec, text: &str) -> i32 {
        if text.is_empty() {
            return 0;
        }
        let buffer = self.shaped(font, text);
        let width: f32 = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(0.0);
        width.ceil() as i32
    }

    fn draw_text(&mut self, canvas: &mut RgbaImage, font: &FontSpec, color: Rgba<u8>, origin: Point, text: &str) {
        if text.is_empty() {
            return;
        }
        let buffer = self.shaped(font, text);
        let [r, g, b, a] = color.0;
        let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgba(r, g, b, a),
            |x, y, w, h, c| {
                let src = Rgba([c.r(), c.g(), c.b(), c.a()]);
                for py in 0..h as i32 {
                    for px in 0..w as i32 {
                        let tx = origin.x + x + px;
                        let ty = origin.y + y + py;
                        if tx >= 0 && ty >= 0 && tx < cw && ty < ch {
                            canvas.get_pixel_mut(tx as u32, ty as u32).blend(&src);
                        }
                    }
                }
            },
        );
    }
}
