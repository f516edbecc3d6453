//! Shared fixtures for unit tests

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use zip::write::SimpleFileOptions;

use crate::geometry::Point;
use crate::text::{FontSpec, TextRenderer};
use crate::theme::ZipSource;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    encode_png(RgbaImage::from_pixel(width, height, color))
}

pub fn encode_png(image: RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn zip_bytes(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn zip_package(entries: &[(&str, Vec<u8>)]) -> ZipSource<Cursor<Vec<u8>>> {
    ZipSource::new(Cursor::new(zip_bytes(entries))).unwrap()
}

/// Every char is `advance` pixels wide; drawing fills a solid box per
/// non-space char so tests can find the text on the canvas.
pub struct FixedAdvanceText {
    pub advance: i32,
}

impl FixedAdvanceText {
    pub fn new(advance: i32) -> Self {
        Self { advance }
    }
}

impl TextRenderer for FixedAdvanceText {
    fn text_width(&mut self, _font: &FontSpec, text: &str) -> i32 {
        text.chars().count() as i32 * self.advance
    }

    fn draw_text(&mut self, canvas: &mut RgbaImage, font: &FontSpec, color: Rgba<u8>, origin: Point, text: &str) {
        let height = font.line_height();
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let left = origin.x + i as i32 * self.advance;
            for y in origin.y..origin.y + height {
                for x in left..left + self.advance {
                    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                        canvas.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }
    }
}
