//! Skin images and their opacity masks

use image::{imageops, imageops::FilterType, RgbaImage};
use thiserror::Error;

use crate::geometry::{Rect, Size};
use crate::region::Region;

/// Pixels with alpha above this value belong to the opacity mask.
pub const MASK_ALPHA_THRESHOLD: u8 = 0;

#[derive(Error, Debug)]
pub enum SkinError {
    #[error("Failed to load image: {0}")]
    ImageLoadError(#[from] image::ImageError),
}

/// A decoded skin bitmap together with the mask of its non-transparent pixels.
///
/// The mask is derived once when the image is built and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinImage {
    pixels: RgbaImage,
    mask: Region,
}

impl Default for SkinImage {
    fn default() -> Self {
        Self::new(RgbaImage::new(0, 0))
    }
}

impl SkinImage {
    pub fn new(pixels: RgbaImage) -> Self {
        let mask = Region::from_alpha(&pixels, MASK_ALPHA_THRESHOLD);
        Self { pixels, mask }
    }

    /// Decode a skin image from encoded bytes (PNG, BMP, ...).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SkinError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::new(img.to_rgba8()))
    }

    /// Copy of the `rect` sub-area. The rect must lie inside the image; a
    /// zero-width or zero-height rect keeps its other extent.
    pub fn crop(&self, rect: Rect) -> SkinImage {
        if rect.is_empty() {
            let (w, h) = rect.size().to_u32();
            return SkinImage::new(RgbaImage::new(w, h));
        }
        let sub = imageops::crop_imm(
            &self.pixels,
            rect.x as u32,
            rect.y as u32,
            rect.width as u32,
            rect.height as u32,
        )
        .to_image();
        SkinImage::new(sub)
    }

    /// Resample to exactly `size`. An empty source or target yields an empty image.
    pub fn resampled(&self, size: Size) -> SkinImage {
        let (w, h) = size.to_u32();
        if (w, h) == self.pixels.dimensions() {
            return self.clone();
        }
        if w == 0 || h == 0 || self.is_empty() {
            return SkinImage::new(RgbaImage::new(w, h));
        }
        SkinImage::new(imageops::resize(&self.pixels, w, h, FilterType::Triangle))
    }

    pub fn width(&self) -> i32 {
        self.pixels.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.pixels.height() as i32
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Opacity mask in image coordinates.
    pub fn mask(&self) -> &Region {
        &self.mask
    }
}
