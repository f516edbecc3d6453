//! Nine-patch (9-slice) skins.
//!
//! The source image is divided into a 3x3 grid by two vertical cuts
//! (`hsl`, `hsr`) and two horizontal cuts (`vst`, `vsb`):
//!
//! ```text
//!          |         |          |
//! ---------+---------+---------vst
//!          |         |          |
//! ---------+---------+---------vsb
//!          |         |          |
//! --------hsl-------hsr-------width
//! ```
//!
//! Corners keep their size, edges stretch or tile along one axis and the
//! center along both.

use std::sync::Arc;

use crate::geometry::{Rect, Size};
use crate::skin::SkinImage;

/// One of the nine slices, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Part {
    pub const ALL: [Part; 9] = [
        Part::TopLeft,
        Part::Top,
        Part::TopRight,
        Part::Left,
        Part::Center,
        Part::Right,
        Part::BottomLeft,
        Part::Bottom,
        Part::BottomRight,
    ];

    /// Fixed paint order: corners, then edges, then center.
    pub const PAINT_ORDER: [Part; 9] = [
        Part::TopLeft,
        Part::TopRight,
        Part::BottomLeft,
        Part::BottomRight,
        Part::Top,
        Part::Bottom,
        Part::Left,
        Part::Right,
        Part::Center,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column of the part in the 3x3 grid (0 = left).
    pub fn column(self) -> usize {
        self.index() % 3
    }

    /// Row of the part in the 3x3 grid (0 = top).
    pub fn row(self) -> usize {
        self.index() / 3
    }
}

/// Normalized cut coordinates: `0 <= hsl <= hsr <= width`, `0 <= vst <= vsb <= height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cuts {
    pub hsl: i32,
    pub hsr: i32,
    pub vst: i32,
    pub vsb: i32,
}

impl Cuts {
    /// Swap reversed pairs and clamp everything into the image bounds.
    pub fn normalized(hsl: i32, hsr: i32, vst: i32, vsb: i32, size: Size) -> Self {
        let (hsl, hsr) = if hsl > hsr { (hsr, hsl) } else { (hsl, hsr) };
        let (vst, vsb) = if vst > vsb { (vsb, vst) } else { (vst, vsb) };
        let w = size.width.max(0);
        let h = size.height.max(0);
        Self {
            hsl: hsl.clamp(0, w),
            hsr: hsr.clamp(0, w),
            vst: vst.clamp(0, h),
            vsb: vsb.clamp(0, h),
        }
    }

    /// Source rectangle of `part` inside an image of `size`.
    pub fn source_rect(&self, part: Part, size: Size) -> Rect {
        let xs = [0, self.hsl, self.hsr, size.width];
        let ys = [0, self.vst, self.vsb, size.height];
        let (c, r) = (part.column(), part.row());
        Rect::new(xs[c], ys[r], xs[c + 1] - xs[c], ys[r + 1] - ys[r])
    }
}

/// A source image sliced into nine parts, each with its own cached mask.
#[derive(Debug, Clone, Default)]
pub struct NinePatchSkin {
    size: Size,
    cuts: Cuts,
    parts: [Arc<SkinImage>; 9],
}

impl NinePatchSkin {
    /// Slice `source` along `cuts`. The cuts must already be normalized for
    /// the source size.
    pub fn slice(source: &SkinImage, cuts: Cuts) -> Self {
        let size = source.size();
        let parts = Part::ALL.map(|part| Arc::new(source.crop(cuts.source_rect(part, size))));
        log::debug!(
            "Sliced {}x{} skin at hsl={} hsr={} vst={} vsb={}",
            size.width,
            size.height,
            cuts.hsl,
            cuts.hsr,
            cuts.vst,
            cuts.vsb
        );
        Self { size, cuts, parts }
    }

    /// Natural size of the skin (`skinWidth`, `skinHeight`).
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn cuts(&self) -> Cuts {
        self.cuts
    }

    pub fn part(&self, part: Part) -> &Arc<SkinImage> {
        &self.parts[part.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use proptest::prelude::*;

    fn skin(w: u32, h: u32) -> SkinImage {
        SkinImage::new(RgbaImage::from_pixel(w, h, Rgba([200, 100, 50, 255])))
    }

    #[test]
    fn reversed_cuts_are_swapped() {
        let cuts = Cuts::normalized(180, 20, 90, 10, Size::new(200, 100));
        assert_eq!(cuts, Cuts { hsl: 20, hsr: 180, vst: 10, vsb: 90 });
    }

    #[test]
    fn out_of_range_cuts_are_clamped() {
        let cuts = Cuts::normalized(-5, 300, 10, 120, Size::new(200, 100));
        assert_eq!(cuts, Cuts { hsl: 0, hsr: 200, vst: 10, vsb: 100 });
    }

    #[test]
    fn slice_part_sizes() {
        let src = skin(200, 100);
        let cuts = Cuts::normalized(20, 180, 10, 90, src.size());
        let np = NinePatchSkin::slice(&src, cuts);
        assert_eq!(np.size(), Size::new(200, 100));
        assert_eq!(np.part(Part::TopLeft).size(), Size::new(20, 10));
        assert_eq!(np.part(Part::Top).size(), Size::new(160, 10));
        assert_eq!(np.part(Part::Center).size(), Size::new(160, 80));
        assert_eq!(np.part(Part::BottomRight).size(), Size::new(20, 10));
    }

    #[test]
    fn degenerate_cuts_give_empty_parts() {
        let src = skin(10, 10);
        let np = NinePatchSkin::slice(&src, Cuts::normalized(0, 10, 0, 10, src.size()));
        assert!(np.part(Part::TopLeft).is_empty());
        assert_eq!(np.part(Part::Center).size(), Size::new(10, 10));
    }

    #[test]
    fn part_masks_are_cached_per_slice() {
        let mut img = RgbaImage::from_pixel(30, 30, Rgba([1, 1, 1, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let src = SkinImage::new(img);
        let np = NinePatchSkin::slice(&src, Cuts::normalized(10, 20, 10, 20, src.size()));
        assert_eq!(np.part(Part::TopLeft).mask().area(), 99);
        assert_eq!(np.part(Part::Top).mask().area(), 100);
    }

    proptest! {
        #[test]
        fn slices_cover_the_source(
            w in 1u32..64,
            h in 1u32..64,
            a in 0i32..64,
            b in 0i32..64,
            c in 0i32..64,
            d in 0i32..64,
        ) {
            let src = skin(w, h);
            let cuts = Cuts::normalized(a, b, c, d, src.size());
            let np = NinePatchSkin::slice(&src, cuts);
            for row in 0..3 {
                let width: i32 = (0..3).map(|col| np.part(Part::ALL[row * 3 + col]).width()).sum();
                prop_assert_eq!(width, w as i32);
            }
            for col in 0..3 {
                let height: i32 = (0..3).map(|row| np.part(Part::ALL[row * 3 + col]).height()).sum();
                prop_assert_eq!(height, h as i32);
            }
        }
    }
}
