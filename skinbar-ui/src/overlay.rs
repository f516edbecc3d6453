//! Overlay decorations anchored to a 3x3 grid around the bar content

use std::sync::Arc;

use crate::geometry::{Margins, Point, Rect, Size};
use crate::skin::SkinImage;

/// Anchor area of an overlay, numbered 1..=9 in the theme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignArea {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Position along one axis of the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Start,
    Middle,
    End,
}

impl AlignArea {
    /// Parse the numeric area from a theme file. Values outside 1..=9 are None.
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::TopLeft),
            2 => Some(Self::TopCenter),
            3 => Some(Self::TopRight),
            4 => Some(Self::CenterLeft),
            5 => Some(Self::Center),
            6 => Some(Self::CenterRight),
            7 => Some(Self::BottomLeft),
            8 => Some(Self::BottomCenter),
            9 => Some(Self::BottomRight),
            _ => None,
        }
    }

    fn column(self) -> Band {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => Band::Start,
            Self::TopCenter | Self::Center | Self::BottomCenter => Band::Middle,
            Self::TopRight | Self::CenterRight | Self::BottomRight => Band::End,
        }
    }

    fn row(self) -> Band {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Band::Start,
            Self::CenterLeft | Self::Center | Self::CenterRight => Band::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Band::End,
        }
    }
}

/// Alignment inside the middle band of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignMode {
    Center,
    Start,
    End,
}

impl AlignMode {
    /// 0 = center, 1 = start, 2 = end. Anything else is None.
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Center),
            1 => Some(Self::Start),
            2 => Some(Self::End),
            _ => None,
        }
    }
}

/// Alignment record of an overlay as written in its `<name>_align` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayAlign {
    pub margins: Margins,
    /// Sum of the two raw horizontal mode numbers.
    pub h_mode: i32,
    /// Sum of the two raw vertical mode numbers.
    pub v_mode: i32,
    pub area: i32,
    /// Secondary target tag, kept as read.
    pub target: i32,
}

impl OverlayAlign {
    /// Number of values in an `_align` list.
    pub const FIELD_COUNT: usize = 10;

    /// Build from the ten `_align` numbers. Missing values read as 0.
    pub fn from_values(values: &[i32]) -> Self {
        if values.len() < Self::FIELD_COUNT {
            log::warn!(
                "Overlay alignment has {} of {} values, padding with 0",
                values.len(),
                Self::FIELD_COUNT
            );
        }
        let at = |i: usize| values.get(i).copied().unwrap_or(0);
        Self {
            margins: Margins::from_values(&[at(0), at(1), at(2), at(3)]),
            h_mode: at(4) + at(5),
            v_mode: at(6) + at(7),
            area: at(8),
            target: at(9),
        }
    }

    pub fn area(&self) -> Option<AlignArea> {
        AlignArea::from_raw(self.area)
    }
}

/// Space reserved around the text content so no overlay covers it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentInsets {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl ContentInsets {
    /// Largest extent any overlay occupies on each side.
    pub fn scan(overlays: &OverlayRegistry) -> Self {
        let mut insets = Self::default();
        for overlay in overlays.iter() {
            let Some(area) = overlay.align.area() else { continue };
            let (w, h) = (overlay.image.width(), overlay.image.height());
            match area.column() {
                Band::Start => insets.left = insets.left.max(w),
                Band::End => insets.right = insets.right.max(w),
                Band::Middle => {}
            }
            match area.row() {
                Band::Start => insets.top = insets.top.max(h),
                Band::End => insets.bottom = insets.bottom.max(h),
                Band::Middle => {}
            }
        }
        insets
    }

    /// Inner content box of a bar of `size`.
    pub fn content_rect(&self, size: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            size.width - self.left - self.right,
            size.height - self.top - self.bottom,
        )
    }
}

/// Offset along one axis.
///
/// `extent` is the bar width/height, `near`/`far` the insets on that axis,
/// `own` the overlay extent, `lead`/`trail` the margins facing the start and
/// end of the axis.
#[allow(clippy::too_many_arguments)]
fn axis_offset(
    band: Band,
    mode: i32,
    extent: i32,
    near: i32,
    far: i32,
    own: i32,
    lead: i32,
    trail: i32,
) -> i32 {
    match band {
        Band::Start => -trail,
        Band::End => extent - far + lead,
        Band::Middle => match AlignMode::from_raw(mode) {
            Some(AlignMode::Start) => near + lead,
            Some(AlignMode::Center) => near + (extent - near - far - own) / 2,
            Some(AlignMode::End) => extent - far - own - trail,
            None => 0,
        },
    }
}

/// A decorative image registered under a name.
#[derive(Debug, Clone)]
pub struct OverlayPixmap {
    pub name: String,
    pub image: Arc<SkinImage>,
    pub align: OverlayAlign,
}

impl OverlayPixmap {
    pub fn new(name: impl Into<String>, image: Arc<SkinImage>, align: OverlayAlign) -> Self {
        Self {
            name: name.into(),
            image,
            align,
        }
    }

    /// Top-left position of the overlay on a bar of `size`.
    ///
    /// Returns None when the anchor area is not 1..=9; such overlays are
    /// neither painted nor masked. Painting and masking both use this result.
    pub fn calculate_position(&self, size: Size, insets: &ContentInsets) -> Option<Point> {
        let area = self.align.area()?;
        let m = self.align.margins;
        let x = axis_offset(
            area.column(),
            self.align.h_mode,
            size.width,
            insets.left,
            insets.right,
            self.image.width(),
            m.left,
            m.right,
        );
        let y = axis_offset(
            area.row(),
            self.align.v_mode,
            size.height,
            insets.top,
            insets.bottom,
            self.image.height(),
            m.top,
            m.bottom,
        );
        Some(Point::new(x, y))
    }
}

/// Overlays keyed by name, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    entries: Vec<OverlayPixmap>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overlay. A name registered twice keeps its first position
    /// and takes the new value.
    pub fn insert(&mut self, overlay: OverlayPixmap) {
        match self.entries.iter_mut().find(|o| o.name == overlay.name) {
            Some(existing) => *existing = overlay,
            None => self.entries.push(overlay),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OverlayPixmap> {
        self.entries.iter().find(|o| o.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayPixmap> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn overlay(name: &str, w: u32, h: u32, values: &[i32]) -> OverlayPixmap {
        let image = SkinImage::new(RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255])));
        OverlayPixmap::new(name, Arc::new(image), OverlayAlign::from_values(values))
    }

    #[test]
    fn short_align_list_pads_with_zero() {
        let align = OverlayAlign::from_values(&[1, 2, 3]);
        assert_eq!(align.margins, Margins::new(1, 2, 3, 0));
        assert_eq!(align.h_mode, 0);
        assert_eq!(align.area, 0);
        assert_eq!(align.area(), None);
    }

    #[test]
    fn modes_are_sums_of_raw_pairs() {
        let align = OverlayAlign::from_values(&[0, 0, 0, 0, 1, 1, 0, 1, 5, 7]);
        assert_eq!(align.h_mode, 2);
        assert_eq!(align.v_mode, 1);
        assert_eq!(align.area(), Some(AlignArea::Center));
        assert_eq!(align.target, 7);
    }

    #[test]
    fn center_area_centers_in_content_box() {
        let op = overlay("logo", 20, 10, &[0, 0, 0, 0, 0, 0, 0, 0, 5, 0]);
        let insets = ContentInsets { left: 6, right: 4, top: 3, bottom: 5 };
        let size = Size::new(120, 50);
        let content = insets.content_rect(size);
        let pos = op.calculate_position(size, &insets).unwrap();
        assert_eq!(pos.x - content.x, (content.width - 20) / 2);
        assert_eq!(pos.y - content.y, (content.height - 10) / 2);
    }

    #[test]
    fn corners_sit_in_the_inset_gutters() {
        let insets = ContentInsets { left: 10, right: 12, top: 8, bottom: 6 };
        let size = Size::new(100, 40);
        let tl = overlay("tl", 10, 8, &[1, 2, 3, 4, 0, 0, 0, 0, 1, 0]);
        assert_eq!(tl.calculate_position(size, &insets), Some(Point::new(-4, -2)));
        let br = overlay("br", 12, 6, &[1, 2, 3, 4, 0, 0, 0, 0, 9, 0]);
        assert_eq!(br.calculate_position(size, &insets), Some(Point::new(100 - 12 + 3, 40 - 6 + 1)));
    }

    #[test]
    fn edge_modes_start_and_end() {
        let insets = ContentInsets { left: 10, right: 10, top: 8, bottom: 8 };
        let size = Size::new(100, 40);
        let start = overlay("s", 16, 8, &[0, 0, 2, 3, 1, 0, 0, 0, 2, 0]);
        assert_eq!(start.calculate_position(size, &insets), Some(Point::new(12, 0)));
        let end = overlay("e", 16, 8, &[0, 0, 2, 3, 2, 0, 0, 0, 8, 0]);
        assert_eq!(end.calculate_position(size, &insets), Some(Point::new(100 - 10 - 16 - 3, 40 - 8)));
        let right_mid = overlay("r", 10, 8, &[1, 0, 2, 0, 0, 0, 1, 0, 6, 0]);
        assert_eq!(right_mid.calculate_position(size, &insets), Some(Point::new(92, 9)));
    }

    #[test]
    fn unknown_mode_leaves_axis_at_zero() {
        let op = overlay("odd", 10, 10, &[0, 0, 5, 5, 3, 0, 0, 0, 2, 0]);
        let pos = op.calculate_position(Size::new(100, 40), &ContentInsets::default()).unwrap();
        assert_eq!(pos.x, 0);
    }

    #[test]
    fn invalid_area_is_not_placed() {
        let op = overlay("bad", 10, 10, &[0, 0, 0, 0, 0, 0, 0, 0, 12, 0]);
        assert_eq!(op.calculate_position(Size::new(100, 40), &ContentInsets::default()), None);
    }

    #[test]
    fn insets_take_the_largest_overlay_per_side() {
        let mut reg = OverlayRegistry::new();
        reg.insert(overlay("a", 10, 4, &[0, 0, 0, 0, 0, 0, 0, 0, 1, 0]));
        reg.insert(overlay("b", 6, 9, &[0, 0, 0, 0, 0, 0, 0, 0, 7, 0]));
        reg.insert(overlay("c", 30, 30, &[0, 0, 0, 0, 0, 0, 0, 0, 5, 0]));
        reg.insert(overlay("d", 5, 12, &[0, 0, 0, 0, 0, 0, 0, 0, 6, 0]));
        reg.insert(overlay("e", 50, 50, &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]));
        let insets = ContentInsets::scan(&reg);
        assert_eq!(insets, ContentInsets { left: 10, right: 5, top: 4, bottom: 9 });
    }

    #[test]
    fn registry_keeps_first_insertion_order() {
        let mut reg = OverlayRegistry::new();
        reg.insert(overlay("b", 1, 1, &[]));
        reg.insert(overlay("a", 1, 1, &[]));
        reg.insert(overlay("b", 2, 2, &[]));
        let names: Vec<&str> = reg.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(reg.get("b").unwrap().image.width(), 2);
    }
}
