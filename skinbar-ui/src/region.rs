//! Pixel regions used for window shape masks
//!
//! A [`Region`] is stored as sorted, non-overlapping, non-adjacent horizontal
//! spans per row, so two regions covering the same pixels are always equal.

use std::collections::BTreeMap;

use image::RgbaImage;

use crate::geometry::Rect;

/// Half-open horizontal run `[start, end)` on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Span {
    start: i32,
    end: i32,
}

/// A set of pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Region {
    rows: BTreeMap<i32, Vec<Span>>,
}

impl Region {
    /// The empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// A region covering `rect` exactly.
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        region.add_rect(rect);
        region
    }

    /// Pixels of `image` whose alpha is greater than `threshold`.
    pub fn from_alpha(image: &RgbaImage, threshold: u8) -> Self {
        let mut rows = BTreeMap::new();
        for (y, row) in image.rows().enumerate() {
            let mut spans = Vec::new();
            let mut run_start: Option<i32> = None;
            for (x, pixel) in row.enumerate() {
                let opaque = pixel.0[3] > threshold;
                match (opaque, run_start) {
                    (true, None) => run_start = Some(x as i32),
                    (false, Some(start)) => {
                        spans.push(Span { start, end: x as i32 });
                        run_start = None;
                    }
                    _ => {}
                }
            }
            if let Some(start) = run_start {
                spans.push(Span { start, end: image.width() as i32 });
            }
            if !spans.is_empty() {
                rows.insert(y as i32, spans);
            }
        }
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pixels in the region.
    pub fn area(&self) -> u64 {
        self.rows
            .values()
            .flat_map(|spans| spans.iter())
            .map(|s| (s.end - s.start) as u64)
            .sum()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rows
            .get(&y)
            .is_some_and(|spans| spans.iter().any(|s| x >= s.start && x < s.end))
    }

    /// Smallest rectangle enclosing every pixel, or None when empty.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let top = *self.rows.keys().next()?;
        let bottom = *self.rows.keys().next_back()? + 1;
        let left = self.rows.values().filter_map(|s| s.first()).map(|s| s.start).min()?;
        let right = self.rows.values().filter_map(|s| s.last()).map(|s| s.end).max()?;
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Copy of the region shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Region {
        if dx == 0 && dy == 0 {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .map(|(y, spans)| {
                let shifted = spans
                    .iter()
                    .map(|s| Span { start: s.start + dx, end: s.end + dx })
                    .collect();
                (y + dy, shifted)
            })
            .collect();
        Region { rows }
    }

    pub fn add_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let span = [Span { start: rect.x, end: rect.right() }];
        for y in rect.y..rect.bottom() {
            self.merge_row(y, &span);
        }
    }

    /// Add every pixel of `other` to this region.
    pub fn union_with(&mut self, other: &Region) {
        for (y, spans) in &other.rows {
            self.merge_row(*y, spans);
        }
    }

    /// Pixels of this region that also lie inside `rect`.
    pub fn intersected_with_rect(&self, rect: Rect) -> Region {
        if rect.is_empty() {
            return Region::new();
        }
        let rows = self
            .rows
            .range(rect.y..rect.bottom())
            .filter_map(|(y, spans)| {
                let clipped: Vec<Span> = spans
                    .iter()
                    .filter_map(|s| {
                        let start = s.start.max(rect.x);
                        let end = s.end.min(rect.right());
                        (end > start).then_some(Span { start, end })
                    })
                    .collect();
                (!clipped.is_empty()).then_some((*y, clipped))
            })
            .collect();
        Region { rows }
    }

    /// The region as rectangles, vertically adjacent rows with identical
    /// spans coalesced into one band.
    pub fn rects(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        let mut band: Option<(i32, i32, &Vec<Span>)> = None;
        for (y, spans) in &self.rows {
            match band {
                Some((top, bottom, band_spans)) if bottom == *y && band_spans == spans => {
                    band = Some((top, bottom + 1, band_spans));
                }
                _ => {
                    if let Some((top, bottom, band_spans)) = band {
                        push_band(&mut out, top, bottom, band_spans);
                    }
                    band = Some((*y, *y + 1, spans));
                }
            }
        }
        if let Some((top, bottom, band_spans)) = band {
            push_band(&mut out, top, bottom, band_spans);
        }
        out
    }

    fn merge_row(&mut self, y: i32, incoming: &[Span]) {
        if incoming.is_empty() {
            return;
        }
        let row = self.rows.entry(y).or_default();
        row.extend_from_slice(incoming);
        row.sort_unstable();
        let mut merged: Vec<Span> = Vec::with_capacity(row.len());
        for span in row.drain(..) {
            match merged.last_mut() {
                Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        *row = merged;
    }
}

fn push_band(out: &mut Vec<Rect>, top: i32, bottom: i32, spans: &[Span]) {
    for s in spans {
        out.push(Rect::new(s.start, top, s.end - s.start, bottom - top));
    }
}
