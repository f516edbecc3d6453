//! Nine-patch layout for a target bar size

use std::sync::Arc;

use crate::geometry::{Rect, Size};
use crate::nine_patch::{NinePatchSkin, Part};
use crate::skin::SkinImage;

/// How an edge or the center fills its span along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TileMode {
    /// Resample to exactly fill the span.
    #[default]
    Scale,
    /// Repeat at native size, clipped to the span.
    Tile,
}

impl TileMode {
    /// A stretch margin of 0 means scale, anything else tiles.
    pub fn from_stretch_margin(value: i32) -> Self {
        if value == 0 {
            Self::Scale
        } else {
            Self::Tile
        }
    }
}

/// One laid-out slice: `tile` is repeated from the rect origin and clipped to
/// `rect`. Corners and fully scaled cells have a tile exactly the rect size.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub part: Part,
    pub rect: Rect,
    pub tile: Arc<SkinImage>,
}

impl PlacedCell {
    /// Whether the tile repeats (along at least one axis) inside the rect.
    pub fn is_tiled(&self) -> bool {
        self.tile.size() != self.rect.size()
    }
}

/// Final geometry of all nine slices for one bar size.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchLayout {
    size: Size,
    top_bottom_width: i32,
    left_right_height: i32,
    cells: [PlacedCell; 9],
}

impl PatchLayout {
    pub fn size(&self) -> Size {
        self.size
    }

    /// Span between the top-left and top-right corners.
    pub fn top_bottom_width(&self) -> i32 {
        self.top_bottom_width
    }

    /// Span between the top-left and bottom-left corners.
    pub fn left_right_height(&self) -> i32 {
        self.left_right_height
    }

    pub fn cell(&self, part: Part) -> &PlacedCell {
        &self.cells[part.index()]
    }

    /// Cells in paint order: corners, edges, center.
    pub fn paint_order(&self) -> impl Iterator<Item = &PlacedCell> {
        Part::PAINT_ORDER.iter().map(|p| self.cell(*p))
    }
}

/// Computes [`PatchLayout`]s from a [`NinePatchSkin`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutEngine {
    pub h_mode: TileMode,
    pub v_mode: TileMode,
}

impl LayoutEngine {
    pub fn new(h_mode: TileMode, v_mode: TileMode) -> Self {
        Self { h_mode, v_mode }
    }

    /// Lay out `skin` for a bar of `size`.
    ///
    /// Resampling always starts from the pristine slices held by the skin, so
    /// the result depends only on the inputs.
    pub fn layout(&self, skin: &NinePatchSkin, size: Size) -> PatchLayout {
        let tl = skin.part(Part::TopLeft);
        let tr = skin.part(Part::TopRight);
        let bl = skin.part(Part::BottomLeft);

        let top_bottom_width = (size.width - tl.width() - tr.width()).max(0);
        let left_right_height = (size.height - tl.height() - bl.height()).max(0);

        let hsl = tl.width();
        let vst = tl.height();
        let xs = [0, hsl, hsl + top_bottom_width];
        let ys = [0, vst, vst + left_right_height];

        let cells = Part::ALL.map(|part| {
            let source = skin.part(part);
            let (col, row) = (part.column(), part.row());
            let width = if col == 1 { top_bottom_width } else { source.width() };
            let height = if row == 1 { left_right_height } else { source.height() };
            let rect = Rect::new(xs[col], ys[row], width, height);

            let tile_width = if col == 1 && self.h_mode == TileMode::Tile {
                source.width()
            } else {
                width
            };
            let tile_height = if row == 1 && self.v_mode == TileMode::Tile {
                source.height()
            } else {
                height
            };
            let tile = resample(source, Size::new(tile_width, tile_height));
            PlacedCell { part, rect, tile }
        });

        log::debug!(
            "Layout {}x{}: top/bottom span {}, left/right span {} ({:?} x {:?})",
            size.width,
            size.height,
            top_bottom_width,
            left_right_height,
            self.h_mode,
            self.v_mode
        );

        PatchLayout {
            size,
            top_bottom_width,
            left_right_height,
            cells,
        }
    }
}

fn resample(source: &Arc<SkinImage>, size: Size) -> Arc<SkinImage> {
    if source.size() == size {
        Arc::clone(source)
    } else {
        Arc::new(source.resampled(size))
    }
}
