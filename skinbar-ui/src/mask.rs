//! Window shape mask composition

use crate::geometry::{Rect, Size};
use crate::layout::{PatchLayout, PlacedCell};
use crate::overlay::{ContentInsets, OverlayPixmap, OverlayRegistry};
use crate::region::Region;
use crate::skin::SkinImage;

/// Builds shape masks from laid-out skins and overlays.
pub struct MaskCompositor;

impl MaskCompositor {
    /// Union of `tile`'s mask repeated from the origin of `rect` at the tile
    /// period, clipped to `rect`.
    pub fn tiled_mask(tile: &SkinImage, rect: Rect) -> Region {
        let (period_x, period_y) = (tile.width(), tile.height());
        if rect.is_empty() || period_x <= 0 || period_y <= 0 {
            return Region::new();
        }
        let mut union = Region::new();
        let mut dy = 0;
        while dy < rect.height {
            let mut dx = 0;
            while dx < rect.width {
                union.union_with(&tile.mask().translated(rect.x + dx, rect.y + dy));
                dx += period_x;
            }
            dy += period_y;
        }
        union.intersected_with_rect(rect)
    }

    /// Mask of one cell. Single-tile cells reuse the cached tile mask.
    pub fn cell_mask(cell: &PlacedCell) -> Region {
        if cell.is_tiled() {
            Self::tiled_mask(&cell.tile, cell.rect)
        } else {
            cell.tile.mask().translated(cell.rect.x, cell.rect.y)
        }
    }

    /// Mask contribution of an overlay, at the same position it is painted.
    pub fn overlay_mask(overlay: &OverlayPixmap, size: Size, insets: &ContentInsets) -> Option<Region> {
        let origin = overlay.calculate_position(size, insets)?;
        Some(overlay.image.mask().translated(origin.x, origin.y))
    }

    /// Union of all nine cell masks and all placed overlay masks.
    pub fn compose(layout: &PatchLayout, overlays: &OverlayRegistry, insets: &ContentInsets) -> Region {
        let mut mask = Region::new();
        for cell in layout.paint_order() {
            mask.union_with(&Self::cell_mask(cell));
        }
        for overlay in overlays.iter() {
            match Self::overlay_mask(overlay, layout.size(), insets) {
                Some(region) => mask.union_with(&region),
                None => log::debug!("Overlay '{}' has no anchor area, not masked", overlay.name),
            }
        }
        log::debug!(
            "Composed mask for {}x{}: {} pixels",
            layout.size().width,
            layout.size().height,
            mask.area()
        );
        mask
    }

    /// Status bar mask plus the rectangles of its property items.
    pub fn with_items(base: &Region, items: &[Rect]) -> Region {
        let mut mask = base.clone();
        for item in items {
            mask.add_rect(*item);
        }
        mask
    }
}
