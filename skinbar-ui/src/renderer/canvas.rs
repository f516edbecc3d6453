//! Pixel operations on an RGBA canvas

use image::{imageops, Pixel, Rgba, RgbaImage};

use crate::geometry::{Point, Rect};
use crate::layout::PlacedCell;
use crate::region::Region;

fn bounds(canvas: &RgbaImage) -> Rect {
    Rect::new(0, 0, canvas.width() as i32, canvas.height() as i32)
}

/// Reset every pixel to transparent.
pub fn clear(canvas: &mut RgbaImage) {
    for pixel in canvas.pixels_mut() {
        *pixel = Rgba([0, 0, 0, 0]);
    }
}

/// Blend `color` over every pixel of `region`.
pub fn fill_region(canvas: &mut RgbaImage, region: &Region, color: Rgba<u8>) {
    let bounds = bounds(canvas);
    for rect in region.rects() {
        let Some(rect) = rect.intersect(&bounds) else { continue };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                canvas.get_pixel_mut(x as u32, y as u32).blend(&color);
            }
        }
    }
}

/// Alpha-blend `image` with its top-left at `origin`; parts off the canvas
/// are dropped.
pub fn draw_image(canvas: &mut RgbaImage, image: &RgbaImage, origin: Point) {
    imageops::overlay(canvas, image, origin.x as i64, origin.y as i64);
}

/// Repeat `tile` from the origin of `rect`, clipped to `rect`.
pub fn draw_tiled(canvas: &mut RgbaImage, tile: &RgbaImage, rect: Rect) {
    let (tw, th) = (tile.width() as i32, tile.height() as i32);
    if tw == 0 || th == 0 {
        return;
    }
    let Some(clip) = rect.intersect(&bounds(canvas)) else { return };
    for y in clip.y..clip.bottom() {
        let ty = (y - rect.y) % th;
        for x in clip.x..clip.right() {
            let tx = (x - rect.x) % tw;
            let src = *tile.get_pixel(tx as u32, ty as u32);
            canvas.get_pixel_mut(x as u32, y as u32).blend(&src);
        }
    }
}

/// Paint a laid-out nine-patch cell.
pub fn draw_cell(canvas: &mut RgbaImage, cell: &PlacedCell) {
    if cell.is_tiled() {
        draw_tiled(canvas, cell.tile.pixels(), cell.rect);
    } else {
        draw_image(canvas, cell.tile.pixels(), cell.rect.origin());
    }
}

/// One pixel wide vertical line covering rows `top..bottom`.
pub fn draw_vline(canvas: &mut RgbaImage, x: i32, top: i32, bottom: i32, color: Rgba<u8>) {
    let line = Rect::new(x, top, 1, bottom - top);
    let Some(line) = line.intersect(&bounds(canvas)) else { return };
    for y in line.y..line.bottom() {
        canvas.get_pixel_mut(x as u32, y as u32).blend(&color);
    }
}
