//! Software painting of the preedit bar, status bar and property items

pub mod canvas;

use image::{imageops, Rgba, RgbaImage};

use crate::content::{PreeditContent, PropertyItem};
use crate::geometry::{Point, Rect};
use crate::layout::PatchLayout;
use crate::region::Region;
use crate::size_hint::{candidate_text, pair_height};
use crate::skin::SkinImage;
use crate::text::{FontSpec, TextRenderer};
use crate::theme::{DisplayConfig, Orientation, ThemeScheme};

/// Everything the preedit bar is painted from, for one bar size.
pub struct PreeditScene<'a> {
    pub scheme: &'a ThemeScheme,
    pub display: &'a DisplayConfig,
    pub orientation: Orientation,
    pub layout: &'a PatchLayout,
    /// Mask and colour of the background fill, when colorizing.
    pub colorize: Option<(&'a Region, Rgba<u8>)>,
}

pub struct Renderer;

impl Renderer {
    /// Paint the preedit bar into `canvas`, which should be the layout size.
    ///
    /// Order: background fill, corners, edges, center, overlays, then text
    /// offset by the content insets.
    pub fn draw_preedit_bar(
        canvas: &mut RgbaImage,
        scene: &PreeditScene<'_>,
        content: &PreeditContent,
        text: &mut dyn TextRenderer,
    ) {
        canvas::clear(canvas);
        if let Some((mask, color)) = scene.colorize {
            canvas::fill_region(canvas, mask, color);
        }

        for cell in scene.layout.paint_order() {
            canvas::draw_cell(canvas, cell);
        }

        let size = scene.layout.size();
        let insets = &scene.scheme.insets;
        for overlay in scene.scheme.overlays.iter() {
            if let Some(origin) = overlay.calculate_position(size, insets) {
                canvas::draw_image(canvas, overlay.image.pixels(), origin);
            }
        }

        Self::draw_preedit_text(canvas, scene, content, text);
    }

    fn draw_preedit_text(
        canvas: &mut RgbaImage,
        scene: &PreeditScene<'_>,
        content: &PreeditContent,
        text: &mut dyn TextRenderer,
    ) {
        let display = scene.display;
        let p = scene.scheme.preedit_margins;
        let z = scene.scheme.candidate_margins;
        let base = Point::new(scene.scheme.insets.left, scene.scheme.insets.top);
        let preedit_height = text.line_height(&display.preedit_font);

        if content.preedit_visible || content.aux_visible {
            let origin = base.offset(p.left, p.top);
            let content_box = scene.scheme.insets.content_rect(scene.layout.size());
            let clip = Rect::new(origin.x, origin.y, content_box.width - p.horizontal(), preedit_height);
            Self::draw_clipped_text(
                canvas,
                text,
                &display.preedit_font,
                display.preedit_color,
                clip,
                &content.preedit_line(),
            );
            if content.preedit_visible {
                let caret = text.text_width(&display.preedit_font, content.text_before_cursor());
                canvas::draw_vline(
                    canvas,
                    origin.x + caret,
                    origin.y,
                    origin.y + preedit_height,
                    display.preedit_color,
                );
            }
        }

        // The preedit line keeps its space even when hidden.
        let mut y = p.top + preedit_height + p.bottom;
        if !content.lookup_visible {
            return;
        }

        y += z.top;
        let line = pair_height(display, text);
        let label_height = text.line_height(&display.label_font);
        let candidate_height = text.line_height(&display.candidate_font);
        let mut x = z.left;
        for (label, candidate) in content.pairs() {
            if scene.orientation == Orientation::Vertical {
                x = z.left;
            }
            let label_y = y + (line - label_height) / 2;
            text.draw_text(
                canvas,
                &display.label_font,
                display.label_color,
                base.offset(x, label_y),
                label,
            );
            x += text.text_width(&display.label_font, label);

            let candidate = candidate_text(candidate, scene.orientation);
            let candidate_y = y + (line - candidate_height) / 2;
            text.draw_text(
                canvas,
                &display.candidate_font,
                display.candidate_color,
                base.offset(x, candidate_y),
                &candidate,
            );
            x += text.text_width(&display.candidate_font, &candidate);

            if scene.orientation == Orientation::Vertical {
                y += line;
            }
        }
    }

    /// Draw one line of text starting at the top-left of `clip`, dropping
    /// whatever falls outside it.
    fn draw_clipped_text(
        canvas: &mut RgbaImage,
        text: &mut dyn TextRenderer,
        font: &FontSpec,
        color: Rgba<u8>,
        clip: Rect,
        line: &str,
    ) {
        if clip.is_empty() || line.is_empty() {
            return;
        }
        let (w, h) = clip.size().to_u32();
        let mut scratch = RgbaImage::new(w, h);
        text.draw_text(&mut scratch, font, color, Point::ORIGIN, line);
        canvas::draw_image(canvas, &scratch, clip.origin());
    }

    /// Paint the status bar: background fill, then the skin already
    /// resampled to the bar size.
    pub fn draw_status_bar(canvas: &mut RgbaImage, skin: &SkinImage, colorize: Option<(&Region, Rgba<u8>)>) {
        canvas::clear(canvas);
        if let Some((mask, color)) = colorize {
            canvas::fill_region(canvas, mask, color);
        }
        canvas::draw_image(canvas, skin.pixels(), Point::ORIGIN);
    }

    /// Paint a property item into `rect`: its icon stretched to the rect, or
    /// its label centred.
    pub fn draw_property_item(
        canvas: &mut RgbaImage,
        rect: Rect,
        item: &PropertyItem,
        display: &DisplayConfig,
        text: &mut dyn TextRenderer,
    ) {
        if rect.is_empty() {
            return;
        }
        match &item.icon {
            Some(icon) => {
                let (w, h) = rect.size().to_u32();
                let scaled = if icon.dimensions() == (w, h) {
                    icon.clone()
                } else {
                    imageops::resize(icon, w, h, imageops::FilterType::Triangle)
                };
                canvas::draw_image(canvas, &scaled, rect.origin());
            }
            None => {
                let font = &display.label_font;
                let w = text.text_width(font, &item.label);
                let h = text.line_height(font);
                let origin = Point::new(
                    rect.x + (rect.width - w) / 2,
                    rect.y + (rect.height - h) / 2,
                );
                text.draw_text(canvas, font, display.label_color, origin, &item.label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Margins, Size};
    use crate::layout::LayoutEngine;
    use crate::nine_patch::{Cuts, NinePatchSkin};
    use crate::overlay::{ContentInsets, OverlayAlign, OverlayPixmap, OverlayRegistry};
    use crate::testutil::FixedAdvanceText;
    use std::sync::Arc;

    const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

    fn scheme(overlays: OverlayRegistry) -> ThemeScheme {
        let image = SkinImage::new(RgbaImage::from_pixel(40, 30, GREY));
        let insets = ContentInsets::scan(&overlays);
        ThemeScheme {
            skin: NinePatchSkin::slice(&image, Cuts::normalized(5, 35, 5, 25, image.size())),
            layout: LayoutEngine::default(),
            preedit_margins: Margins::new(2, 2, 3, 3),
            candidate_margins: Margins::new(1, 1, 4, 4),
            overlays,
            insets,
        }
    }

    fn display() -> DisplayConfig {
        let font = FontSpec::new("", 10, true);
        DisplayConfig {
            preedit_font: font.clone(),
            candidate_font: font.clone(),
            label_font: font,
            preedit_color: RED,
            candidate_color: BLUE,
            label_color: GREEN,
        }
    }

    fn render(scheme: &ThemeScheme, orientation: Orientation, content: &PreeditContent, size: Size) -> RgbaImage {
        let layout = scheme.layout.layout(&scheme.skin, size);
        let display = display();
        let scene = PreeditScene {
            scheme,
            display: &display,
            orientation,
            layout: &layout,
            colorize: None,
        };
        let (w, h) = size.to_u32();
        let mut canvas = RgbaImage::new(w, h);
        Renderer::draw_preedit_bar(&mut canvas, &scene, content, &mut FixedAdvanceText::new(6));
        canvas
    }

    #[test]
    fn skin_fills_the_bar() {
        let canvas = render(&scheme(OverlayRegistry::new()), Orientation::Horizontal, &PreeditContent::default(), Size::new(100, 50));
        assert!(canvas.pixels().all(|p| *p == GREY));
    }

    #[test]
    fn preedit_text_and_caret() {
        let content = PreeditContent {
            text: "ab".into(),
            cursor: 1,
            preedit_visible: true,
            ..Default::default()
        };
        let canvas = render(&scheme(OverlayRegistry::new()), Orientation::Horizontal, &content, Size::new(100, 50));
        // text starts at (pl, pt) = (3, 2)
        assert_eq!(canvas.get_pixel(3, 2), &RED);
        assert_eq!(canvas.get_pixel(2, 2), &GREY);
        // second char box ends at x = 15
        assert_eq!(canvas.get_pixel(15, 2), &GREY);
    }

    #[test]
    fn long_aux_text_is_clipped_to_content_width() {
        let content = PreeditContent {
            aux_text: "a".repeat(20),
            aux_visible: true,
            ..Default::default()
        };
        let canvas = render(&scheme(OverlayRegistry::new()), Orientation::Horizontal, &content, Size::new(40, 30));
        // content width 40, minus pl + pr = 6 -> text spans x 3..37
        assert_eq!(canvas.get_pixel(36, 2), &RED);
        assert_eq!(canvas.get_pixel(37, 2), &GREY);
        assert_eq!(canvas.get_pixel(39, 2), &GREY);
    }

    #[test]
    fn clip_narrows_with_right_overlay_inset() {
        let mut overlays = OverlayRegistry::new();
        let badge = SkinImage::new(RgbaImage::from_pixel(10, 6, BLUE));
        overlays.insert(OverlayPixmap::new(
            "badge",
            Arc::new(badge),
            OverlayAlign::from_values(&[0, 0, 0, 0, 0, 0, 0, 0, 3, 0]),
        ));
        let content = PreeditContent {
            aux_text: "a".repeat(20),
            aux_visible: true,
            ..Default::default()
        };
        let scheme = scheme(overlays);
        let canvas = render(&scheme, Orientation::Horizontal, &content, Size::new(60, 30));
        // right inset 10: text spans x 3..47 and leaves the overlay alone
        assert_eq!(canvas.get_pixel(46, 8), &RED);
        assert_eq!(canvas.get_pixel(47, 8), &GREY);
        assert_eq!(canvas.get_pixel(50, 2), &BLUE);
    }

    #[test]
    fn horizontal_candidates_follow_each_other() {
        let content = PreeditContent {
            lookup_visible: true,
            labels: vec!["1".into(), "2".into()],
            candidates: vec!["x".into(), " y ".into()],
            ..Default::default()
        };
        let canvas = render(&scheme(OverlayRegistry::new()), Orientation::Horizontal, &content, Size::new(100, 50));
        // candidate block top: pt + line + pb + zt = 2 + 12 + 2 + 1 = 17
        let y = 17;
        assert_eq!(canvas.get_pixel(4, y), &GREEN); // "1" at zl
        assert_eq!(canvas.get_pixel(10, y), &BLUE); // "x"
        assert_eq!(canvas.get_pixel(16, y), &GREY); // trailing space
        assert_eq!(canvas.get_pixel(22, y), &GREEN); // "2"
        assert_eq!(canvas.get_pixel(28, y), &BLUE); // "y", trimmed
    }

    #[test]
    fn vertical_candidates_stack() {
        let content = PreeditContent {
            lookup_visible: true,
            labels: vec!["1".into(), "2".into()],
            candidates: vec!["x".into(), "y".into()],
            ..Default::default()
        };
        let canvas = render(&scheme(OverlayRegistry::new()), Orientation::Vertical, &content, Size::new(100, 50));
        assert_eq!(canvas.get_pixel(4, 17), &GREEN);
        assert_eq!(canvas.get_pixel(4, 29), &GREEN);
        assert_eq!(canvas.get_pixel(10, 29), &BLUE);
    }

    #[test]
    fn overlay_painted_and_text_shifted_by_insets() {
        let mut overlays = OverlayRegistry::new();
        let badge = SkinImage::new(RgbaImage::from_pixel(8, 6, RED));
        overlays.insert(OverlayPixmap::new(
            "badge",
            Arc::new(badge),
            OverlayAlign::from_values(&[0, 0, 0, 0, 0, 0, 0, 0, 1, 0]),
        ));
        let content = PreeditContent {
            text: "a".into(),
            preedit_visible: true,
            cursor: 0,
            ..Default::default()
        };
        let scheme = scheme(overlays);
        let canvas = render(&scheme, Orientation::Horizontal, &content, Size::new(100, 50));
        assert_eq!(canvas.get_pixel(0, 0), &RED);
        assert_eq!(canvas.get_pixel(8, 6), &GREY);
        // text origin moves to (opl + pl, opt + pt) = (11, 8)
        assert_eq!(canvas.get_pixel(12, 8), &RED);
        assert_eq!(canvas.get_pixel(12, 7), &GREY);
    }

    #[test]
    fn property_item_icon_is_stretched() {
        let mut canvas = RgbaImage::new(20, 20);
        let item = PropertyItem::with_icon(RgbaImage::from_pixel(2, 2, BLUE));
        Renderer::draw_property_item(&mut canvas, Rect::new(5, 5, 10, 10), &item, &display(), &mut FixedAdvanceText::new(4));
        assert_eq!(canvas.get_pixel(5, 5), &BLUE);
        assert_eq!(canvas.get_pixel(14, 14), &BLUE);
        assert_eq!(canvas.get_pixel(15, 15)[3], 0);
    }

    #[test]
    fn property_item_label_is_centred() {
        let mut canvas = RgbaImage::new(20, 20);
        let item = PropertyItem::with_label("ab");
        Renderer::draw_property_item(&mut canvas, Rect::new(0, 0, 20, 20), &item, &display(), &mut FixedAdvanceText::new(4));
        // 8 px wide, 12 px tall -> origin (6, 4)
        assert_eq!(canvas.get_pixel(6, 4), &GREEN);
        assert_eq!(canvas.get_pixel(5, 4)[3], 0);
        assert_eq!(canvas.get_pixel(13, 15), &GREEN);
        assert_eq!(canvas.get_pixel(14, 15)[3], 0);
    }

    #[test]
    fn status_bar_fill_then_skin() {
        let mut canvas = RgbaImage::new(6, 2);
        let mut pixels = RgbaImage::new(6, 2);
        pixels.put_pixel(0, 0, GREY);
        let skin = SkinImage::new(pixels);
        let mask = Region::from_rect(Rect::new(0, 0, 6, 1));
        Renderer::draw_status_bar(&mut canvas, &skin, Some((&mask, BLUE)));
        assert_eq!(canvas.get_pixel(0, 0), &GREY);
        assert_eq!(canvas.get_pixel(3, 0), &BLUE);
        assert_eq!(canvas.get_pixel(3, 1)[3], 0);
    }
}
