//! Preferred bar sizes from skin and content

use crate::content::PreeditContent;
use crate::geometry::Size;
use crate::text::TextRenderer;
use crate::theme::{DisplayConfig, Orientation, StatusBarSkin, ThemeScheme};

/// Width steps used when the preedit bar is not freely resizable.
pub const WIDTH_STEP: i32 = 70;

/// Candidate text as drawn: trimmed, with a trailing space separating pairs
/// on a horizontal bar.
pub(crate) fn candidate_text(candidate: &str, orientation: Orientation) -> String {
    match orientation {
        Orientation::Horizontal => format!("{} ", candidate.trim()),
        Orientation::Vertical => candidate.trim().to_string(),
    }
}

/// Height of one label/candidate line.
pub(crate) fn pair_height(display: &DisplayConfig, text: &mut dyn TextRenderer) -> i32 {
    text.line_height(&display.label_font)
        .max(text.line_height(&display.candidate_font))
}

/// Width a label/candidate pair advances the pen by.
pub(crate) fn pair_width(
    display: &DisplayConfig,
    orientation: Orientation,
    label: &str,
    candidate: &str,
    text: &mut dyn TextRenderer,
) -> i32 {
    text.text_width(&display.label_font, label)
        + text.text_width(&display.candidate_font, &candidate_text(candidate, orientation))
}

pub struct SizeHintCalculator;

impl SizeHintCalculator {
    /// Smallest size that fits the skin and the content.
    pub fn preedit_bar(
        scheme: &ThemeScheme,
        display: &DisplayConfig,
        orientation: Orientation,
        free_resizing: bool,
        content: &PreeditContent,
        text: &mut dyn TextRenderer,
    ) -> Size {
        let skin = scheme.skin.size();
        let p = scheme.preedit_margins;
        let z = scheme.candidate_margins;
        let insets = scheme.insets;

        let preedit_width = text.text_width(&display.preedit_font, &content.preedit_line());
        let line = pair_height(display, text);
        let pairs = content
            .pairs()
            .map(|(label, candidate)| pair_width(display, orientation, label, candidate, text));
        let (lookup_width, lookup_height) = match orientation {
            Orientation::Horizontal => (pairs.sum(), line),
            Orientation::Vertical => (pairs.max().unwrap_or(0), line * content.pair_count() as i32),
        };

        let content_width = (preedit_width + p.horizontal()).max(lookup_width + z.horizontal())
            + insets.left
            + insets.right;
        let content_height = p.vertical()
            + z.vertical()
            + text.line_height(&display.preedit_font)
            + lookup_height
            + insets.top
            + insets.bottom;

        let mut size = skin.expanded_to(Size::new(content_width, content_height));
        if !free_resizing {
            size.width = Self::round_width(skin.width, size.width);
        }
        size
    }

    /// Grow `width` to `skin_width + k * WIDTH_STEP` for the smallest `k`
    /// that covers it.
    pub fn round_width(skin_width: i32, width: i32) -> i32 {
        if width > skin_width {
            skin_width + ((width - skin_width - 1) / WIDTH_STEP + 1) * WIDTH_STEP
        } else {
            width
        }
    }

    pub fn status_bar(skin: &StatusBarSkin) -> Size {
        skin.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Margins;
    use crate::nine_patch::{Cuts, NinePatchSkin};
    use crate::skin::SkinImage;
    use crate::testutil::FixedAdvanceText;
    use crate::text::FontSpec;
    use image::{Rgba, RgbaImage};

    fn scheme(width: u32, height: u32) -> ThemeScheme {
        let image = SkinImage::new(RgbaImage::from_pixel(width, height, Rgba([9, 9, 9, 255])));
        let size = image.size();
        ThemeScheme {
            skin: NinePatchSkin::slice(&image, Cuts::normalized(10, size.width - 10, 5, size.height - 5, size)),
            preedit_margins: Margins::new(2, 3, 4, 6),
            candidate_margins: Margins::new(1, 1, 5, 5),
            ..Default::default()
        }
    }

    fn display() -> DisplayConfig {
        let font = FontSpec::new("", 10, true);
        DisplayConfig {
            preedit_font: font.clone(),
            candidate_font: font.clone(),
            label_font: font,
            ..Default::default()
        }
    }

    fn content(text: &str, pairs: &[(&str, &str)]) -> PreeditContent {
        PreeditContent {
            text: text.into(),
            labels: pairs.iter().map(|(l, _)| l.to_string()).collect(),
            candidates: pairs.iter().map(|(_, c)| c.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn width_rounds_up_in_steps() {
        assert_eq!(SizeHintCalculator::round_width(300, 340), 370);
        assert_eq!(SizeHintCalculator::round_width(300, 370), 370);
        assert_eq!(SizeHintCalculator::round_width(300, 371), 440);
        assert_eq!(SizeHintCalculator::round_width(300, 250), 250);
    }

    #[test]
    fn empty_content_gives_skin_size() {
        let mut text = FixedAdvanceText::new(8);
        let size = SizeHintCalculator::preedit_bar(
            &scheme(120, 60),
            &display(),
            Orientation::Horizontal,
            false,
            &PreeditContent::default(),
            &mut text,
        );
        assert_eq!(size, Size::new(120, 60));
    }

    #[test]
    fn horizontal_sums_pair_advances() {
        let mut text = FixedAdvanceText::new(10);
        // "1." + "ab " = 5 chars, "2." + "c " = 4 chars -> 90 px, plus 10 margins
        let c = content("", &[("1.", " ab "), ("2.", "c")]);
        let size = SizeHintCalculator::preedit_bar(&scheme(50, 20), &display(), Orientation::Horizontal, true, &c, &mut text);
        assert_eq!(size.width, 100);
        // margins 5 + 2, preedit line 12, one pair line 12
        assert_eq!(size.height, 31);
    }

    #[test]
    fn vertical_takes_widest_pair_and_stacks_lines() {
        let mut text = FixedAdvanceText::new(10);
        let c = content("pinyin", &[("1.", "a"), ("2.", "abcd"), ("3.", "ab")]);
        let size = SizeHintCalculator::preedit_bar(&scheme(50, 20), &display(), Orientation::Vertical, true, &c, &mut text);
        // preedit 60 + 10 margins; widest pair 6 chars = 60 + 10 margins
        assert_eq!(size.width, 70);
        assert_eq!(size.height, 7 + 12 + 3 * 12);
    }

    #[test]
    fn never_smaller_than_skin() {
        let mut text = FixedAdvanceText::new(3);
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for free in [true, false] {
                let c = content("x", &[("1", "y")]);
                let size = SizeHintCalculator::preedit_bar(&scheme(200, 100), &display(), orientation, free, &c, &mut text);
                assert!(size.width >= 200 && size.height >= 100);
            }
        }
    }

    #[test]
    fn each_axis_grows_independently() {
        let mut text = FixedAdvanceText::new(10);
        let c = content("ab", &[("1.", "a"), ("2.", "b"), ("3.", "c")]);
        let size = SizeHintCalculator::preedit_bar(&scheme(200, 20), &display(), Orientation::Vertical, true, &c, &mut text);
        // skin wins on width, stacked candidates on height
        assert_eq!(size, Size::new(200, 7 + 12 + 3 * 12));
    }

    #[test]
    fn stepped_width_when_not_freely_resizable() {
        let mut text = FixedAdvanceText::new(10);
        // 40 chars -> 400 + 10 margins = 410 -> 300 + 2 * 70
        let c = content(&"x".repeat(40), &[]);
        let size = SizeHintCalculator::preedit_bar(&scheme(300, 40), &display(), Orientation::Horizontal, false, &c, &mut text);
        assert_eq!(size.width, 440);
    }
}
