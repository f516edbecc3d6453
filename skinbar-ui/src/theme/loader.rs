//! Theme package parsing
//!
//! A package holds a `skin.ini` plus the images it references. Sections:
//!
//! - `[General]`   free-form metadata
//! - `[Display]`   `font_size`, `font_ch`, `font_en`, `pinyin_color`, `zhongwen_color`
//! - `[Scheme_H1]` / `[Scheme_V1]` horizontal and vertical preedit bar skins
//! - `[StatusBar]` status bar `pic` and up to six `<n>_pos = x,y` icon anchors

use std::path::Path;
use std::sync::Arc;

use crate::geometry::{Margins, Point};
use crate::layout::{LayoutEngine, TileMode};
use crate::nine_patch::{Cuts, NinePatchSkin};
use crate::overlay::{ContentInsets, OverlayAlign, OverlayPixmap, OverlayRegistry};
use crate::skin::SkinImage;
use crate::text::FontSpec;

use super::archive::{open_package, ArchiveSource};
use super::color::parse_theme_color;
use super::ini::{self, IniDocument};
use super::{DisplayConfig, StatusBarSkin, ThemeBundle, ThemeError, ThemeMeta, ThemeScheme};

/// Path of the configuration entry inside a package.
pub const CONFIG_ENTRY: &str = "skin.ini";

/// Number of fixed status bar icon positions.
pub const MAX_ICON_ANCHORS: usize = 6;

const DEFAULT_FONT_SIZE: i32 = 12;

/// Builds [`ThemeBundle`]s from theme packages.
pub struct ThemePackageLoader;

impl ThemePackageLoader {
    /// Load the package at `path` (zip file or unpacked directory).
    pub fn load(path: impl AsRef<Path>) -> Result<ThemeBundle, ThemeError> {
        let path = path.as_ref();
        let mut source = open_package(path)?;
        let bundle = Self::load_from(source.as_mut())?;
        log::info!("Loaded theme package {}", path.display());
        Ok(bundle)
    }

    /// Load from an already opened package.
    ///
    /// Only a missing or unreadable configuration entry fails the load; a
    /// broken image asset is logged and left out.
    pub fn load_from(source: &mut dyn ArchiveSource) -> Result<ThemeBundle, ThemeError> {
        let config = source.read_entry(CONFIG_ENTRY)?;
        let doc = IniDocument::parse(&ini::decode_text(&config));

        let meta = ThemeMeta {
            entries: doc.section("[General]").to_vec(),
        };
        let display = parse_display(doc.section("[Display]"));
        let horizontal = parse_scheme(source, doc.section("[Scheme_H1]"), "Scheme_H1");
        let vertical = parse_scheme(source, doc.section("[Scheme_V1]"), "Scheme_V1");
        let status_bar = parse_status_bar(source, doc.section("[StatusBar]"));

        Ok(ThemeBundle {
            meta,
            display,
            horizontal,
            vertical,
            status_bar,
        })
    }
}

fn parse_display(entries: &[(String, String)]) -> DisplayConfig {
    let font_size = ini::value(entries, "font_size")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_FONT_SIZE);
    let font_en = ini::value(entries, "font_en").unwrap_or_default();
    let font_ch = ini::value(entries, "font_ch").unwrap_or_default();
    let preedit_color = parse_theme_color(ini::value(entries, "pinyin_color").unwrap_or_default());
    let candidate_color = parse_theme_color(ini::value(entries, "zhongwen_color").unwrap_or_default());

    let candidate_font = FontSpec::new(font_ch, font_size, true);
    DisplayConfig {
        preedit_font: FontSpec::new(font_en, font_size, true),
        label_font: candidate_font.clone(),
        candidate_font,
        preedit_color,
        candidate_color,
        label_color: candidate_color,
    }
}

fn asset_path(value: &str) -> &str {
    value.strip_prefix("./").unwrap_or(value)
}

/// Read and decode an image asset, logging instead of failing.
fn load_image(source: &mut dyn ArchiveSource, value: &str, what: &str) -> Option<SkinImage> {
    let path = asset_path(value);
    let decoded = source
        .read_entry(path)
        .and_then(|bytes| SkinImage::from_bytes(&bytes).map_err(ThemeError::from));
    match decoded {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Skipping {} image '{}': {}", what, path, e);
            None
        }
    }
}

fn parse_scheme(source: &mut dyn ArchiveSource, entries: &[(String, String)], label: &str) -> ThemeScheme {
    let image = ini::value(entries, "pic")
        .and_then(|pic| load_image(source, pic, label))
        .unwrap_or_default();

    let horizontal = ini::int_list(ini::value(entries, "layout_horizontal").unwrap_or_default());
    let vertical = ini::int_list(ini::value(entries, "layout_vertical").unwrap_or_default());
    let at = |list: &[i32], i: usize| list.get(i).copied().unwrap_or(0);

    // The right and bottom cuts are stored as distances from the far edge.
    let size = image.size();
    let cuts = Cuts::normalized(
        at(&horizontal, 1),
        size.width - at(&horizontal, 2),
        at(&vertical, 1),
        size.height - at(&vertical, 2),
        size,
    );
    let layout = LayoutEngine::new(
        TileMode::from_stretch_margin(at(&horizontal, 0)),
        TileMode::from_stretch_margin(at(&vertical, 0)),
    );

    let margins = |key: &str| {
        ini::value(entries, key)
            .map(|v| Margins::from_values(&ini::int_list(v)))
            .unwrap_or_default()
    };
    let preedit_margins = margins("pinyin_marge");
    let candidate_margins = margins("zhongwen_marge");

    let overlays = parse_overlays(source, entries, label);
    let insets = ContentInsets::scan(&overlays);
    let skin = NinePatchSkin::slice(&image, cuts);

    log::debug!(
        "{}: skin {}x{}, {} overlays, insets {:?}",
        label,
        size.width,
        size.height,
        overlays.len(),
        insets
    );

    ThemeScheme {
        skin,
        layout,
        preedit_margins,
        candidate_margins,
        overlays,
        insets,
    }
}

/// Overlays are named by `<name>_display` / `<name>_align` keys, in the order
/// a name is first mentioned. The image is the value of the `<name>` key.
fn parse_overlays(
    source: &mut dyn ArchiveSource,
    entries: &[(String, String)],
    label: &str,
) -> OverlayRegistry {
    let mut names: Vec<&str> = Vec::new();
    for (key, _) in entries {
        let name = key
            .strip_suffix("_display")
            .or_else(|| key.strip_suffix("_align"));
        if let Some(name) = name {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
    }

    let mut registry = OverlayRegistry::new();
    for name in names {
        let Some(pic) = ini::value(entries, name) else {
            log::warn!("{}: overlay '{}' has no image entry", label, name);
            continue;
        };
        let Some(image) = load_image(source, pic, "overlay") else { continue };
        let align = ini::value(entries, &format!("{}_align", name))
            .map(|v| OverlayAlign::from_values(&ini::int_list(v)))
            .unwrap_or_default();
        registry.insert(OverlayPixmap::new(name, Arc::new(image), align));
    }
    registry
}

fn parse_status_bar(source: &mut dyn ArchiveSource, entries: &[(String, String)]) -> StatusBarSkin {
    let image = ini::value(entries, "pic")
        .and_then(|pic| load_image(source, pic, "status bar"))
        .unwrap_or_default();

    let mut anchors = Vec::new();
    for (key, value) in entries {
        if !key.ends_with("_pos") || anchors.len() >= MAX_ICON_ANCHORS {
            continue;
        }
        let list = ini::int_list(value);
        let x = list.first().copied().unwrap_or(0);
        let y = list.get(1).copied().unwrap_or(0);
        // A zero coordinate marks an unused slot.
        if x != 0 && y != 0 {
            anchors.push(Point::new(x, y));
        }
    }

    StatusBarSkin {
        image: Arc::new(image),
        anchors,
    }
}
