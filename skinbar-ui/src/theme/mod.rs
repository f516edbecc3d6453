//! Theme packages and the immutable bundle they load into

mod archive;
mod color;
mod ini;
mod loader;

use std::sync::Arc;

use image::Rgba;
use thiserror::Error;

use crate::geometry::{Margins, Point, Size};
use crate::layout::LayoutEngine;
use crate::nine_patch::NinePatchSkin;
use crate::overlay::{ContentInsets, OverlayRegistry};
use crate::skin::{SkinError, SkinImage};
use crate::text::FontSpec;

pub use archive::{open_package, ArchiveSource, DirectorySource, ZipSource};
pub use color::{format_hex_color, parse_hex_color, parse_theme_color};
pub use loader::{ThemePackageLoader, CONFIG_ENTRY, MAX_ICON_ANCHORS};

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid theme archive: {0}")]
    ZipError(#[from] zip::result::ZipError),
    #[error("Entry not found in theme: {0}")]
    MissingEntry(String),
    #[error("Theme entry is not a file: {0}")]
    NotAFile(String),
    #[error("Failed to decode theme image: {0}")]
    SkinError(#[from] SkinError),
    #[error("Invalid settings: {0}")]
    SettingsError(#[from] toml::de::Error),
}

/// Which bar layout variant is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// `[General]` entries, kept in file order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeMeta {
    pub entries: Vec<(String, String)>,
}

impl ThemeMeta {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Fonts and colours from the `[Display]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub preedit_font: FontSpec,
    pub candidate_font: FontSpec,
    pub label_font: FontSpec,
    pub preedit_color: Rgba<u8>,
    pub candidate_color: Rgba<u8>,
    pub label_color: Rgba<u8>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let black = Rgba([0, 0, 0, 255]);
        Self {
            preedit_font: FontSpec::default(),
            candidate_font: FontSpec::default(),
            label_font: FontSpec::default(),
            preedit_color: black,
            candidate_color: black,
            label_color: black,
        }
    }
}

/// Everything needed to lay out and paint the preedit bar in one orientation.
#[derive(Debug, Clone, Default)]
pub struct ThemeScheme {
    pub skin: NinePatchSkin,
    pub layout: LayoutEngine,
    /// Margins around the preedit/aux line.
    pub preedit_margins: Margins,
    /// Margins around the candidate block.
    pub candidate_margins: Margins,
    pub overlays: OverlayRegistry,
    pub insets: ContentInsets,
}

/// Status bar background and the fixed positions of its property icons.
#[derive(Debug, Clone, Default)]
pub struct StatusBarSkin {
    pub image: Arc<SkinImage>,
    pub anchors: Vec<Point>,
}

impl StatusBarSkin {
    pub fn size(&self) -> Size {
        self.image.size()
    }
}

/// A fully loaded theme. Never modified after loading; a reload builds a new one.
#[derive(Debug, Clone, Default)]
pub struct ThemeBundle {
    pub meta: ThemeMeta,
    pub display: DisplayConfig,
    pub horizontal: ThemeScheme,
    pub vertical: ThemeScheme,
    pub status_bar: StatusBarSkin,
}

impl ThemeBundle {
    pub fn scheme(&self, orientation: Orientation) -> &ThemeScheme {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }
}
