//! # skinbar-ui
//!
//! Skinned, irregularly shaped input method bars, painted in software.
//!
//! ## Features
//! - Theme packages (zip or directory) with a `skin.ini` and PNG assets
//! - Nine-patch skins with per-axis scale or tile filling
//! - Overlay decorations anchored to a 3x3 grid around the text
//! - Window shape masks that match the painted pixels exactly
//! - Size hints that follow the preedit text and candidate list
//! - Status bar with fixed property icon anchors
//!
//! ## Example
//!
//! ```no_run
//! use skinbar_ui::{CosmicTextRenderer, EngineSettings, PreeditContent, ThemeEngine};
//!
//! let mut engine = ThemeEngine::new(EngineSettings::default());
//! engine.load_theme("themes/sky.ssf").expect("Failed to load theme");
//!
//! let mut text = CosmicTextRenderer::new();
//! let content = PreeditContent {
//!     text: "nihao".into(),
//!     cursor: 5,
//!     preedit_visible: true,
//!     ..Default::default()
//! };
//! let size = engine.size_hint_preedit_bar(&content, &mut text);
//! let (w, h) = size.to_u32();
//! let mut canvas = image::RgbaImage::new(w, h);
//! engine.draw_preedit_bar(&mut canvas, &content, &mut text);
//! let shape = engine.mask_preedit_bar();
//! ```

pub mod content;
pub mod engine;
pub mod geometry;
pub mod layout;
pub mod mask;
pub mod nine_patch;
pub mod overlay;
pub mod region;
pub mod renderer;
pub mod settings;
pub mod size_hint;
pub mod skin;
pub mod text;
pub mod theme;

#[cfg(test)]
mod testutil;

// Engine
pub use engine::ThemeEngine;
pub use settings::EngineSettings;

// Content
pub use content::{PreeditContent, PropertyItem};

// Geometry and shapes
pub use geometry::{Margins, Point, Rect, Size};
pub use region::Region;
pub use skin::{SkinError, SkinImage};

// Skin layout
pub use layout::{LayoutEngine, PatchLayout, PlacedCell, TileMode};
pub use mask::MaskCompositor;
pub use nine_patch::{Cuts, NinePatchSkin, Part};
pub use overlay::{AlignArea, AlignMode, ContentInsets, OverlayAlign, OverlayPixmap, OverlayRegistry};
pub use size_hint::SizeHintCalculator;

// Painting
pub use renderer::{PreeditScene, Renderer};
pub use text::{CosmicTextRenderer, FontSpec, TextRenderer};

// Themes
pub use theme::{
    format_hex_color, open_package, parse_hex_color, parse_theme_color, ArchiveSource, DirectorySource,
    DisplayConfig, Orientation, StatusBarSkin, ThemeBundle, ThemeError, ThemeMeta, ThemePackageLoader,
    ThemeScheme, ZipSource,
};
