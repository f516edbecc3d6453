//! The theme engine: active theme, settings and the caches derived from them

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::content::{PreeditContent, PropertyItem};
use crate::geometry::{Point, Rect, Size};
use crate::layout::PatchLayout;
use crate::mask::MaskCompositor;
use crate::region::Region;
use crate::renderer::{PreeditScene, Renderer};
use crate::settings::EngineSettings;
use crate::size_hint::SizeHintCalculator;
use crate::skin::SkinImage;
use crate::text::TextRenderer;
use crate::theme::{ArchiveSource, Orientation, ThemeBundle, ThemeError, ThemePackageLoader, MAX_ICON_ANCHORS};

/// Preedit bar geometry for one orientation and size.
#[derive(Debug, Clone, PartialEq)]
struct PreeditCache {
    orientation: Orientation,
    layout: PatchLayout,
    /// Present only while a mask-dependent setting is on.
    mask: Option<Region>,
}

/// Status bar skin resampled to the bar size.
#[derive(Debug, Clone, PartialEq)]
struct StatusCache {
    skin: SkinImage,
    mask: Option<Region>,
}

/// A theme bundle together with everything computed from it. Replaced as a
/// whole, so a paint never sees caches from a different bundle.
#[derive(Debug, Clone, Default)]
struct ActiveTheme {
    bundle: Arc<ThemeBundle>,
    preedit: Option<PreeditCache>,
    status: Option<StatusCache>,
}

/// Lays out, masks and paints the preedit bar and status bar for the
/// current theme.
///
/// Owned by the UI thread. Until a theme is loaded an empty built-in theme
/// is in effect.
pub struct ThemeEngine {
    settings: EngineSettings,
    active: ActiveTheme,
}

impl ThemeEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            active: ActiveTheme::default(),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Replace the settings, rebuilding caches at their current sizes.
    pub fn set_settings(&mut self, settings: EngineSettings) {
        if settings == self.settings {
            return;
        }
        self.settings = settings;
        let active = self.rebuild(Arc::clone(&self.active.bundle));
        self.active = active;
    }

    pub fn bundle(&self) -> &Arc<ThemeBundle> {
        &self.active.bundle
    }

    /// Load a theme package (zip file or directory) and make it active.
    ///
    /// On failure the previous theme stays in effect.
    pub fn load_theme(&mut self, path: impl AsRef<Path>) -> Result<(), ThemeError> {
        let path = path.as_ref();
        match ThemePackageLoader::load(path) {
            Ok(bundle) => {
                self.install(bundle);
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to load theme {}, keeping current theme: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Like [`load_theme`](Self::load_theme), from an already opened package.
    pub fn load_theme_from(&mut self, source: &mut dyn ArchiveSource) -> Result<(), ThemeError> {
        let bundle = ThemePackageLoader::load_from(source).inspect_err(|e| {
            log::warn!("Failed to load theme, keeping current theme: {}", e);
        })?;
        self.install(bundle);
        Ok(())
    }

    fn install(&mut self, bundle: ThemeBundle) {
        let active = self.rebuild(Arc::new(bundle));
        self.active = active;
        log::info!(
            "Theme '{}' active",
            self.active.bundle.meta.get("name").unwrap_or("unnamed")
        );
    }

    /// Fresh caches for `bundle` at the sizes currently in use.
    fn rebuild(&self, bundle: Arc<ThemeBundle>) -> ActiveTheme {
        let preedit_size = self.active.preedit.as_ref().map(|c| c.layout.size());
        let status_size = self.active.status.as_ref().map(|c| c.skin.size());
        let preedit = preedit_size.map(|size| self.build_preedit(&bundle, size));
        let status = status_size.map(|size| self.build_status(&bundle, size));
        ActiveTheme {
            bundle,
            preedit,
            status,
        }
    }

    fn build_preedit(&self, bundle: &ThemeBundle, size: Size) -> PreeditCache {
        let orientation = self.settings.orientation();
        let scheme = bundle.scheme(orientation);
        let layout = scheme.layout.layout(&scheme.skin, size);
        let mask = self
            .settings
            .needs_mask()
            .then(|| MaskCompositor::compose(&layout, &scheme.overlays, &scheme.insets));
        PreeditCache {
            orientation,
            layout,
            mask,
        }
    }

    fn build_status(&self, bundle: &ThemeBundle, size: Size) -> StatusCache {
        let skin = bundle.status_bar.image.resampled(size);
        let mask = self.settings.needs_mask().then(|| skin.mask().clone());
        log::debug!("Status bar resized to {}x{}", size.width, size.height);
        StatusCache { skin, mask }
    }

    pub fn size_hint_preedit_bar(&self, content: &PreeditContent, text: &mut dyn TextRenderer) -> Size {
        let orientation = self.settings.orientation();
        let bundle = &self.active.bundle;
        SizeHintCalculator::preedit_bar(
            bundle.scheme(orientation),
            &bundle.display,
            orientation,
            self.settings.preedit_resizing,
            content,
            text,
        )
    }

    pub fn size_hint_status_bar(&self) -> Size {
        SizeHintCalculator::status_bar(&self.active.bundle.status_bar)
    }

    /// Geometry of status bar items given their maximum sizes: item `i` sits
    /// at icon anchor `i`. Only the first six items are placed; an item
    /// without an anchor goes to the origin.
    pub fn layout_status_bar(&self, item_sizes: &[Size]) -> Vec<Rect> {
        let anchors = &self.active.bundle.status_bar.anchors;
        item_sizes
            .iter()
            .take(MAX_ICON_ANCHORS)
            .enumerate()
            .map(|(i, size)| {
                let origin = anchors.get(i).copied().unwrap_or(Point::ORIGIN);
                Rect::from_origin_size(origin, *size)
            })
            .collect()
    }

    /// Lay out (and mask, if needed) the preedit bar for `size`. Does nothing
    /// when the cache already matches.
    pub fn resize_preedit_bar(&mut self, size: Size) {
        let orientation = self.settings.orientation();
        let current = self
            .active
            .preedit
            .as_ref()
            .is_some_and(|c| c.orientation == orientation && c.layout.size() == size);
        if current {
            return;
        }
        let cache = self.build_preedit(&self.active.bundle, size);
        self.active.preedit = Some(cache);
    }

    pub fn resize_status_bar(&mut self, size: Size) {
        if self.active.status.as_ref().is_some_and(|c| c.skin.size() == size) {
            return;
        }
        let cache = self.build_status(&self.active.bundle, size);
        self.active.status = Some(cache);
    }

    /// Layout of the preedit bar at its last size.
    pub fn preedit_layout(&self) -> Option<&PatchLayout> {
        self.active.preedit.as_ref().map(|c| &c.layout)
    }

    /// Window shape of the preedit bar, when shape masking is on.
    pub fn mask_preedit_bar(&self) -> Option<Region> {
        if !self.settings.window_mask {
            return None;
        }
        self.active.preedit.as_ref()?.mask.clone()
    }

    /// Window shape of the status bar plus the given item rectangles, when
    /// shape masking is on.
    pub fn mask_status_bar(&self, items: &[Rect]) -> Option<Region> {
        if !self.settings.window_mask {
            return None;
        }
        let mask = self.active.status.as_ref()?.mask.as_ref()?;
        Some(MaskCompositor::with_items(mask, items))
    }

    /// Area to blur behind the preedit bar, when blurring is on.
    pub fn blur_preedit_bar(&self) -> Option<&Region> {
        if !self.settings.background_blur {
            return None;
        }
        self.active.preedit.as_ref()?.mask.as_ref()
    }

    pub fn blur_status_bar(&self) -> Option<&Region> {
        if !self.settings.background_blur {
            return None;
        }
        self.active.status.as_ref()?.mask.as_ref()
    }

    /// Paint the preedit bar into `canvas`; the canvas size is the bar size.
    pub fn draw_preedit_bar(&mut self, canvas: &mut RgbaImage, content: &PreeditContent, text: &mut dyn TextRenderer) {
        self.resize_preedit_bar(Size::new(canvas.width() as i32, canvas.height() as i32));
        let Some(cache) = self.active.preedit.as_ref() else { return };
        let bundle = &self.active.bundle;
        let colorize = if self.settings.background_colorizing {
            cache.mask.as_ref().map(|m| (m, self.settings.preedit_colorize))
        } else {
            None
        };
        let scene = PreeditScene {
            scheme: bundle.scheme(cache.orientation),
            display: &bundle.display,
            orientation: cache.orientation,
            layout: &cache.layout,
            colorize,
        };
        Renderer::draw_preedit_bar(canvas, &scene, content, text);
    }

    /// Paint the status bar into `canvas`; the canvas size is the bar size.
    pub fn draw_status_bar(&mut self, canvas: &mut RgbaImage) {
        self.resize_status_bar(Size::new(canvas.width() as i32, canvas.height() as i32));
        let Some(cache) = self.active.status.as_ref() else { return };
        let colorize = if self.settings.background_colorizing {
            cache.mask.as_ref().map(|m| (m, self.settings.status_colorize))
        } else {
            None
        };
        Renderer::draw_status_bar(canvas, &cache.skin, colorize);
    }

    /// Paint a property item filling `canvas`.
    pub fn draw_property_item(&self, canvas: &mut RgbaImage, item: &PropertyItem, text: &mut dyn TextRenderer) {
        let rect = Rect::new(0, 0, canvas.width() as i32, canvas.height() as i32);
        Renderer::draw_property_item(canvas, rect, item, &self.active.bundle.display, text);
    }
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}
