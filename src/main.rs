use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use image::{Rgba, RgbaImage};
use skinbar_ui::{
    format_hex_color, CosmicTextRenderer, EngineSettings, Orientation, PreeditContent, Region, ThemeBundle,
    ThemeEngine, ThemePackageLoader, ThemeScheme,
};

#[derive(Parser)]
#[command(name = "skinbar", about = "Input method bar skin tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a theme package contains
    Info {
        /// Theme package (zip file or directory)
        theme: PathBuf,
    },
    /// Render the preedit bar to a PNG
    Render {
        /// Theme package (zip file or directory)
        theme: PathBuf,
        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,
        /// Engine settings (TOML)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Composing text
        #[arg(long, default_value = "")]
        preedit: String,
        /// Auxiliary text shown after the composing text
        #[arg(long, default_value = "")]
        aux: String,
        /// Caret position in chars (defaults to the end of the text)
        #[arg(long)]
        cursor: Option<usize>,
        /// Comma-separated candidates
        #[arg(long, value_delimiter = ',')]
        candidates: Vec<String>,
        /// Use the vertical scheme
        #[arg(long)]
        vertical: bool,
        /// Also write the window shape mask as a PNG
        #[arg(long)]
        mask: Option<PathBuf>,
    },
    /// Render the status bar to a PNG
    Status {
        /// Theme package (zip file or directory)
        theme: PathBuf,
        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,
        /// Engine settings (TOML)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { theme } => cmd_info(&theme),
        Commands::Render {
            theme,
            output,
            settings,
            preedit,
            aux,
            cursor,
            candidates,
            vertical,
            mask,
        } => {
            let mut settings = load_settings(settings.as_deref());
            settings.vertical_preedit_bar |= vertical;
            let content = PreeditContent {
                cursor: cursor.unwrap_or_else(|| preedit.chars().count()),
                preedit_visible: !preedit.is_empty(),
                aux_visible: !aux.is_empty(),
                lookup_visible: !candidates.is_empty(),
                labels: (1..=candidates.len()).map(|i| format!("{}.", i)).collect(),
                text: preedit,
                aux_text: aux,
                candidates,
            };
            cmd_render(&theme, &output, settings, &content, mask.as_deref());
        }
        Commands::Status {
            theme,
            output,
            settings,
        } => cmd_status(&theme, &output, load_settings(settings.as_deref())),
    }
}

fn load_settings(path: Option<&Path>) -> EngineSettings {
    let Some(path) = path else {
        return EngineSettings::default();
    };
    EngineSettings::from_path(path).unwrap_or_else(|e| {
        log::error!("Error reading settings {}: {}", path.display(), e);
        std::process::exit(1);
    })
}

fn load_engine(theme: &Path, settings: EngineSettings) -> ThemeEngine {
    let mut engine = ThemeEngine::new(settings);
    if let Err(e) = engine.load_theme(theme) {
        log::error!("Error loading theme {}: {}", theme.display(), e);
        std::process::exit(1);
    }
    engine
}

fn save_png(image: &RgbaImage, path: &Path) {
    if let Err(e) = image.save(path) {
        log::error!("Error writing {}: {}", path.display(), e);
        std::process::exit(1);
    }
    println!("Wrote {} ({}x{})", path.display(), image.width(), image.height());
}

fn cmd_info(theme: &Path) {
    let bundle: ThemeBundle = ThemePackageLoader::load(theme).unwrap_or_else(|e| {
        log::error!("Error loading theme {}: {}", theme.display(), e);
        std::process::exit(1);
    });

    println!("Theme: {}", theme.display());
    for (key, value) in &bundle.meta.entries {
        println!("  {}: {}", key, value);
    }

    let display = &bundle.display;
    println!(
        "Preedit font: '{}' {}px, {}",
        display.preedit_font.family,
        display.preedit_font.pixel_size,
        format_hex_color(display.preedit_color)
    );
    println!(
        "Candidate font: '{}' {}px, {}",
        display.candidate_font.family,
        display.candidate_font.pixel_size,
        format_hex_color(display.candidate_color)
    );

    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        print_scheme(orientation, bundle.scheme(orientation));
    }

    let status = &bundle.status_bar;
    println!("Status bar: {}x{}", status.size().width, status.size().height);
    for (i, anchor) in status.anchors.iter().enumerate() {
        println!("  icon {}: ({}, {})", i + 1, anchor.x, anchor.y);
    }
}

fn print_scheme(orientation: Orientation, scheme: &ThemeScheme) {
    let size = scheme.skin.size();
    let cuts = scheme.skin.cuts();
    println!("{:?} scheme: {}x{}", orientation, size.width, size.height);
    println!(
        "  cuts: hsl={} hsr={} vst={} vsb={}  fill: {:?} x {:?}",
        cuts.hsl, cuts.hsr, cuts.vst, cuts.vsb, scheme.layout.h_mode, scheme.layout.v_mode
    );
    let insets = scheme.insets;
    println!(
        "  insets: left={} right={} top={} bottom={}",
        insets.left, insets.right, insets.top, insets.bottom
    );
    for overlay in scheme.overlays.iter() {
        let area = match overlay.align.area() {
            Some(area) => format!("{:?}", area),
            None => format!("unplaced ({})", overlay.align.area),
        };
        println!(
            "  overlay {}: {}x{} at {}",
            overlay.name,
            overlay.image.width(),
            overlay.image.height(),
            area
        );
    }
}

fn cmd_render(theme: &Path, output: &Path, settings: EngineSettings, content: &PreeditContent, mask_output: Option<&Path>) {
    let mut engine = load_engine(theme, settings);
    let mut text = CosmicTextRenderer::new();

    let size = engine.size_hint_preedit_bar(content, &mut text);
    let (width, height) = size.to_u32();
    let mut canvas = RgbaImage::new(width, height);
    engine.draw_preedit_bar(&mut canvas, content, &mut text);
    save_png(&canvas, output);

    if let Some(path) = mask_output {
        match engine.mask_preedit_bar() {
            Some(mask) => save_png(&mask_image(&mask, width, height), path),
            None => log::warn!("Window masking is disabled, no mask written"),
        }
    }
}

fn cmd_status(theme: &Path, output: &Path, settings: EngineSettings) {
    let mut engine = load_engine(theme, settings);
    let (width, height) = engine.size_hint_status_bar().to_u32();
    if width == 0 || height == 0 {
        log::error!("Theme has no status bar image");
        std::process::exit(1);
    }
    let mut canvas = RgbaImage::new(width, height);
    engine.draw_status_bar(&mut canvas);
    save_png(&canvas, output);
}

/// White where the region covers a pixel, transparent elsewhere.
fn mask_image(region: &Region, width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if region.contains(x as i32, y as i32) {
            *pixel = Rgba([255, 255, 255, 255]);
        }
    }
    image
}
