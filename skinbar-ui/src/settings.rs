//! Engine settings, loadable from a TOML file

use std::path::Path;

use image::Rgba;
use serde::{Deserialize, Deserializer};

use crate::theme::{parse_hex_color, Orientation, ThemeError};

/// User preferences that change how the bars are laid out and shaped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Use the vertical preedit bar scheme (one candidate per line).
    pub vertical_preedit_bar: bool,
    /// Let the preedit bar width follow its content exactly instead of
    /// growing in steps.
    pub preedit_resizing: bool,
    /// Shape the windows to the skin's opaque pixels.
    pub window_mask: bool,
    /// Blur what is behind the windows, inside the mask.
    pub background_blur: bool,
    /// Fill the mask with a colour before painting the skin.
    pub background_colorizing: bool,
    #[serde(deserialize_with = "deserialize_color")]
    pub preedit_colorize: Rgba<u8>,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_colorize: Rgba<u8>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            vertical_preedit_bar: false,
            preedit_resizing: true,
            window_mask: true,
            background_blur: false,
            background_colorizing: false,
            preedit_colorize: Rgba([0, 0, 0, 128]),
            status_colorize: Rgba([0, 0, 0, 128]),
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Rgba<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_hex_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid colour '{}'", s)))
}

impl EngineSettings {
    pub fn from_toml(s: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml(&s)
    }

    pub fn orientation(&self) -> Orientation {
        if self.vertical_preedit_bar {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Whether any feature that needs a shape mask is on.
    pub fn needs_mask(&self) -> bool {
        self.window_mask || self.background_blur || self.background_colorizing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(EngineSettings::from_toml("").unwrap(), EngineSettings::default());
    }

    #[test]
    fn parses_fields_and_colours() {
        let s = EngineSettings::from_toml(
            "vertical_preedit_bar = true\nwindow_mask = false\npreedit_colorize = \"#ff0000\"\nstatus_colorize = \"#40102030\"\n",
        )
        .unwrap();
        assert_eq!(s.orientation(), Orientation::Vertical);
        assert!(!s.window_mask);
        assert_eq!(s.preedit_colorize, Rgba([255, 0, 0, 255]));
        assert_eq!(s.status_colorize, Rgba([16, 32, 48, 64]));
    }

    #[test]
    fn needs_mask_when_any_shaping_feature_is_on() {
        let mut s = EngineSettings {
            window_mask: false,
            ..Default::default()
        };
        assert!(!s.needs_mask());
        s.background_colorizing = true;
        assert!(s.needs_mask());
    }

    #[test]
    fn bad_colour_is_an_error() {
        assert!(matches!(
            EngineSettings::from_toml("preedit_colorize = \"blue\""),
            Err(ThemeError::SettingsError(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "background_blur = true\n").unwrap();
        assert!(EngineSettings::from_path(&path).unwrap().background_blur);
    }
}
