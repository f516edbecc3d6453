//! Colour strings in theme and settings files

use image::Rgba;

/// Parse `#rrggbb` or `#aarrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<Rgba<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Some(Rgba([byte(2)?, byte(4)?, byte(6)?, byte(0)?])),
        _ => None,
    }
}

/// Normalize a theme colour such as `0xff8000` or the truncated `0xff`.
///
/// The string is right-padded with `0` to eight characters and its `0x`
/// prefix becomes `#`. Anything unparsable falls back to opaque black.
pub fn parse_theme_color(raw: &str) -> Rgba<u8> {
    let mut s = raw.trim().to_string();
    while s.chars().count() < 8 {
        s.push('0');
    }
    let normalized = match s.get(..2) {
        Some("0x") | Some("0X") => format!("#{}", &s[2..]),
        _ => s,
    };
    parse_hex_color(&normalized).unwrap_or_else(|| {
        log::warn!("Unparsable theme colour '{}', using black", raw);
        Rgba([0, 0, 0, 255])
    })
}

/// `#rrggbb`, with an alpha prefix (`#aarrggbb`) only when not opaque.
pub fn format_hex_color(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", a, r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_color_forms() {
        assert_eq!(parse_theme_color("0xFF8000"), Rgba([255, 128, 0, 255]));
        assert_eq!(parse_theme_color(" 0x1f "), Rgba([31, 0, 0, 255]));
        assert_eq!(parse_theme_color("0x"), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_theme_color("garbage"), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn hex_color_with_alpha() {
        assert_eq!(parse_hex_color("#80102030"), Some(Rgba([16, 32, 48, 128])));
        assert_eq!(parse_hex_color("102030"), Some(Rgba([16, 32, 48, 255])));
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn format_round_trips_common_forms() {
        assert_eq!(format_hex_color(Rgba([255, 128, 0, 255])), "#ff8000");
        assert_eq!(format_hex_color(Rgba([1, 2, 3, 4])), "#04010203");
    }
}
