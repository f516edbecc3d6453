//! What the input method currently wants shown

use image::RgbaImage;

/// Preedit bar contents: the composing text, auxiliary text and the lookup
/// table of label/candidate pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreeditContent {
    pub text: String,
    pub aux_text: String,
    /// Caret position in chars of `text`.
    pub cursor: usize,
    pub preedit_visible: bool,
    pub aux_visible: bool,
    pub lookup_visible: bool,
    pub labels: Vec<String>,
    pub candidates: Vec<String>,
}

impl PreeditContent {
    /// Number of complete label/candidate pairs.
    pub fn pair_count(&self) -> usize {
        self.labels.len().min(self.candidates.len())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .zip(self.candidates.iter())
            .map(|(l, c)| (l.as_str(), c.as_str()))
    }

    /// Preedit text followed by aux text, as drawn on one line.
    pub fn preedit_line(&self) -> String {
        format!("{}{}", self.text, self.aux_text)
    }

    /// `text` up to the caret.
    pub fn text_before_cursor(&self) -> &str {
        match self.text.char_indices().nth(self.cursor) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }
}

/// A status bar item: an icon if one is available, otherwise its label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyItem {
    pub icon: Option<RgbaImage>,
    pub label: String,
}

impl PropertyItem {
    pub fn with_icon(icon: RgbaImage) -> Self {
        Self {
            icon: Some(icon),
            label: String::new(),
        }
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            icon: None,
            label: label.into(),
        }
    }
}
