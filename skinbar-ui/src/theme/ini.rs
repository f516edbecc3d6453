//! Line-based reader for the `skin.ini` configuration

/// Decode configuration bytes: UTF-16 with BOM, or UTF-8 with or without BOM.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Sections and their `key=value` entries, in file order.
#[derive(Debug, Default)]
pub(crate) struct IniDocument {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniDocument {
    pub(crate) fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        let mut current: Option<usize> = None;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                current = Some(doc.section_index(line));
                continue;
            }
            let Some(index) = current else { continue };
            let Some((key, value)) = line.split_once('=') else {
                log::debug!("Ignoring configuration line without '=': {}", line);
                continue;
            };
            doc.sections[index]
                .1
                .push((key.trim().to_string(), value.trim().to_string()));
        }
        doc
    }

    fn section_index(&mut self, header: &str) -> usize {
        if let Some(index) = self.sections.iter().position(|(name, _)| name == header) {
            return index;
        }
        self.sections.push((header.to_string(), Vec::new()));
        self.sections.len() - 1
    }

    /// Entries of the section with this header (e.g. `"[Display]"`).
    pub(crate) fn section(&self, header: &str) -> &[(String, String)] {
        self.sections
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }
}

/// Look up the first value stored under `key`.
pub(crate) fn value<'a>(entries: &'a [(String, String)], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Comma-separated integers; malformed fields read as 0.
pub(crate) fn int_list(value: &str) -> Vec<i32> {
    value
        .split(',')
        .map(|field| {
            let field = field.trim();
            field.parse().unwrap_or_else(|_| {
                if !field.is_empty() {
                    log::warn!("Malformed number '{}' in theme, using 0", field);
                }
                0
            })
        })
        .collect()
}
