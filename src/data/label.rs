use serde::Deserialize;
use std::{fmt, path::PathBuf};

/// A measurement file plus the optional label to show for it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DatasetDescriptor {
    pub path: PathBuf,
    #[serde(default)]
    pub label: Option<String>,
}

/// Identity of one test run: which chip, which pattern, which temperature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetLabel {
    pub manufacturer: String,
    pub data_pattern: Option<u8>,
    pub temperature_c: Option<u32>,
    custom: Option<String>,
}

impl DatasetDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            label: None,
        }
    }

    pub fn dataset_label(&self) -> DatasetLabel {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut label = DatasetLabel::parse_stem(&stem);
        label.custom = self.label.clone();
        label
    }
}

impl DatasetLabel {
    /// Parses the `<Manufacturer><Temp>x<hexpattern>` stem the test firmware
    /// writes, e.g. `SamsungLong40xff`. Anything else becomes a bare
    /// manufacturer name.
    pub fn parse_stem(stem: &str) -> Self {
        Self::split_stem(stem).unwrap_or_else(|| Self {
            manufacturer: stem.to_string(),
            data_pattern: None,
            temperature_c: None,
            custom: None,
        })
    }

    fn split_stem(stem: &str) -> Option<Self> {
        let (head, pattern) = stem.rsplit_once('x')?;
        if pattern.is_empty() || pattern.len() > 2 {
            return None;
        }
        let data_pattern = u8::from_str_radix(pattern, 16).ok()?;
        let name_len = head.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (manufacturer, temp) = head.split_at(name_len);
        if manufacturer.is_empty() || temp.is_empty() {
            return None;
        }
        Some(Self {
            manufacturer: manufacturer.to_string(),
            data_pattern: Some(data_pattern),
            temperature_c: Some(temp.parse().ok()?),
            custom: None,
        })
    }

    /// Chart title for the per-dataset error curves.
    pub fn title(&self) -> String {
        if let Some(custom) = &self.custom {
            return format!("{} ({})", self.manufacturer, custom);
        }
        match (self.data_pattern, self.temperature_c) {
            (Some(p), Some(t)) => {
                format!("{} with data pattern 0x{:02x} at {}°C", self.manufacturer, p, t)
            }
            _ => self.manufacturer.clone(),
        }
    }
}

impl fmt::Display for DatasetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(custom) = &self.custom {
            return f.write_str(custom);
        }
        match (self.data_pattern, self.temperature_c) {
            (Some(p), Some(t)) => write!(f, "{}°C, 0x{:02x}", t, p),
            _ => f.write_str(&self.manufacturer),
        }
    }
}
