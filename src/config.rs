use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NotaError, Result};
use crate::storage::DEFAULT_STORAGE_KEY;

pub const CONFIG_FILE: &str = "config.json";

/// Shown in the list for notes without a title.
pub const PLACEHOLDER_TITLE: &str = "無題のノート";

/// Configuration for a notes directory, read from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotaConfig {
    /// Key the collection is stored under
    pub storage_key: String,
    pub display: DisplayConfig,
}

impl Default for NotaConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            display: DisplayConfig::default(),
        }
    }
}

impl NotaConfig {
    /// Load `config.json` from `dir`, falling back to defaults when the file
    /// does not exist. Every field is optional.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| NotaError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(NotaError::Config("storage_key must not be empty".to_string()));
        }
        for format in [&self.display.list_date_format, &self.display.editor_date_format] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(NotaError::Config(format!("Invalid date format: {:?}", format)));
            }
        }
        if let Some(minutes) = self.display.utc_offset_minutes {
            if FixedOffset::east_opt(minutes * 60).is_none() {
                return Err(NotaError::Config(format!(
                    "utc_offset_minutes out of range: {}",
                    minutes
                )));
            }
        }
        Ok(())
    }
}

/// How notes are turned into display strings. Defaults follow the `ja-JP`
/// locale: `2026/10/6` in the list, `2026/10/06 09:05` in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub placeholder_title: String,
    /// chrono format string for list entries
    pub list_date_format: String,
    /// chrono format string for the editor header
    pub editor_date_format: String,
    /// Fixed offset from UTC; `None` uses the system timezone
    pub utc_offset_minutes: Option<i32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder_title: PLACEHOLDER_TITLE.to_string(),
            list_date_format: "%Y/%-m/%-d".to_string(),
            editor_date_format: "%Y/%m/%d %H:%M".to_string(),
            utc_offset_minutes: None,
        }
    }
}

impl DisplayConfig {
    /// Convert a stored timestamp into the display timezone.
    pub fn localize(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self
            .utc_offset_minutes
            .and_then(|m| FixedOffset::east_opt(m * 60))
        {
            Some(offset) => at.with_timezone(&offset),
            None => at.with_timezone(&Local).fixed_offset(),
        }
    }
}
