use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ImportError;

/// Column mapping and run options for a batch refinement.
///
/// Every key is optional in TOML; missing keys take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RefineProfile {
    pub text_column: String,
    /// Row identifier column; rows fall back to their 1-based position.
    pub id_column: Option<String>,
    pub brown_original_column: String,
    pub color_original_column: String,
    pub type_original_column: String,
    /// Consult stored values for fields the text leaves blank.
    pub use_existing: bool,
    pub delimiter: String,
    pub workers: usize,
}

impl Default for RefineProfile {
    fn default() -> Self {
        Self {
            text_column: "ocr_text".to_string(),
            id_column: Some("id".to_string()),
            brown_original_column: "brown_original".to_string(),
            color_original_column: "color_original".to_string(),
            type_original_column: "type_original".to_string(),
            use_existing: true,
            delimiter: ",".to_string(),
            workers: 4,
        }
    }
}

impl RefineProfile {
    pub fn from_toml(toml_content: &str) -> Result<Self, ImportError> {
        toml::from_str(toml_content)
            .map_err(|e| ImportError::Profile(format!("Failed to parse TOML: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}
