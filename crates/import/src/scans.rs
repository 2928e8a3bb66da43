use gemgrade_core::{ExistingValues, BROWN_ORIGINAL, COLOR_ORIGINAL, TYPE_ORIGINAL};
use std::io::Read;

use crate::error::ImportError;
use crate::profile::RefineProfile;

/// One stored OCR scan awaiting refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    pub id: String,
    pub ocr_text: String,
    pub existing: ExistingValues,
}

/// Read a header-driven scan table. Column names match case-insensitively.
pub fn read_scans<R: Read>(data: R, profile: &RefineProfile) -> Result<Vec<ScanRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(profile.delimiter_byte())
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
    };

    let text_col = column(profile.text_column.as_str())
        .ok_or_else(|| ImportError::MissingColumn(profile.text_column.clone()))?;
    let id_col = profile.id_column.as_deref().and_then(column);
    let existing_cols: Vec<(&'static str, usize)> = [
        (BROWN_ORIGINAL, profile.brown_original_column.as_str()),
        (COLOR_ORIGINAL, profile.color_original_column.as_str()),
        (TYPE_ORIGINAL, profile.type_original_column.as_str()),
    ]
    .into_iter()
    .filter_map(|(key, name)| column(name).map(|col| (key, col)))
    .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;

        let id = id_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| (idx + 1).to_string(), str::to_string);

        let ocr_text = record.get(text_col).unwrap_or_default().to_string();

        let existing = existing_cols
            .iter()
            .filter_map(|&(key, col)| {
                record
                    .get(col)
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key, v))
            })
            .collect();

        rows.push(ScanRow { id, ocr_text, existing });
    }

    if rows.is_empty() {
        return Err(ImportError::NoDataRows);
    }

    Ok(rows)
}
