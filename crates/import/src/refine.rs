use gemgrade_core::GradingRecord;
use gemgrade_ocr::AnnotationExtractor;
use serde::Serialize;
use tracing::debug;

use crate::error::ImportError;
use crate::scans::ScanRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefinedRow {
    pub id: String,
    pub record: GradingRecord,
}

pub fn refine_row(row: &ScanRow, use_existing: bool) -> RefinedRow {
    let record = if use_existing {
        AnnotationExtractor::extract_with_fallback(&row.ocr_text, &row.existing)
    } else {
        AnnotationExtractor::extract(&row.ocr_text)
    };
    RefinedRow { id: row.id.clone(), record }
}

pub fn refine_rows(rows: &[ScanRow], use_existing: bool) -> Vec<RefinedRow> {
    rows.iter().map(|r| refine_row(r, use_existing)).collect()
}

/// Refine rows on up to `workers` blocking tasks.
///
/// Extraction shares no state between rows, so chunks run independently;
/// results come back in input order.
pub async fn refine_batch(
    rows: Vec<ScanRow>,
    use_existing: bool,
    workers: usize,
) -> Result<Vec<RefinedRow>, ImportError> {
    let total = rows.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    let chunk_size = total.div_ceil(workers.max(1));

    let mut remaining = rows;
    let mut handles = Vec::new();
    while !remaining.is_empty() {
        let rest = remaining.split_off(chunk_size.min(remaining.len()));
        let chunk = std::mem::replace(&mut remaining, rest);
        handles.push(tokio::task::spawn_blocking(move || refine_rows(&chunk, use_existing)));
    }
    debug!(total, tasks = handles.len(), "refining batch");

    let mut refined = Vec::with_capacity(total);
    for handle in handles {
        refined.extend(handle.await.map_err(|e| ImportError::Join(e.to_string()))?);
    }
    Ok(refined)
}
