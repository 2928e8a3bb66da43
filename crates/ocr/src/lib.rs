pub mod disambiguate;
pub mod extract;
pub mod fallback;
pub mod fields;
pub mod preprocess;
pub mod rules;
pub mod segment;
pub mod types;
pub mod validate;

pub use extract::AnnotationExtractor;
pub use preprocess::Normalized;
pub use segment::Segments;
pub use types::{Candidates, ExtractionTrace};

use gemgrade_core::{ExistingValues, GradingRecord};

/// Extract the seven grading fields from OCR text.
pub fn extract(raw: &str) -> GradingRecord {
    AnnotationExtractor::extract(raw)
}

/// As [`extract`], also consulting previously stored values.
pub fn extract_with_fallback(raw: &str, existing: &ExistingValues) -> GradingRecord {
    AnnotationExtractor::extract_with_fallback(raw, existing)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
