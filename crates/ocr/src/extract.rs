use gemgrade_core::{ExistingValues, Field, GradingRecord};
use tracing::trace;

use crate::disambiguate::disambiguate;
use crate::fallback::resolve_fallbacks;
use crate::fields::extract_candidate;
use crate::preprocess::normalize;
use crate::segment::{segment, Segments};
use crate::types::{Candidates, ExtractionTrace};
use crate::validate::validate_all;

// ── Public extraction API ─────────────────────────────────────────────────────

/// Turns OCR text from a grading certificate into the seven annotation fields.
///
/// Stateless and infallible: any part of the text that can't be read
/// confidently comes back as an empty field.
pub struct AnnotationExtractor;

impl AnnotationExtractor {
    /// Extract from text alone.
    pub fn extract(raw: &str) -> GradingRecord {
        Self::trace(raw, None).record
    }

    /// Extract, filling undetermined Brown / Color / Type from previously
    /// stored values when those pass validation.
    pub fn extract_with_fallback(raw: &str, existing: &ExistingValues) -> GradingRecord {
        Self::trace(raw, Some(existing)).record
    }

    /// Run the pipeline and keep every stage's output.
    pub fn trace(raw: &str, existing: Option<&ExistingValues>) -> ExtractionTrace {
        let normalized = normalize(raw);
        trace!(text = %normalized.text, fancy = normalized.fancy_override, "normalized");

        let segments = segment(&normalized.text);
        trace!(count = segments.len(), "segmented");

        let extracted = extract_all(&segments);
        let disambiguated = disambiguate(extracted.clone(), &segments);
        let validated = validate_all(&disambiguated);
        let record = resolve_fallbacks(validated.clone(), &normalized, &segments, existing);
        trace!(?record, "assembled");

        ExtractionTrace {
            normalized: normalized.text.clone(),
            fancy_override: normalized.fancy_override,
            segments,
            extracted,
            disambiguated,
            validated,
            record,
        }
    }
}

/// One candidate per field whose label was found.
fn extract_all(segments: &Segments) -> Candidates {
    let mut candidates = Candidates::default();
    for field in Field::ALL {
        if let Some(seg) = segments.get(field) {
            candidates.set(field, extract_candidate(field, seg));
        }
    }
    candidates
}
