use gemgrade_core::GradingRecord;
use serde::Serialize;

use crate::segment::Segments;

/// Working values for the seven fields between pipeline stages.
///
/// Each stage may replace a candidate but never appends to one; empty means
/// not yet determined.
pub type Candidates = GradingRecord;

/// Every intermediate stage output for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionTrace {
    pub normalized: String,
    pub fancy_override: bool,
    pub segments: Segments,
    pub extracted: Candidates,
    pub disambiguated: Candidates,
    pub validated: Candidates,
    pub record: GradingRecord,
}
