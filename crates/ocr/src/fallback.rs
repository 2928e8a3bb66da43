use gemgrade_core::grade::{FANCY_OVERRIDE, YELLOW_UV_MARKER};
use gemgrade_core::{
    ExistingValues, Field, GradingRecord, BROWN_ORIGINAL, COLOR_ORIGINAL, TYPE_ORIGINAL,
};
use tracing::debug;

use crate::preprocess::Normalized;
use crate::rules::{first_phrase_rule, re_type_phrase, BROWN_RULES};
use crate::segment::Segments;
use crate::types::Candidates;
use crate::validate::validate;

/// Fill fields the text left undetermined, then assemble the record.
///
/// Every recovered value goes back through validation, including values
/// taken from `existing`.
pub fn resolve_fallbacks(
    candidates: Candidates,
    normalized: &Normalized,
    segments: &Segments,
    existing: Option<&ExistingValues>,
) -> GradingRecord {
    let mut record = candidates;

    // ── Brown ────────────────────────────────────────────────────────────────
    if record.brown.is_empty() {
        if let Some(rule) = segments
            .get(Field::Brown)
            .and_then(|seg| first_phrase_rule(BROWN_RULES, seg))
        {
            debug!(rule = rule.name, "brown from segment rule");
            adopt(&mut record, Field::Brown, rule.value);
        }
    }
    if record.brown.is_empty() {
        if let Some(prev) = existing.and_then(|e| e.normalized(BROWN_ORIGINAL)) {
            if prev == "NOT MEASURED" {
                debug!(rule = "existing_brown", "brown from stored value");
                adopt(&mut record, Field::Brown, &prev);
            }
        }
    }

    // ── Type ─────────────────────────────────────────────────────────────────
    if record.diamond_type.is_empty() {
        if let Some(caps) = re_type_phrase().captures(&normalized.text) {
            let category = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
            debug!(rule = "type_phrase", "type from text");
            adopt(&mut record, Field::Type, &category);
        }
    }
    if record.diamond_type.is_empty() {
        if let Some(prev) = existing.and_then(|e| e.normalized(TYPE_ORIGINAL)) {
            debug!(rule = "existing_type", "type from stored value");
            adopt(&mut record, Field::Type, &prev);
        }
    }

    // ── Color ────────────────────────────────────────────────────────────────
    if record.color.is_empty() {
        if let Some(prev) = existing.and_then(|e| e.normalized(COLOR_ORIGINAL)) {
            debug!(rule = "existing_color", "color from stored value");
            adopt(&mut record, Field::Color, &prev);
        }
    }

    // ── Yellow UV ────────────────────────────────────────────────────────────
    if record.yellow_uv.is_empty() && normalized.text.contains(YELLOW_UV_MARKER) {
        adopt(&mut record, Field::YellowUv, YELLOW_UV_MARKER);
    }

    // ── Fancy Yellow ─────────────────────────────────────────────────────────
    if normalized.fancy_override {
        debug!(rule = "check_fancy", "fancy yellow forced");
        record.fancy_yellow = FANCY_OVERRIDE.to_string();
    }

    record
}

/// Store `value` only if it validates; otherwise leave the field as it was.
fn adopt(record: &mut GradingRecord, field: Field, value: &str) {
    let checked = validate(field, value);
    if !checked.is_empty() {
        record.set(field, checked);
    }
}
