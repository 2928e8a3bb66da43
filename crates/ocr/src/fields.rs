//! Per-field candidate extraction from a raw segment.

use gemgrade_core::grade::BLUE_UV_NONE;
use gemgrade_core::Field;

use crate::rules::{
    re_blue_uv, re_code_prefix, re_detached_sign, re_misread_digit, re_phrase, LABEL_WORDS,
};

/// Apply the field's extraction pattern to its segment.
/// No match yields an empty candidate.
///
/// Brown and Type are never read here: only the domain rules in
/// [`crate::fallback`] may produce them.
pub fn extract_candidate(field: Field, segment: &str) -> String {
    match field {
        Field::Result | Field::Color => extract_code(field, segment),
        Field::BlueUv => extract_blue_uv(segment),
        Field::Brown | Field::Type => String::new(),
        Field::YellowUv | Field::FancyYellow => extract_phrase(segment),
    }
}

/// Result / Color: up to four code characters with OCR spaces squeezed out.
fn extract_code(field: Field, segment: &str) -> String {
    let compact: String = segment.chars().filter(|c| !c.is_whitespace()).collect();
    re_code_prefix()
        .find(&compact)
        .map(|m| normalize_code(field, m.as_str()))
        .unwrap_or_default()
}

/// Correct digit/letter confusion in a Result or Color code.
///
/// A lone `6` or `1` (sign kept) reads as `G` / `I`. A Result made only of
/// digits is a confidence run: each digit below 5 becomes `!`, the rest `?`.
pub fn normalize_code(field: Field, raw: &str) -> String {
    if let Some(c) = re_misread_digit().captures(raw) {
        let letter = if &c[1] == "6" { 'G' } else { 'I' };
        return format!("{letter}{}", &c[2]);
    }
    if field == Field::Result && !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return confidence_symbols(raw);
    }
    raw.to_string()
}

pub fn confidence_symbols(digits: &str) -> String {
    digits
        .bytes()
        .map(|d| if d < b'5' { '!' } else { '?' })
        .collect()
}

fn extract_blue_uv(segment: &str) -> String {
    let Some(c) = re_blue_uv().captures(segment) else {
        return String::new();
    };
    let intensity = &c[1];
    match c.get(2) {
        Some(code) => format!("{intensity} {}", code.as_str()),
        None if intensity == "NONE" => BLUE_UV_NONE.to_string(),
        None => intensity.to_string(),
    }
}

/// Leading run of words; the domain rules decide what survives.
fn extract_phrase(segment: &str) -> String {
    re_phrase()
        .find(segment.trim())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Split a segment into grade-code tokens in reading order.
///
/// Signs separated by OCR spacing (`E -`) rejoin their letter, characters
/// that can't belong to a code are dropped, and label words are skipped.
pub fn grade_tokens(segment: &str) -> Vec<String> {
    re_detached_sign()
        .replace_all(segment, "$1")
        .split_whitespace()
        .map(|t| {
            t.chars()
                .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || "+-!?".contains(*c))
                .collect::<String>()
        })
        .filter(|t| !t.is_empty() && !LABEL_WORDS.contains(&t.as_str()))
        .collect()
}
