//! Cross-field repairs applied before validation.
//!
//! Result and Color are printed side by side on most certificates and OCR
//! regularly moves one value into the other's segment. The passes below run
//! in a fixed order; each may replace a candidate.

use gemgrade_core::grade::{is_color_grade, is_result_grade, scale_position};
use gemgrade_core::Field;
use tracing::debug;

use crate::fields::{grade_tokens, normalize_code};
use crate::rules::{fix_color_typo, re_result_word};
use crate::segment::Segments;
use crate::types::Candidates;

pub fn disambiguate(mut c: Candidates, segments: &Segments) -> Candidates {
    swap_from_color_segment(&mut c, segments);
    infer_color_from_result_segment(&mut c, segments);
    if c.color == "1" {
        debug!(rule = "bare_one_color", "color 1 read as I");
        c.color = "I".to_string();
    }
    rescan_result(&mut c, segments);
    rescan_color(&mut c, segments);
    infer_result_from_absence(&mut c, segments);
    repair_scale_order(&mut c);
    c
}

/// Both values landed after the Color label: either the Color segment names
/// RESULT itself, or the Result label was printed with nothing after it.
///
/// A repeated RESULT label only counts when the first Result segment gave no
/// usable grade.
fn swap_from_color_segment(c: &mut Candidates, segments: &Segments) {
    let Some(color_seg) = segments.get(Field::Color) else {
        return;
    };
    let names_result = re_result_word().is_match(color_seg) && !is_result_grade(&c.result);
    let result_blank = segments.get(Field::Result).is_some_and(|s| s.trim().is_empty());
    if !names_result && !result_blank {
        return;
    }

    let tokens = grade_tokens(color_seg);
    let needed = if names_result { 1 } else { 2 };
    if tokens.len() < needed {
        return;
    }
    debug!(rule = "swapped_result_color", tokens = tokens.len(), "reassigning from color segment");
    c.result = normalize_code(Field::Result, &tokens[0]);
    if let Some(second) = tokens.get(1) {
        c.color = normalize_code(Field::Color, second);
    }
}

/// Color missing: the Result segment sometimes holds both values.
fn infer_color_from_result_segment(c: &mut Candidates, segments: &Segments) {
    if !c.color.is_empty() {
        return;
    }
    let Some(result_seg) = segments.get(Field::Result) else {
        return;
    };
    let tokens = grade_tokens(result_seg);
    if let [first, second, ..] = tokens.as_slice() {
        debug!(rule = "color_from_result_segment", "splitting result segment");
        c.result = normalize_code(Field::Result, first);
        c.color = normalize_code(Field::Color, second);
    }
}

/// Loose token scan of the Result segment for the first usable code.
fn rescan_result(c: &mut Candidates, segments: &Segments) {
    if is_result_grade(&c.result) {
        return;
    }
    let Some(result_seg) = segments.get(Field::Result) else {
        return;
    };
    if let Some(found) = grade_tokens(result_seg)
        .iter()
        .map(|t| normalize_code(Field::Result, t))
        .find(|t| is_result_grade(t))
    {
        debug!(rule = "rescan_result", "recovered result from tokens");
        c.result = found;
    }
}

/// Loose scan for Color: the Color segment's own tokens first (with typo
/// fixes), then trailing letter tokens of the Result segment.
fn rescan_color(c: &mut Candidates, segments: &Segments) {
    if is_color_grade(&c.color) {
        return;
    }

    let from_color = segments.get(Field::Color).and_then(|seg| {
        grade_tokens(seg)
            .into_iter()
            .map(|t| normalize_code(Field::Color, fix_color_typo(&t)))
            .find(|t| is_color_grade(t))
    });

    let from_result = || {
        grade_tokens(segments.get(Field::Result)?)
            .into_iter()
            .skip(1)
            .rev()
            .filter(|t| t.starts_with(|ch: char| ch.is_ascii_uppercase()))
            .map(|t| fix_color_typo(&t).to_string())
            .find(|t| is_color_grade(t))
    };

    if let Some(found) = from_color.or_else(from_result) {
        debug!(rule = "rescan_color", "recovered color from tokens");
        c.color = found;
    }
}

/// No Result printed: a STRONG blue reaction implies `??`, a Yellow UV note `!!`.
fn infer_result_from_absence(c: &mut Candidates, segments: &Segments) {
    if is_result_grade(&c.result) {
        return;
    }
    if segments.get(Field::BlueUv).is_some_and(|s| s.contains("STRONG")) {
        debug!(rule = "result_from_strong_blue", "result inferred");
        c.result = "??".to_string();
    } else if segments.contains(Field::YellowUv) {
        debug!(rule = "result_from_yellow_uv", "result inferred");
        c.result = "!!".to_string();
    }
}

/// A Color better than the Result on the D..Z scale is taken as a Color
/// misread and replaced by the Result.
fn repair_scale_order(c: &mut Candidates) {
    if !is_result_grade(&c.result) || !is_color_grade(&c.color) {
        return;
    }
    if let (Some(result_pos), Some(color_pos)) = (scale_position(&c.result), scale_position(&c.color)) {
        if color_pos < result_pos {
            debug!(rule = "scale_order", result = %c.result, color = %c.color, "color overwritten");
            c.color = c.result.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(pairs: &[(Field, &str)]) -> Segments {
        pairs.iter().map(|(f, s)| (*f, s.to_string())).collect()
    }

    fn cands(result: &str, color: &str) -> Candidates {
        Candidates {
            result: result.into(),
            color: color.into(),
            ..Default::default()
        }
    }

    #[test]
    fn consistent_values_pass_through() {
        let s = segs(&[(Field::Result, "E-"), (Field::Color, "F")]);
        let out = disambiguate(cands("E-", "F"), &s);
        assert_eq!((out.result.as_str(), out.color.as_str()), ("E-", "F"));
    }

    #[test]
    fn color_segment_naming_result_is_split() {
        let s = segs(&[(Field::Result, "ZZ"), (Field::Color, "RESULT 37 H")]);
        let out = disambiguate(cands("ZZ", "RESU"), &s);
        assert_eq!(out.result, "!?");
        assert_eq!(out.color, "H");
    }

    #[test]
    fn repeated_result_label_keeps_first_occurrence() {
        let s = segs(&[(Field::Result, "E"), (Field::Color, "F RESULT G")]);
        let out = disambiguate(cands("E", "FRES"), &s);
        assert_eq!(out.result, "E");
        assert_eq!(out.color, "F");
    }

    #[test]
    fn blank_result_label_takes_first_color_token() {
        let s = segs(&[(Field::Result, ""), (Field::Color, "E- F")]);
        let out = disambiguate(cands("", "E-F"), &s);
        assert_eq!(out.result, "E-");
        assert_eq!(out.color, "F");
    }

    #[test]
    fn blank_result_with_single_color_token_keeps_color() {
        let s = segs(&[(Field::Result, ""), (Field::Color, "F")]);
        let out = disambiguate(cands("", "F"), &s);
        assert_eq!(out.result, "");
        assert_eq!(out.color, "F");
    }

    #[test]
    fn color_inferred_from_result_segment() {
        let s = segs(&[(Field::Result, "E - 6")]);
        let out = disambiguate(cands("E-6", ""), &s);
        assert_eq!(out.result, "E-");
        assert_eq!(out.color, "G");
    }

    #[test]
    fn bare_one_color() {
        let out = disambiguate(cands("E", "1"), &segs(&[]));
        assert_eq!(out.color, "I");
    }

    #[test]
    fn rescan_result_handles_noise() {
        let s = segs(&[(Field::Result, "E- NOTE"), (Field::Color, "G")]);
        let out = disambiguate(cands("E-NO", "G"), &s);
        assert_eq!(out.result, "E-");
    }

    #[test]
    fn rescan_color_typo_map() {
        let s = segs(&[(Field::Result, "E"), (Field::Color, "FS")]);
        let out = disambiguate(cands("E", "FS"), &s);
        assert_eq!(out.color, "F");

        let s = segs(&[(Field::Result, "G"), (Field::Color, "CH")]);
        let out = disambiguate(cands("G", "CH"), &s);
        assert_eq!(out.color, "H");
    }

    #[test]
    fn rescan_color_from_trailing_result_tokens() {
        let s = segs(&[(Field::Result, "E XX H"), (Field::Color, "??")]);
        let out = disambiguate(cands("E", "??"), &s);
        assert_eq!(out.color, "H");
    }

    #[test]
    fn strong_blue_implies_double_query() {
        let s = segs(&[(Field::BlueUv, "STRONG 120")]);
        assert_eq!(disambiguate(cands("", ""), &s).result, "??");
    }

    #[test]
    fn yellow_uv_label_implies_double_bang() {
        let s = segs(&[(Field::YellowUv, "")]);
        assert_eq!(disambiguate(cands("", ""), &s).result, "!!");
    }

    #[test]
    fn strong_blue_beats_yellow_uv() {
        let s = segs(&[(Field::BlueUv, "STRONG"), (Field::YellowUv, "")]);
        assert_eq!(disambiguate(cands("", ""), &s).result, "??");
    }

    #[test]
    fn present_result_is_not_inferred() {
        let s = segs(&[(Field::Result, "F"), (Field::YellowUv, "")]);
        assert_eq!(disambiguate(cands("F", ""), &s).result, "F");
    }

    #[test]
    fn better_color_than_result_is_overwritten() {
        let s = segs(&[(Field::Result, "G+"), (Field::Color, "E")]);
        let out = disambiguate(cands("G+", "E"), &s);
        assert_eq!(out.color, "G+");
    }

    #[test]
    fn scale_repair_ignores_symbol_results_and_numeric_colors() {
        let s = segs(&[(Field::Result, "??"), (Field::Color, "D")]);
        assert_eq!(disambiguate(cands("??", "D"), &s).color, "D");

        let s = segs(&[(Field::Result, "K"), (Field::Color, "045")]);
        assert_eq!(disambiguate(cands("K", "045"), &s).color, "045");
    }
}
