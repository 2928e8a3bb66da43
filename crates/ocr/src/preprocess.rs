use gemgrade_core::grade::FANCY_OVERRIDE;
use serde::Serialize;

use crate::rules::{self, re_line_breaks, re_preamble_anchor};

/// OCR text after cleanup, ready for segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalized {
    pub text: String,
    /// `CHECK FANCY` appeared somewhere in the cleaned text, header included.
    pub fancy_override: bool,
}

/// Fold line breaks and case, correct known misreads, detect the Fancy Yellow
/// override, and drop any header text before the first anchoring label.
pub fn normalize(raw: &str) -> Normalized {
    let folded = re_line_breaks().replace_all(raw, " ").to_uppercase();
    let cleaned = rules::apply_substitutions(&folded);
    let fancy_override = cleaned.contains(FANCY_OVERRIDE);
    let text = trim_preamble(&cleaned).trim().to_string();
    Normalized { text, fancy_override }
}

/// Slice from the first RESULT / COLOR / BLUE UV label; unchanged if none.
fn trim_preamble(text: &str) -> &str {
    re_preamble_anchor()
        .find(text)
        .map_or(text, |m| &text[m.start()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_lines_and_case() {
        let n = normalize("Result\nE-\r\ncolor F");
        assert_eq!(n.text, "RESULT E- COLOR F");
        assert!(!n.fancy_override);
    }

    #[test]
    fn drops_certificate_header() {
        let n = normalize("GEM LAB REPORT No 12345\nRESULT F COLOR G");
        assert_eq!(n.text, "RESULT F COLOR G");
    }

    #[test]
    fn header_trimmed_from_color_when_result_missing() {
        let n = normalize("lab 7 color h blue uv none");
        assert_eq!(n.text, "COLOR H BLUE UV NONE");
    }

    #[test]
    fn no_anchor_leaves_text_whole() {
        let n = normalize("brown  not measured");
        assert_eq!(n.text, "BROWN NOT MEASURED");
    }

    #[test]
    fn fancy_override_seen_in_header() {
        let n = normalize("check fancy\nRESULT E");
        assert!(n.fancy_override);
        assert_eq!(n.text, "RESULT E");
    }

    #[test]
    fn misreads_corrected_before_labels_are_found() {
        let n = normalize("xx lue uv licht 030 rown none yell uu");
        assert_eq!(n.text, "BLUE UV LIGHT 030 BROWN NONE YELL UV");
    }

    #[test]
    fn pipes_and_equals_cleaned() {
        let n = normalize("RESULT ||E=|| COLOR F");
        assert_eq!(n.text, "RESULT E- COLOR F");
    }

    #[test]
    fn empty_input() {
        let n = normalize("");
        assert_eq!(n.text, "");
        assert!(!n.fancy_override);
    }
}
