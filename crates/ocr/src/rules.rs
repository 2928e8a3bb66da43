//! Ordered rule tables driving the extractor.
//!
//! Every pattern the pipeline relies on lives here as named data. Tables are
//! evaluated in declaration order; the first matching rule wins unless noted.

use std::sync::OnceLock;

use gemgrade_core::Field;
use regex::{NoExpand, Regex};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        pub(crate) fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_line_breaks, r"[\r\n]+");
re!(re_code_prefix, r"^[A-Z0-9+\-!?]{1,4}");
re!(re_misread_digit, r"^([61])([+\-]?)$");
re!(re_detached_sign, r"\s+([+\-])");
re!(re_blue_uv,
    r"\b(FAINT|LIGHT|MEDIUM|STRONG|NONE)\b(?:\s*(\d{1,3})\b)?");
re!(re_phrase, r"^[A-Z!?]+(?: +[A-Z!?]+)*");
re!(re_type_phrase,
    r"\bTYPE\s*2\s*[AB]\s*(BLUE\s*OR\s*GRAY|MIXED|WHITE|GRAY|BROWN)\b");
re!(re_type_category_lead, r"\bTYPE\s*2\s*[AB]\s*$");
re!(re_result_word, r"\bRESULT\b");

// ── Substitutions ────────────────────────────────────────────────────────────

/// A literal-or-regex rewrite applied to upper-cased OCR text.
#[derive(Debug, Clone, Copy)]
pub struct Substitution {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// Known OCR misreads and separator noise. Order matters: later rules see
/// the output of earlier ones.
pub const SUBSTITUTIONS: &[Substitution] = &[
    Substitution { name: "yell_uu", pattern: r"\bYELL\s*UU\b", replacement: "YELL UV" },
    Substitution { name: "blue_dropped_b", pattern: r"\bLUE\s*UV\b", replacement: "BLUE UV" },
    Substitution { name: "wu_as_uv", pattern: r"\bWU\b", replacement: "UV" },
    Substitution { name: "brown_dropped_b", pattern: r"\bROWN\b", replacement: "BROWN" },
    Substitution { name: "licht", pattern: r"\bLICHT\b", replacement: "LIGHT" },
    Substitution { name: "equals_as_dash", pattern: r"=", replacement: "-" },
    Substitution { name: "pipe_pairs", pattern: r"\|\|", replacement: "" },
    Substitution { name: "whitespace", pattern: r"\s+", replacement: " " },
];

fn compiled_substitutions() -> &'static [(Substitution, Regex)] {
    static R: OnceLock<Vec<(Substitution, Regex)>> = OnceLock::new();
    R.get_or_init(|| {
        SUBSTITUTIONS
            .iter()
            .map(|s| (*s, Regex::new(s.pattern).expect("invalid substitution pattern")))
            .collect()
    })
}

/// Run every substitution in order.
pub fn apply_substitutions(text: &str) -> String {
    compiled_substitutions()
        .iter()
        .fold(text.to_string(), |acc, (sub, re)| {
            re.replace_all(&acc, NoExpand(sub.replacement)).into_owned()
        })
}

/// Run a single named substitution; `None` when no rule has that name.
pub fn apply_substitution(name: &str, text: &str) -> Option<String> {
    let (sub, re) = compiled_substitutions().iter().find(|(s, _)| s.name == name)?;
    Some(re.replace_all(text, NoExpand(sub.replacement)).into_owned())
}

// ── Field labels ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub field: Field,
    pub pattern: &'static str,
    /// Text before the first anchoring label is certificate header noise.
    pub anchors_preamble: bool,
}

pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule { field: Field::Result, pattern: r"\bRESULT\b", anchors_preamble: true },
    LabelRule { field: Field::Color, pattern: r"\bCOLOU?R\b", anchors_preamble: true },
    LabelRule { field: Field::BlueUv, pattern: r"\bBLUE\s*UV\b", anchors_preamble: true },
    LabelRule { field: Field::Brown, pattern: r"\bBROWN\b", anchors_preamble: false },
    LabelRule { field: Field::YellowUv, pattern: r"\bYELL(?:OW)?\s*UV\b", anchors_preamble: false },
    LabelRule { field: Field::Type, pattern: r"\bTYPE\b", anchors_preamble: false },
    LabelRule { field: Field::FancyYellow, pattern: r"\bFANCY\s*YELLOW\b", anchors_preamble: false },
];

/// All labels as one alternation; capture group `i + 1` is `LABEL_RULES[i]`.
pub(crate) fn re_labels() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        let alternation = LABEL_RULES
            .iter()
            .map(|l| format!("({})", l.pattern))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("invalid label pattern")
    })
}

pub(crate) fn re_preamble_anchor() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        let alternation = LABEL_RULES
            .iter()
            .filter(|l| l.anchors_preamble)
            .map(|l| l.pattern)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("invalid anchor pattern")
    })
}

/// Words that name a field rather than carry a value.
pub const LABEL_WORDS: &[&str] = &["RESULT", "COLOR", "COLOUR"];

// ── Value rules ──────────────────────────────────────────────────────────────

/// Literal OCR typos seen in Color tokens.
pub const COLOR_TYPOS: &[(&str, &str)] = &[("FS", "F"), ("CH", "H"), ("1", "I")];

pub fn fix_color_typo(token: &str) -> &str {
    COLOR_TYPOS
        .iter()
        .find(|(typo, _)| *typo == token)
        .map_or(token, |&(_, fixed)| fixed)
}

#[derive(Debug, Clone, Copy)]
pub enum PhraseMatch {
    Contains(&'static str),
    AllOf(&'static [&'static str]),
    /// A standalone alphanumeric token, ignoring surrounding punctuation.
    Token(&'static str),
}

impl PhraseMatch {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            PhraseMatch::Contains(s) => text.contains(s),
            PhraseMatch::AllOf(parts) => parts.iter().all(|p| text.contains(p)),
            PhraseMatch::Token(t) => text
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|tok| tok == *t),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhraseRule {
    pub name: &'static str,
    pub matcher: PhraseMatch,
    pub value: &'static str,
}

pub const BROWN_RULES: &[PhraseRule] = &[
    PhraseRule { name: "tlb_query", matcher: PhraseMatch::Contains("TLB?"), value: "TLB?" },
    PhraseRule { name: "lb_token", matcher: PhraseMatch::Token("LB"), value: "LB!" },
    PhraseRule {
        name: "not_measured",
        matcher: PhraseMatch::AllOf(&["NOT", "MEASURED"]),
        value: "NOT MEASURED",
    },
    PhraseRule { name: "none", matcher: PhraseMatch::Contains("NONE"), value: "NONE" },
];

/// First rule in `rules` matching `text`.
pub fn first_phrase_rule<'a>(rules: &'a [PhraseRule], text: &str) -> Option<&'a PhraseRule> {
    rules.iter().find(|r| r.matcher.matches(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemgrade_core::grade::TYPE_CATEGORIES;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(compiled_substitutions().len(), SUBSTITUTIONS.len());
        let _ = re_labels();
        let _ = re_preamble_anchor();
        let _ = re_type_phrase();
        let _ = re_blue_uv();
    }

    #[test]
    fn substitution_names_are_unique() {
        let mut names: Vec<_> = SUBSTITUTIONS.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SUBSTITUTIONS.len());
    }

    #[test]
    fn dropped_leading_b_is_restored() {
        assert_eq!(apply_substitution("blue_dropped_b", "LUE UV FAINT").unwrap(), "BLUE UV FAINT");
        assert_eq!(apply_substitution("brown_dropped_b", "ROWN NONE").unwrap(), "BROWN NONE");
    }

    #[test]
    fn intact_labels_are_untouched() {
        let text = "BLUE UV LIGHT 030 BROWN NONE";
        assert_eq!(apply_substitutions(text), text);
    }

    #[test]
    fn misread_uv_variants() {
        assert_eq!(apply_substitution("yell_uu", "YELL UU").unwrap(), "YELL UV");
        assert_eq!(apply_substitution("wu_as_uv", "BLUE WU").unwrap(), "BLUE UV");
        assert_eq!(apply_substitution("licht", "LICHT 045").unwrap(), "LIGHT 045");
    }

    #[test]
    fn separator_cleanup() {
        assert_eq!(apply_substitutions("RESULT ||E= "), "RESULT E- ");
        assert_eq!(apply_substitutions("A  \t B"), "A B");
    }

    #[test]
    fn unknown_substitution_name() {
        assert!(apply_substitution("nope", "x").is_none());
    }

    #[test]
    fn preamble_anchors_are_result_color_blue() {
        let anchors: Vec<Field> = LABEL_RULES
            .iter()
            .filter(|l| l.anchors_preamble)
            .map(|l| l.field)
            .collect();
        assert_eq!(anchors, vec![Field::Result, Field::Color, Field::BlueUv]);
    }

    #[test]
    fn every_field_has_one_label_rule() {
        for field in Field::ALL {
            assert_eq!(LABEL_RULES.iter().filter(|l| l.field == field).count(), 1, "{field}");
        }
    }

    #[test]
    fn type_phrase_covers_every_category() {
        for cat in TYPE_CATEGORIES {
            let text = format!("TYPE 2B {cat}");
            let caps = re_type_phrase().captures(&text).unwrap();
            assert_eq!(&caps[1], *cat);
        }
    }

    #[test]
    fn color_typos() {
        assert_eq!(fix_color_typo("FS"), "F");
        assert_eq!(fix_color_typo("CH"), "H");
        assert_eq!(fix_color_typo("1"), "I");
        assert_eq!(fix_color_typo("G"), "G");
    }

    #[test]
    fn brown_rule_precedence() {
        let pick = |t: &str| first_phrase_rule(BROWN_RULES, t).map(|r| r.value);
        assert_eq!(pick("TLB?"), Some("TLB?"));
        assert_eq!(pick("LB"), Some("LB!"));
        assert_eq!(pick("LB!"), Some("LB!"));
        assert_eq!(pick("NOT YET MEASURED"), Some("NOT MEASURED"));
        assert_eq!(pick("NONE"), Some("NONE"));
        assert_eq!(pick("BLB"), None);
        assert_eq!(pick(""), None);
    }
}
