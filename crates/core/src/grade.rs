//! Fixed allowed-value tables for every grading field.
//!
//! These are the only values the extractor may ever emit. Anything outside
//! them is demoted to the empty string.

/// Letter grades (with sign modifiers) and `?` runs accepted as a Result.
pub const RESULT_GRADES: &[&str] = &[
    "D", "DE", "E", "E-", "E+", "F", "F-", "F+", "G", "G-", "G+", "H", "H-", "H+", "I", "I-",
    "I+", "J", "J-", "J+", "K", "K-", "K+", "?", "??", "???",
];

pub const COLOR_GRADES: &[&str] = &[
    "D", "DE", "E", "E+", "E-", "F", "F+", "F-", "G", "G+", "G-", "H", "H+", "H-", "I", "I+",
    "I-", "J", "J+", "J-", "K", "K+", "K-",
];

/// Fluorescence intensity labels accepted for Blue UV.
pub const BLUE_UV_INTENSITIES: &[&str] = &["FAINT", "LIGHT", "MEDIUM", "STRONG", "NONE"];

/// Blue UV value emitted when the intensity is NONE and no code was printed.
pub const BLUE_UV_NONE: &str = "NONE 000";

pub const BROWN_VALUES: &[&str] = &["TLB?", "LB!", "NOT MEASURED", "NONE"];

/// Type IIa/IIb categories. Longer phrases first so scanning prefers them.
pub const TYPE_CATEGORIES: &[&str] = &["BLUE OR GRAY", "MIXED", "WHITE", "GRAY", "BROWN"];

pub const YELLOW_UV_MARKER: &str = "YELL UV";

/// Marker that forces the Fancy Yellow field.
pub const FANCY_OVERRIDE: &str = "CHECK FANCY";

/// Symbols used for uncertain Results: `!` lower, `?` higher.
pub const CONFIDENCE_SYMBOLS: [char; 2] = ['!', '?'];

/// A run of 1–4 confidence symbols, e.g. `!?` or `???`.
pub fn is_confidence_run(s: &str) -> bool {
    (1..=4).contains(&s.chars().count()) && s.chars().all(|c| CONFIDENCE_SYMBOLS.contains(&c))
}

pub fn is_result_grade(s: &str) -> bool {
    is_confidence_run(s) || RESULT_GRADES.contains(&s)
}

/// Exactly three ASCII digits; numeric color codes are accepted verbatim.
pub fn is_numeric_color(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_color_grade(s: &str) -> bool {
    if is_numeric_color(s) {
        return true;
    }
    let letters = s.trim_end_matches(['+', '-']);
    let suffix = s.len() - letters.len();
    let shaped = (1..=3).contains(&letters.len())
        && letters.bytes().all(|b| b.is_ascii_uppercase())
        && suffix <= 1;
    shaped && COLOR_GRADES.contains(&s)
}

/// `<INTENSITY>` or `<INTENSITY> <1-3 digits>`.
pub fn is_blue_uv(s: &str) -> bool {
    let mut parts = s.split(' ');
    let intensity_ok = parts
        .next()
        .is_some_and(|p| BLUE_UV_INTENSITIES.contains(&p));
    let code_ok = match parts.next() {
        None => true,
        Some(code) => (1..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit()),
    };
    intensity_ok && code_ok && parts.next().is_none()
}

pub fn is_brown_value(s: &str) -> bool {
    BROWN_VALUES.contains(&s)
}

pub fn is_type_category(s: &str) -> bool {
    TYPE_CATEGORIES.contains(&s)
}

/// Position of a code's leading letter on the `D..Z` color scale (D = 0).
///
/// Codes that don't start with a scale letter (`??`, `045`, `A`) have no position.
pub fn scale_position(code: &str) -> Option<u8> {
    match code.bytes().next()? {
        c @ b'D'..=b'Z' => Some(c - b'D'),
        _ => None,
    }
}
