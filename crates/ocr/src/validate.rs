use gemgrade_core::grade::{
    is_blue_uv, is_brown_value, is_color_grade, is_result_grade, is_type_category,
    FANCY_OVERRIDE, YELLOW_UV_MARKER,
};
use gemgrade_core::Field;
use tracing::trace;

use crate::types::Candidates;

/// Whether `value` is in the field's fixed allowed-value set.
pub fn is_allowed(field: Field, value: &str) -> bool {
    match field {
        Field::Result => is_result_grade(value),
        Field::Color => is_color_grade(value),
        Field::BlueUv => is_blue_uv(value),
        Field::Brown => is_brown_value(value),
        Field::YellowUv => value == YELLOW_UV_MARKER,
        Field::Type => is_type_category(value),
        Field::FancyYellow => value == FANCY_OVERRIDE,
    }
}

/// The candidate unchanged when allowed, otherwise the empty string.
pub fn validate(field: Field, candidate: &str) -> String {
    if is_allowed(field, candidate) {
        candidate.to_string()
    } else {
        if !candidate.is_empty() {
            trace!(%field, candidate, "candidate rejected");
        }
        String::new()
    }
}

pub fn validate_all(candidates: &Candidates) -> Candidates {
    let mut out = Candidates::default();
    for (field, value) in candidates.iter() {
        out.set(field, validate(field, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_values() {
        assert_eq!(validate(Field::Result, "E+"), "E+");
        assert_eq!(validate(Field::Result, "!?!"), "!?!");
        assert_eq!(validate(Field::Result, "L"), "");
        assert_eq!(validate(Field::Result, "E-NO"), "");
    }

    #[test]
    fn color_values() {
        assert_eq!(validate(Field::Color, "K+"), "K+");
        assert_eq!(validate(Field::Color, "123"), "123");
        assert_eq!(validate(Field::Color, "??"), "");
        assert_eq!(validate(Field::Color, "FS"), "");
    }

    #[test]
    fn phrase_fields_only_accept_domain_values() {
        assert_eq!(validate(Field::Brown, "NONE"), "NONE");
        assert_eq!(validate(Field::Brown, "NONE SEEN"), "");
        assert_eq!(validate(Field::YellowUv, "YELL UV"), "YELL UV");
        assert_eq!(validate(Field::YellowUv, "FAINT"), "");
        assert_eq!(validate(Field::Type, "GRAY"), "GRAY");
        assert_eq!(validate(Field::FancyYellow, "YES"), "");
    }

    #[test]
    fn empty_is_never_allowed() {
        for field in Field::ALL {
            assert!(!is_allowed(field, ""), "{field}");
        }
    }

    #[test]
    fn validate_all_demotes_per_field() {
        let c = Candidates {
            result: "E".into(),
            color: "ZZ".into(),
            blue_uv: "LIGHT 030".into(),
            brown: "LB".into(),
            ..Default::default()
        };
        let v = validate_all(&c);
        assert_eq!(v.result, "E");
        assert_eq!(v.color, "");
        assert_eq!(v.blue_uv, "LIGHT 030");
        assert_eq!(v.brown, "");
    }
}
