use std::collections::BTreeMap;

use gemgrade_core::Field;
use serde::Serialize;

use crate::rules::{re_labels, re_type_category_lead, LABEL_RULES};

/// Raw text following each field label, keyed by field.
///
/// A field whose label never appeared has no entry, which is different from
/// a label that appeared with nothing after it (an empty segment).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Segments(BTreeMap<Field, String>);

impl Segments {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Field, String)> for Segments {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

struct Boundary {
    field: Field,
    start: usize,
    end: usize,
}

/// Split normalized text on field labels.
///
/// Only the first occurrence of each label opens a segment; repeated labels
/// stay inside whatever segment they fall in.
pub fn segment(text: &str) -> Segments {
    let bounds = first_label_boundaries(text);
    bounds
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let stop = bounds.get(i + 1).map_or(text.len(), |next| next.start);
            (b.field, clean_segment(&text[b.end..stop]))
        })
        .collect()
}

fn first_label_boundaries(text: &str) -> Vec<Boundary> {
    let mut seen = Vec::with_capacity(LABEL_RULES.len());
    let mut bounds = Vec::new();

    for caps in re_labels().captures_iter(text) {
        let Some((idx, m)) = (0..LABEL_RULES.len()).find_map(|i| caps.get(i + 1).map(|m| (i, m)))
        else {
            continue;
        };
        let field = LABEL_RULES[idx].field;

        // "TYPE 2A BROWN": the category word, not the Brown label.
        if field == Field::Brown && re_type_category_lead().is_match(&text[..m.start()]) {
            continue;
        }
        if seen.contains(&field) {
            continue;
        }
        seen.push(field);
        bounds.push(Boundary { field, start: m.start(), end: m.end() });
    }

    bounds
}

fn clean_segment(raw: &str) -> String {
    raw.trim().trim_start_matches([':', '.']).trim().to_string()
}
