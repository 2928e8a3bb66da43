use serde::{Deserialize, Serialize};

use crate::field::Field;

/// The seven grading annotations for one scanned certificate.
///
/// Empty string is the only "undetermined" state; there is no absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingRecord {
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Blue UV")]
    pub blue_uv: String,
    #[serde(rename = "Brown")]
    pub brown: String,
    #[serde(rename = "Yellow UV")]
    pub yellow_uv: String,
    #[serde(rename = "Type")]
    pub diamond_type: String,
    #[serde(rename = "Fancy Yellow")]
    pub fancy_yellow: String,
}

impl GradingRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Result => &self.result,
            Field::Color => &self.color,
            Field::BlueUv => &self.blue_uv,
            Field::Brown => &self.brown,
            Field::YellowUv => &self.yellow_uv,
            Field::Type => &self.diamond_type,
            Field::FancyYellow => &self.fancy_yellow,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Result => &mut self.result,
            Field::Color => &mut self.color,
            Field::BlueUv => &mut self.blue_uv,
            Field::Brown => &mut self.brown,
            Field::YellowUv => &mut self.yellow_uv,
            Field::Type => &mut self.diamond_type,
            Field::FancyYellow => &mut self.fancy_yellow,
        };
        *slot = value;
    }

    /// Fields paired with their values, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// True when no field could be determined.
    pub fn is_blank(&self) -> bool {
        self.iter().all(|(_, v)| v.is_empty())
    }
}
