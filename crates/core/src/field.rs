use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven grading annotations captured from a certificate scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Result,
    Color,
    BlueUv,
    Brown,
    YellowUv,
    Type,
    FancyYellow,
}

impl Field {
    /// All fields in canonical output order.
    pub const ALL: [Field; 7] = [
        Field::Result,
        Field::Color,
        Field::BlueUv,
        Field::Brown,
        Field::YellowUv,
        Field::Type,
        Field::FancyYellow,
    ];

    /// Human-readable column label, as it appears in reports.
    pub fn label(self) -> &'static str {
        match self {
            Field::Result => "Result",
            Field::Color => "Color",
            Field::BlueUv => "Blue UV",
            Field::Brown => "Brown",
            Field::YellowUv => "Yellow UV",
            Field::Type => "Type",
            Field::FancyYellow => "Fancy Yellow",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::Result => "result",
            Field::Color => "color",
            Field::BlueUv => "blue_uv",
            Field::Brown => "brown",
            Field::YellowUv => "yellow_uv",
            Field::Type => "type",
            Field::FancyYellow => "fancy_yellow",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        Field::ALL
            .into_iter()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| format!("Unknown grading field: '{s}'"))
    }
}
