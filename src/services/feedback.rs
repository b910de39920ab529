use serde::Serialize;
use std::fmt;

use crate::models::exercise::AngleRange;

/// RGB color hint for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form for toolkits that take hex strings
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Per-tick form classification shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormFeedback {
    Correct,
    OutOfRange { min: f32, max: f32 },
    NotVisible,
}

impl FormFeedback {
    pub fn evaluate(angle: Option<f32>, range: AngleRange) -> Self {
        match angle {
            None => Self::NotVisible,
            Some(angle) if range.contains(angle) => Self::Correct,
            Some(_) => Self::OutOfRange {
                min: range.min(),
                max: range.max(),
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Correct => "Correct form".to_string(),
            Self::OutOfRange { min, max } => format!("Angle out of range [{}, {}]", min, max),
            Self::NotVisible => "Joint not visible".to_string(),
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Correct => Rgb(0, 255, 0),
            Self::OutOfRange { .. } => Rgb(255, 0, 0),
            Self::NotVisible => Rgb(200, 200, 0),
        }
    }
}

impl fmt::Display for FormFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
