use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::models::keypoint::{JointTriple, PoseLandmark};

/// Body region being exercised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Arm extension, measured at the elbow
    UpperBody,
    /// Leg extension, measured at the knee
    LowerBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl ExerciseKind {
    pub fn all() -> [Self; 2] {
        [Self::UpperBody, Self::LowerBody]
    }

    /// Landmarks whose vertex angle is tracked for this exercise and side
    pub fn joints(self, side: Side) -> JointTriple {
        use PoseLandmark::*;

        match (self, side) {
            (Self::UpperBody, Side::Left) => JointTriple::new(LeftShoulder, LeftElbow, LeftWrist),
            (Self::UpperBody, Side::Right) => {
                JointTriple::new(RightShoulder, RightElbow, RightWrist)
            }
            (Self::LowerBody, Side::Left) => JointTriple::new(LeftHip, LeftKnee, LeftAnkle),
            (Self::LowerBody, Side::Right) => JointTriple::new(RightHip, RightKnee, RightAnkle),
        }
    }
}

impl Side {
    pub fn all() -> [Self; 2] {
        [Self::Left, Self::Right]
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpperBody => write!(f, "upper"),
            Self::LowerBody => write!(f, "lower"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upper" | "upper_body" | "arm" | "arms" => Ok(Self::UpperBody),
            "lower" | "lower_body" | "leg" | "legs" => Ok(Self::LowerBody),
            other => Err(ConfigError::UnknownExercise(other.to_string())),
        }
    }
}

impl FromStr for Side {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            other => Err(ConfigError::UnknownSide(other.to_string())),
        }
    }
}

/// Closed interval of acceptable joint angles, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAngleRange")]
pub struct AngleRange {
    min: f32,
    max: f32,
}

#[derive(Deserialize)]
struct RawAngleRange {
    min: f32,
    max: f32,
}

impl TryFrom<RawAngleRange> for AngleRange {
    type Error = ConfigError;

    fn try_from(raw: RawAngleRange) -> Result<Self, Self::Error> {
        AngleRange::new(raw.min, raw.max)
    }
}

impl AngleRange {
    /// Build a range, rejecting non-finite bounds and `min > max`
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Inclusive on both ends
    pub fn contains(&self, angle: f32) -> bool {
        self.min <= angle && angle <= self.max
    }
}

impl fmt::Display for AngleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Target ranges for every exercise/side combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTable {
    #[serde(default = "default_upper_left")]
    pub upper_left: AngleRange,

    #[serde(default = "default_upper_right")]
    pub upper_right: AngleRange,

    #[serde(default = "default_lower_left")]
    pub lower_left: AngleRange,

    #[serde(default = "default_lower_right")]
    pub lower_right: AngleRange,
}

fn default_upper_left() -> AngleRange {
    AngleRange { min: 150.0, max: 170.0 }
}

fn default_upper_right() -> AngleRange {
    AngleRange { min: 160.0, max: 180.0 }
}

fn default_lower_left() -> AngleRange {
    AngleRange { min: 160.0, max: 180.0 }
}

fn default_lower_right() -> AngleRange {
    AngleRange { min: 170.0, max: 180.0 }
}

impl Default for RangeTable {
    fn default() -> Self {
        Self {
            upper_left: default_upper_left(),
            upper_right: default_upper_right(),
            lower_left: default_lower_left(),
            lower_right: default_lower_right(),
        }
    }
}

impl RangeTable {
    pub fn range_for(&self, kind: ExerciseKind, side: Side) -> AngleRange {
        match (kind, side) {
            (ExerciseKind::UpperBody, Side::Left) => self.upper_left,
            (ExerciseKind::UpperBody, Side::Right) => self.upper_right,
            (ExerciseKind::LowerBody, Side::Left) => self.lower_left,
            (ExerciseKind::LowerBody, Side::Right) => self.lower_right,
        }
    }

    /// All rows of the table, in display order
    pub fn entries(&self) -> Vec<(ExerciseKind, Side, AngleRange)> {
        ExerciseKind::all()
            .into_iter()
            .flat_map(|kind| Side::all().into_iter().map(move |side| (kind, side)))
            .map(|(kind, side)| (kind, side, self.range_for(kind, side)))
            .collect()
    }
}
