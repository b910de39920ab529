use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::exercise::{ExerciseKind, RangeTable, Side};
use crate::services::angle_estimator::{AngleEstimator, NormalizationPolicy};
use crate::services::rep_counter::Targets;

/// Counting session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_exercise")]
    pub exercise: ExerciseKind,

    #[serde(default = "default_side")]
    pub side: Side,

    #[serde(default = "default_reps_per_set")]
    pub target_reps_per_set: u32,

    #[serde(default = "default_sets")]
    pub target_sets: u32,

    /// Landmarks at or below this visibility are treated as not visible
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,

    #[serde(default)]
    pub normalization: NormalizationPolicy,

    #[serde(default)]
    pub ranges: RangeTable,
}

fn default_exercise() -> ExerciseKind {
    ExerciseKind::UpperBody
}

fn default_side() -> Side {
    Side::Left
}

fn default_reps_per_set() -> u32 {
    10
}

fn default_sets() -> u32 {
    3
}

fn default_visibility_threshold() -> f32 {
    0.3
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exercise: default_exercise(),
            side: default_side(),
            target_reps_per_set: default_reps_per_set(),
            target_sets: default_sets(),
            visibility_threshold: default_visibility_threshold(),
            normalization: NormalizationPolicy::default(),
            ranges: RangeTable::default(),
        }
    }
}

impl SessionConfig {
    /// Check every field; the first problem found is returned
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.targets()?;
        self.estimator()?;
        Ok(())
    }

    pub fn targets(&self) -> Result<Targets, ConfigError> {
        Targets::new(self.target_reps_per_set, self.target_sets)
    }

    pub fn estimator(&self) -> Result<AngleEstimator, ConfigError> {
        AngleEstimator::new(self.normalization, self.visibility_threshold)
    }
}
