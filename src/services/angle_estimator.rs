/// Joint angle estimation
///
/// The angle at the vertex is the direction of the vertex→distal ray minus
/// the direction of the vertex→proximal ray, brought into [0°, 360°). The
/// interior policy then folds reflex angles back into [0°, 180°].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::models::keypoint::{JointSample, JointTriple, Landmark, Point2D};

const FULL_TURN: f32 = 360.0;
const HALF_TURN: f32 = 180.0;

/// How raw vertex angles are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Result stays in [0°, 360°); orientation of the two rays matters
    Unbounded,
    /// Result is folded into [0°, 180°]; symmetric in proximal/distal
    #[default]
    Interior,
}

impl fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Interior => write!(f, "interior"),
        }
    }
}

impl FromStr for NormalizationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unbounded" => Ok(Self::Unbounded),
            "interior" => Ok(Self::Interior),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Angle at `vertex` between the rays to `proximal` and `distal`, in degrees.
///
/// Total over finite inputs. Collinear or coincident points give 0° or 180°.
pub fn compute_interior_angle(
    proximal: Point2D,
    vertex: Point2D,
    distal: Point2D,
    policy: NormalizationPolicy,
) -> f32 {
    let mut angle = (vertex.direction_to(&distal) - vertex.direction_to(&proximal)).to_degrees();

    if angle < 0.0 {
        angle += FULL_TURN;
    }
    // Rounding after the wrap can land exactly on a full turn
    if angle >= FULL_TURN {
        angle -= FULL_TURN;
    }

    match policy {
        NormalizationPolicy::Unbounded => angle,
        NormalizationPolicy::Interior if angle > HALF_TURN => FULL_TURN - angle,
        NormalizationPolicy::Interior => angle,
    }
}

/// Turns joint samples into angles, gated on landmark visibility
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleEstimator {
    policy: NormalizationPolicy,
    visibility_threshold: f32,
}

impl Default for AngleEstimator {
    fn default() -> Self {
        Self {
            policy: NormalizationPolicy::default(),
            visibility_threshold: 0.3,
        }
    }
}

impl AngleEstimator {
    /// Create an estimator; the threshold must lie in [0, 1)
    pub fn new(policy: NormalizationPolicy, visibility_threshold: f32) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&visibility_threshold) {
            return Err(ConfigError::InvalidThreshold(visibility_threshold));
        }

        Ok(Self {
            policy,
            visibility_threshold,
        })
    }

    pub fn policy(&self) -> NormalizationPolicy {
        self.policy
    }

    pub fn visibility_threshold(&self) -> f32 {
        self.visibility_threshold
    }

    /// Angle of a joint sample, or `None` when any point is not visible
    pub fn estimate(&self, sample: &JointSample) -> Option<f32> {
        if !sample.is_usable(self.visibility_threshold) {
            tracing::debug!(
                visibility = ?sample.visibility,
                threshold = self.visibility_threshold,
                "Joint not visible"
            );
            return None;
        }

        Some(compute_interior_angle(
            sample.proximal,
            sample.vertex,
            sample.distal,
            self.policy,
        ))
    }

    /// Angle of `joints` within a full landmark frame
    pub fn estimate_from_landmarks(&self, landmarks: &[Landmark], joints: JointTriple) -> Option<f32> {
        match JointSample::from_landmarks(landmarks, joints) {
            Some(sample) => self.estimate(&sample),
            None => {
                tracing::debug!(
                    vertex = joints.vertex.name(),
                    landmarks = landmarks.len(),
                    "Frame is missing joint landmarks"
                );
                None
            }
        }
    }
}
