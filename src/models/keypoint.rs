/// Landmark models for pose-estimation output
///
/// Landmarks follow the 33-point BlazePose layout. Coordinates are normalized
/// to the camera frame ([0, 1] on both axes) and every landmark carries the
/// estimator's visibility confidence.

use serde::{Deserialize, Serialize};

/// A normalized 2D position in camera-frame space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Direction of the ray from `self` to `other`, in radians
    pub fn direction_to(&self, other: &Point2D) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// A single landmark as reported by the pose estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (normalized 0-1)
    pub x: f32,
    /// Y coordinate (normalized 0-1)
    pub y: f32,
    /// Depth relative to the hips; unused by the angle estimator
    #[serde(default)]
    pub z: f32,
    /// Visibility confidence (0-1)
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Visible means strictly above the threshold
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility > threshold
    }
}

/// BlazePose landmark indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// Number of landmarks in a full BlazePose frame
pub const POSE_LANDMARK_COUNT: usize = 33;

impl PoseLandmark {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get landmark name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// Look up a landmark in a frame, if the frame is long enough to hold it
    pub fn lookup(self, landmarks: &[Landmark]) -> Option<&Landmark> {
        landmarks.get(self.index())
    }
}

/// Three landmarks whose vertex angle is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub proximal: PoseLandmark,
    pub vertex: PoseLandmark,
    pub distal: PoseLandmark,
}

impl JointTriple {
    pub const fn new(proximal: PoseLandmark, vertex: PoseLandmark, distal: PoseLandmark) -> Self {
        Self {
            proximal,
            vertex,
            distal,
        }
    }
}

/// Positions and visibilities of one joint triple in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSample {
    pub proximal: Point2D,
    pub vertex: Point2D,
    pub distal: Point2D,
    /// Visibility of proximal, vertex and distal, in that order
    pub visibility: [f32; 3],
}

impl JointSample {
    pub fn new(proximal: Point2D, vertex: Point2D, distal: Point2D, visibility: [f32; 3]) -> Self {
        Self {
            proximal,
            vertex,
            distal,
            visibility,
        }
    }

    /// Extract a joint triple from a frame. Returns `None` when the frame is
    /// missing any of the three landmarks.
    pub fn from_landmarks(landmarks: &[Landmark], joints: JointTriple) -> Option<Self> {
        let proximal = joints.proximal.lookup(landmarks)?;
        let vertex = joints.vertex.lookup(landmarks)?;
        let distal = joints.distal.lookup(landmarks)?;

        Some(Self::new(
            proximal.position(),
            vertex.position(),
            distal.position(),
            [proximal.visibility, vertex.visibility, distal.visibility],
        ))
    }

    /// A sample is usable only if every point clears the threshold
    pub fn is_usable(&self, threshold: f32) -> bool {
        self.visibility.iter().all(|v| *v > threshold)
    }
}
