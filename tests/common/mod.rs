#![allow(dead_code)]

// Shared fixtures for integration tests

use formcheck::models::{JointTriple, Landmark, POSE_LANDMARK_COUNT};
use formcheck::services::PoseFrame;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("formcheck=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Landmark frame with every point visible and `joints` bent to `angle` degrees
pub fn frame_at_angle(index: u64, joints: JointTriple, angle: f32) -> PoseFrame {
    PoseFrame::detected(index, landmarks_at_angle(joints, angle, 0.9))
}

/// Same geometry, but the vertex landmark is barely visible
pub fn occluded_frame(index: u64, joints: JointTriple, angle: f32) -> PoseFrame {
    let mut landmarks = landmarks_at_angle(joints, angle, 0.9);
    landmarks[joints.vertex.index()].visibility = 0.1;
    PoseFrame::detected(index, landmarks)
}

pub fn landmarks_at_angle(joints: JointTriple, angle: f32, visibility: f32) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, visibility); POSE_LANDMARK_COUNT];

    // Vertex at the center, proximal segment pointing along -x
    let (vx, vy) = (0.5_f32, 0.5_f32);
    let distal_direction = (angle - 180.0).to_radians();

    landmarks[joints.proximal.index()] = Landmark::new(vx - 0.2, vy, visibility);
    landmarks[joints.vertex.index()] = Landmark::new(vx, vy, visibility);
    landmarks[joints.distal.index()] = Landmark::new(
        vx + 0.2 * distal_direction.cos(),
        vy + 0.2 * distal_direction.sin(),
        visibility,
    );

    landmarks
}

/// One frame per angle; `None` becomes an occluded frame
pub fn frames_for(joints: JointTriple, angles: &[Option<f32>]) -> Vec<PoseFrame> {
    angles
        .iter()
        .enumerate()
        .map(|(i, angle)| match angle {
            Some(angle) => frame_at_angle(i as u64, joints, *angle),
            None => occluded_frame(i as u64, joints, 170.0),
        })
        .collect()
}

/// Write frames as a JSON Lines recording
pub fn write_recording(frames: &[PoseFrame]) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("Failed to create recording");
    for frame in frames {
        let line = serde_json::to_string(frame).expect("Failed to serialize frame");
        writeln!(file, "{}", line).expect("Failed to write frame");
    }
    file
}
