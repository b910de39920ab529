/// Pose estimator capability
///
/// The session never talks to a model or camera directly. It is handed a
/// `PoseEstimator` that is opened when counting starts and closed when it
/// stops, completes, or runs out of frames.
///
/// `RecordedPoseSource` replays JSON Lines recordings, one frame per line:
///
/// ```text
/// {"index": 0, "landmarks": [{"x": 0.41, "y": 0.32, "z": -0.1, "visibility": 0.98}, ...]}
/// {"index": 1, "landmarks": null}
/// ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::errors::PoseSourceError;
use crate::models::keypoint::Landmark;

/// Estimator output for one video frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub index: u64,
    /// `None` when no person was detected in the frame
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl PoseFrame {
    pub fn detected(index: u64, landmarks: Vec<Landmark>) -> Self {
        Self {
            index,
            landmarks: Some(landmarks),
        }
    }

    pub fn empty(index: u64) -> Self {
        Self {
            index,
            landmarks: None,
        }
    }
}

pub trait PoseEstimator {
    /// Acquire whatever the estimator needs (file, camera, model)
    fn open(&mut self) -> Result<(), PoseSourceError>;

    /// Next frame, or `Ok(None)` once the stream is exhausted
    fn estimate(&mut self) -> Result<Option<PoseFrame>, PoseSourceError>;

    /// Release resources. Must be safe to call more than once.
    fn close(&mut self);
}

/// Replays a JSON Lines pose recording
pub struct RecordedPoseSource {
    path: PathBuf,
    lines: Option<Lines<BufReader<File>>>,
    line_number: usize,
}

impl RecordedPoseSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lines: None,
            line_number: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.lines.is_some()
    }
}

impl PoseEstimator for RecordedPoseSource {
    fn open(&mut self) -> Result<(), PoseSourceError> {
        let file = File::open(&self.path).map_err(|source| PoseSourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!("Opened pose recording {:?}", self.path);
        self.lines = Some(BufReader::new(file).lines());
        self.line_number = 0;
        Ok(())
    }

    fn estimate(&mut self) -> Result<Option<PoseFrame>, PoseSourceError> {
        let lines = self.lines.as_mut().ok_or(PoseSourceError::NotOpen)?;

        for line in lines.by_ref() {
            self.line_number += 1;
            let line = line.map_err(|source| PoseSourceError::Io {
                path: self.path.clone(),
                source,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let frame: PoseFrame =
                serde_json::from_str(&line).map_err(|source| PoseSourceError::Parse {
                    line: self.line_number,
                    source,
                })?;
            return Ok(Some(frame));
        }

        Ok(None)
    }

    fn close(&mut self) {
        if self.lines.take().is_some() {
            tracing::debug!(
                lines_read = self.line_number,
                "Closed pose recording {:?}",
                self.path
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn recording(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_estimate_before_open() {
        let mut source = RecordedPoseSource::new("missing.jsonl");
        assert!(matches!(source.estimate(), Err(PoseSourceError::NotOpen)));
    }

    #[test]
    fn test_open_missing_file() {
        let mut source = RecordedPoseSource::new("/nonexistent/formcheck/recording.jsonl");
        assert!(matches!(source.open(), Err(PoseSourceError::Io { .. })));
    }

    #[test]
    fn test_reads_frames_and_skips_blank_lines() {
        let file = recording(
            "{\"index\": 0, \"landmarks\": [{\"x\": 0.1, \"y\": 0.2, \"visibility\": 0.9}]}\n\n{\"index\": 1, \"landmarks\": null}\n",
        );
        let mut source = RecordedPoseSource::new(file.path());
        source.open().unwrap();

        let first = source.estimate().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.landmarks.unwrap()[0], Landmark::new(0.1, 0.2, 0.9));

        let second = source.estimate().unwrap().unwrap();
        assert_eq!(second, PoseFrame::empty(1));

        assert!(source.estimate().unwrap().is_none());
        source.close();
        assert!(!source.is_open());
    }

    #[test]
    fn test_parse_error_reports_line() {
        let file = recording("{\"index\": 0}\n\nnot json\n");
        let mut source = RecordedPoseSource::new(file.path());
        source.open().unwrap();

        assert!(source.estimate().unwrap().is_some());
        match source.estimate() {
            Err(PoseSourceError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let file = recording("");
        let mut source = RecordedPoseSource::new(file.path());
        source.open().unwrap();
        source.close();
        source.close();
        assert!(matches!(source.estimate(), Err(PoseSourceError::NotOpen)));
    }
}
