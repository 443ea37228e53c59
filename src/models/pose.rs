/// Pose sequence models
///
/// This module provides the 3D landmark representation produced by the pose
/// detector, the per-frame and whole-swing containers, and the JSON loading
/// and validation that guards the analysis engine's input contract.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

use crate::error::{AnalysisError, AnalysisResult};

/// Frame rate assumed when neither the caller nor the input says otherwise
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// MediaPipe pose landmark names (33 landmarks, world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl JointName {
    /// Get landmark name as emitted by the pose detector
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

    /// MediaPipe landmark index
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// All landmarks in detector order
    pub fn all() -> [Self; 33] {
        [
            Self::Nose,
            Self::LeftEyeInner,
            Self::LeftEye,
            Self::LeftEyeOuter,
            Self::RightEyeInner,
            Self::RightEye,
            Self::RightEyeOuter,
            Self::LeftEar,
            Self::RightEar,
            Self::MouthLeft,
            Self::MouthRight,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftPinky,
            Self::RightPinky,
            Self::LeftIndex,
            Self::RightIndex,
            Self::LeftThumb,
            Self::RightThumb,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
            Self::LeftHeel,
            Self::RightHeel,
            Self::LeftFootIndex,
            Self::RightFootIndex,
        ]
    }
}

impl std::fmt::Display for JointName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A point in world coordinates (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn sub(&self, other: &Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Scale every component by `factor`
    pub fn scale(&self, factor: f64) -> Point3 {
        Point3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn midpoint(&self, other: &Point3) -> Point3 {
        Point3::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    /// Calculate Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3) -> f64 {
        self.sub(other).magnitude()
    }
}

/// One tracked joint in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub joint_name: JointName,
    /// Detector index, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_id: Option<u32>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Detection visibility (0-1)
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    /// Create a new landmark
    pub fn new(joint_name: JointName, x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            joint_name,
            joint_id: Some(joint_name.index() as u32),
            x,
            y,
            z,
            visibility,
        }
    }

    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Pose observations for a single video frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Zero-based frame number in the source video
    #[serde(rename = "frame", alias = "frame_index")]
    pub frame_index: u64,
    /// Seconds from the start of the video
    pub timestamp: f64,
    #[serde(rename = "landmarks_3d", alias = "landmarks")]
    pub landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Create a new pose frame
    pub fn new(frame_index: u64, timestamp: f64, landmarks: Vec<Landmark>) -> Self {
        Self {
            frame_index,
            timestamp,
            landmarks,
        }
    }

    /// Get landmark by joint
    pub fn landmark(&self, joint: JointName) -> Option<&Landmark> {
        self.landmarks.iter().find(|lm| lm.joint_name == joint)
    }

    /// Position of a joint, if it was detected in this frame
    pub fn position(&self, joint: JointName) -> Option<Point3> {
        self.landmark(joint).map(Landmark::position)
    }

    /// Check if all required joints were detected
    pub fn has_joints(&self, joints: &[JointName]) -> bool {
        joints.iter().all(|joint| self.landmark(*joint).is_some())
    }
}

/// Source video properties recorded by the pose detector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_info: Option<VideoInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
}

/// One swing attempt: ordered frames plus optional detector metadata.
///
/// Older callers wrote the frame list under `poses`, newer ones under
/// `pose_sequence`; both deserialize into [`PoseSequence::frames`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SequenceMetadata>,
    #[serde(rename = "pose_sequence", alias = "poses")]
    pub frames: Vec<PoseFrame>,
}

impl PoseSequence {
    pub fn new(frames: Vec<PoseFrame>) -> Self {
        Self {
            metadata: None,
            frames,
        }
    }

    /// Attach the source video's frame rate
    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        let metadata = self.metadata.get_or_insert_with(SequenceMetadata::default);
        metadata.video_info.get_or_insert_with(VideoInfo::default).fps = Some(fps);
        self
    }

    /// Parse and validate a serialized sequence
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let sequence: PoseSequence = serde_json::from_str(json)?;
        sequence.validate()?;
        Ok(sequence)
    }

    /// Parse and validate a serialized sequence from a reader.
    ///
    /// A failing reader surfaces as [`AnalysisError::Io`], not as malformed
    /// input.
    pub fn from_reader<R: Read>(reader: R) -> AnalysisResult<Self> {
        let sequence: PoseSequence = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                AnalysisError::Io(e.into())
            } else {
                AnalysisError::MalformedInput(e)
            }
        })?;
        sequence.validate()?;
        Ok(sequence)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Check the structural invariants the analyzers rely on
    pub fn validate(&self) -> AnalysisResult<()> {
        let mut previous_index: Option<u64> = None;

        for frame in &self.frames {
            if let Some(previous) = previous_index {
                if frame.frame_index <= previous {
                    return Err(AnalysisError::InvalidSequence(format!(
                        "frame index {} does not follow {}",
                        frame.frame_index, previous
                    )));
                }
            }
            previous_index = Some(frame.frame_index);

            if !frame.timestamp.is_finite() {
                return Err(AnalysisError::InvalidSequence(format!(
                    "frame {} has a non-finite timestamp",
                    frame.frame_index
                )));
            }

            let mut seen = HashSet::with_capacity(frame.landmarks.len());
            for landmark in &frame.landmarks {
                if !seen.insert(landmark.joint_name) {
                    return Err(AnalysisError::InvalidSequence(format!(
                        "frame {} lists {} more than once",
                        frame.frame_index, landmark.joint_name
                    )));
                }
                if !(landmark.x.is_finite() && landmark.y.is_finite() && landmark.z.is_finite()) {
                    return Err(AnalysisError::InvalidSequence(format!(
                        "frame {} has non-finite coordinates for {}",
                        frame.frame_index, landmark.joint_name
                    )));
                }
                if !(0.0..=1.0).contains(&landmark.visibility) {
                    return Err(AnalysisError::InvalidSequence(format!(
                        "frame {} has visibility {} for {}",
                        frame.frame_index, landmark.visibility, landmark.joint_name
                    )));
                }
            }
        }

        if let Some(fps) = self.recorded_frame_rate() {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(AnalysisError::InvalidSequence(format!(
                    "recorded frame rate {} is not positive",
                    fps
                )));
            }
        }

        Ok(())
    }

    /// Frame rate stored by the pose detector, if any
    pub fn recorded_frame_rate(&self) -> Option<f64> {
        self.metadata
            .as_ref()
            .and_then(|m| m.video_info.as_ref())
            .and_then(|v| v.fps)
    }

    /// Median frame-index step between consecutive samples.
    ///
    /// A detector that skips frames writes `frame` 0, 2, 4, ... and still
    /// records the source video fps.
    pub fn frame_step(&self) -> Option<u64> {
        let mut steps: Vec<u64> = self
            .frames
            .windows(2)
            .map(|pair| pair[1].frame_index.saturating_sub(pair[0].frame_index))
            .filter(|step| *step > 0)
            .collect();
        if steps.is_empty() {
            return None;
        }

        steps.sort_unstable();
        Some(steps[steps.len() / 2])
    }

    /// Sampling rate implied by the recorded video fps and the frame step
    pub fn recorded_sampling_rate(&self) -> Option<f64> {
        let fps = self.recorded_frame_rate()?;
        let step = self.frame_step().unwrap_or(1);
        Some(fps / step as f64)
    }

    /// Sampling rate implied by the first and last timestamps.
    ///
    /// Counts samples, not frame indices, since differentiation runs over
    /// consecutive samples. Rounded to 1e-3 fps to absorb timestamp float
    /// noise.
    pub fn timestamp_frame_rate(&self) -> Option<f64> {
        let first = self.frames.first()?;
        let last = self.frames.last()?;
        let elapsed = last.timestamp - first.timestamp;
        let intervals = self.frames.len() - 1;

        if intervals == 0 || elapsed <= 0.0 {
            return None;
        }

        let fps = intervals as f64 / elapsed;
        Some((fps * 1000.0).round() / 1000.0)
    }

    /// Resolve the sampling rate: explicit override, detector metadata
    /// (divided by the frame step), timestamps, then [`DEFAULT_FRAME_RATE`].
    ///
    /// Non-positive or non-finite candidates are skipped.
    pub fn frame_rate(&self, override_fps: Option<f64>) -> f64 {
        override_fps
            .filter(|fps| is_usable_rate(*fps))
            .or_else(|| self.recorded_sampling_rate().filter(|fps| is_usable_rate(*fps)))
            .or_else(|| self.timestamp_frame_rate().filter(|fps| is_usable_rate(*fps)))
            .unwrap_or(DEFAULT_FRAME_RATE)
    }
}

fn is_usable_rate(fps: f64) -> bool {
    fps.is_finite() && fps > 0.0
}
