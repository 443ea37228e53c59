/// Synthetic swing generator for demos and tests
///
/// Twelve upper/lower body joints sweep sideways and forward following
/// `sin(t·π)`; every other joint stays at (0, 0, 1).

use std::f64::consts::PI;

use crate::models::{JointName, Landmark, PoseFrame, PoseSequence, DEFAULT_FRAME_RATE};

const DEFAULT_FRAMES: usize = 60;
const VISIBILITY: f64 = 0.9;
const LATERAL_SWEEP: f64 = 0.3;
const FORWARD_SWEEP: f64 = 0.2;

/// Rest position of each animated joint (meters)
const BASE_POSITIONS: [(JointName, [f64; 3]); 12] = [
    (JointName::LeftShoulder, [0.2, 0.0, 1.4]),
    (JointName::RightShoulder, [-0.2, 0.0, 1.4]),
    (JointName::LeftElbow, [0.3, -0.1, 1.2]),
    (JointName::RightElbow, [-0.3, -0.1, 1.2]),
    (JointName::LeftWrist, [0.4, -0.2, 1.0]),
    (JointName::RightWrist, [-0.4, -0.2, 1.0]),
    (JointName::LeftHip, [0.1, 0.0, 0.9]),
    (JointName::RightHip, [-0.1, 0.0, 0.9]),
    (JointName::LeftKnee, [0.1, 0.0, 0.5]),
    (JointName::RightKnee, [-0.1, 0.0, 0.5]),
    (JointName::LeftAnkle, [0.1, 0.0, 0.1]),
    (JointName::RightAnkle, [-0.1, 0.0, 0.1]),
];

#[derive(Debug, Clone, Copy)]
pub struct SyntheticSwing {
    frames: usize,
    frame_rate: f64,
}

impl Default for SyntheticSwing {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl SyntheticSwing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frames(mut self, frames: usize) -> Self {
        self.frames = frames;
        self
    }

    /// Capture rate; also recorded in the sequence metadata
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn generate(&self) -> PoseSequence {
        let frames = (0..self.frames)
            .map(|index| self.frame(index))
            .collect();

        let sequence = PoseSequence::new(frames);
        if self.frame_rate == DEFAULT_FRAME_RATE {
            sequence
        } else {
            sequence.with_frame_rate(self.frame_rate)
        }
    }

    fn frame(&self, index: usize) -> PoseFrame {
        let timestamp = index as f64 / self.frame_rate;
        let swing = (timestamp * PI).sin();

        let landmarks = JointName::all()
            .into_iter()
            .map(|joint| match base_position(joint) {
                Some([x, y, z]) => Landmark::new(
                    joint,
                    x + LATERAL_SWEEP * swing,
                    y + FORWARD_SWEEP * swing,
                    z,
                    VISIBILITY,
                ),
                None => Landmark::new(joint, 0.0, 0.0, 1.0, VISIBILITY),
            })
            .collect();

        PoseFrame::new(index as u64, timestamp, landmarks)
    }
}

fn base_position(joint: JointName) -> Option<[f64; 3]> {
    BASE_POSITIONS
        .iter()
        .find(|(candidate, _)| *candidate == joint)
        .map(|(_, position)| *position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_swing_shape() {
        let sequence = SyntheticSwing::new().generate();

        assert_eq!(sequence.len(), 60);
        assert!(sequence.metadata.is_none());
        assert_eq!(sequence.frame_rate(None), 30.0);
        assert!(sequence.validate().is_ok());
        assert!(sequence.frames.iter().all(|f| f.landmarks.len() == 33));
    }

    #[test]
    fn test_joint_positions_follow_sine() {
        let sequence = SyntheticSwing::new().generate();
        // t = 0.5s: sin(π/2) = 1
        let frame = &sequence.frames[15];

        let wrist = frame.position(JointName::RightWrist).unwrap();
        assert!((wrist.x - -0.1).abs() < 1e-9);
        assert!((wrist.y - 0.0).abs() < 1e-9);
        assert_eq!(wrist.z, 1.0);

        let nose = frame.position(JointName::Nose).unwrap();
        assert_eq!((nose.x, nose.y, nose.z), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_custom_frame_rate_is_recorded() {
        let sequence = SyntheticSwing::new()
            .with_frames(120)
            .with_frame_rate(120.0)
            .generate();

        assert_eq!(sequence.recorded_frame_rate(), Some(120.0));
        assert!((sequence.frames[60].timestamp - 0.5).abs() < 1e-12);
    }
}
