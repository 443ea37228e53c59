//! Pose sequence builders shared by the integration tests

#![allow(dead_code)]

use swing_coach::models::{JointName, Landmark, PoseFrame, PoseSequence};

pub const FPS: f64 = 30.0;

/// Static body posture with optional hip/shoulder line rotation.
///
/// The defaults sit inside every default reference range.
#[derive(Debug, Clone, Copy)]
pub struct Posture {
    /// Vertical hip-midpoint to shoulder-midpoint distance (m)
    pub separation: f64,
    /// Forward lean of the hip-to-nose vector from vertical (degrees)
    pub spine_tilt: f64,
    /// Ankle distance along x (m)
    pub stance_width: f64,
    /// Hip line orientation in the x-y plane (degrees)
    pub hip_angle: f64,
    /// Shoulder line orientation in the x-y plane (degrees)
    pub shoulder_angle: f64,
}

impl Default for Posture {
    fn default() -> Self {
        Self {
            separation: 0.25,
            spine_tilt: 15.0,
            stance_width: 0.5,
            hip_angle: 0.0,
            shoulder_angle: 0.0,
        }
    }
}

impl Posture {
    pub fn frame(&self, index: usize) -> PoseFrame {
        const HIP_HEIGHT: f64 = 0.9;
        const SPINE_LENGTH: f64 = 0.8;

        let mut landmarks = Vec::new();
        landmarks.extend(line(
            JointName::LeftHip,
            JointName::RightHip,
            0.1,
            self.hip_angle,
            HIP_HEIGHT,
        ));
        landmarks.extend(line(
            JointName::LeftShoulder,
            JointName::RightShoulder,
            0.2,
            self.shoulder_angle,
            HIP_HEIGHT + self.separation,
        ));

        let (sin, cos) = self.spine_tilt.to_radians().sin_cos();
        landmarks.push(Landmark::new(
            JointName::Nose,
            0.0,
            SPINE_LENGTH * sin,
            HIP_HEIGHT + SPINE_LENGTH * cos,
            0.9,
        ));

        let half_stance = self.stance_width / 2.0;
        landmarks.push(Landmark::new(JointName::LeftAnkle, half_stance, 0.0, 0.1, 0.9));
        landmarks.push(Landmark::new(JointName::RightAnkle, -half_stance, 0.0, 0.1, 0.9));

        PoseFrame::new(index as u64, index as f64 / FPS, landmarks)
    }
}

fn line(left: JointName, right: JointName, half_width: f64, degrees: f64, z: f64) -> [Landmark; 2] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        Landmark::new(left, half_width * cos, half_width * sin, z, 0.9),
        Landmark::new(right, -half_width * cos, -half_width * sin, z, 0.9),
    ]
}

/// Every frame in the same posture
pub fn posture_sequence(frames: usize, posture: Posture) -> PoseSequence {
    PoseSequence::new((0..frames).map(|i| posture.frame(i)).collect())
}

/// Good posture; the hip and shoulder lines turn 30° after the given frames
pub fn stepped_rotation_sequence(frames: usize, hip_step: usize, shoulder_step: usize) -> PoseSequence {
    PoseSequence::new(
        (0..frames)
            .map(|i| {
                Posture {
                    hip_angle: if i > hip_step { 30.0 } else { 0.0 },
                    shoulder_angle: if i > shoulder_step { 30.0 } else { 0.0 },
                    ..Posture::default()
                }
                .frame(i)
            })
            .collect(),
    )
}
