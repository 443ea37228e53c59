/// Spatial Metrics Service
///
/// Per-frame geometric measures of the batter's posture:
/// - Hip-shoulder separation (3D distance between hip and shoulder midpoints)
/// - Spine tilt (angle between the hip-to-head vector and vertical)
/// - Stance width (horizontal ankle distance)
///
/// Each metric only needs its own landmarks; a frame missing them is left
/// out of that metric's series and nothing else.

use crate::models::{JointName, MetricSummary, PoseFrame, PoseSequence, SpatialMetrics};
use crate::services::kinematics;

const SEPARATION_JOINTS: [JointName; 4] = [
    JointName::LeftHip,
    JointName::RightHip,
    JointName::LeftShoulder,
    JointName::RightShoulder,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialMetricsAnalyzer;

impl SpatialMetricsAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Measure every frame of the sequence
    pub fn analyze(&self, sequence: &PoseSequence) -> SpatialMetrics {
        let mut metrics = SpatialMetrics::default();

        for frame in &sequence.frames {
            if let Some(separation) = hip_shoulder_separation(frame) {
                metrics.hip_shoulder_separation.push(separation);
            }
            if let Some(tilt) = spine_tilt(frame) {
                metrics.spine_tilt.push(tilt);
            }
            if let Some(width) = stance_width(frame) {
                metrics.stance_width.push(width);
            }
        }

        metrics
    }

    /// Mean of each series
    pub fn summarize(&self, metrics: &SpatialMetrics) -> MetricSummary {
        MetricSummary {
            mean_hip_shoulder_separation: kinematics::mean(&metrics.hip_shoulder_separation),
            mean_spine_tilt: kinematics::mean(&metrics.spine_tilt),
            mean_stance_width: kinematics::mean(&metrics.stance_width),
        }
    }
}

/// Distance between the hip midpoint and the shoulder midpoint (meters)
pub fn hip_shoulder_separation(frame: &PoseFrame) -> Option<f64> {
    if !frame.has_joints(&SEPARATION_JOINTS) {
        return None;
    }

    let hip_center = frame
        .position(JointName::LeftHip)?
        .midpoint(&frame.position(JointName::RightHip)?);
    let shoulder_center = frame
        .position(JointName::LeftShoulder)?
        .midpoint(&frame.position(JointName::RightShoulder)?);

    Some(hip_center.distance_to(&shoulder_center))
}

/// Angle of the hip-midpoint → head vector from the vertical (z) axis, in degrees.
///
/// A zero-length spine vector reports 0°.
pub fn spine_tilt(frame: &PoseFrame) -> Option<f64> {
    let head = frame.position(JointName::Nose)?;
    let hip_center = frame
        .position(JointName::LeftHip)?
        .midpoint(&frame.position(JointName::RightHip)?);

    let spine = head.sub(&hip_center);
    let magnitude = spine.magnitude();
    if magnitude == 0.0 {
        return Some(0.0);
    }

    let cos_angle = (spine.z / magnitude).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

/// Absolute x distance between the ankles (meters)
pub fn stance_width(frame: &PoseFrame) -> Option<f64> {
    let left = frame.landmark(JointName::LeftAnkle)?;
    let right = frame.landmark(JointName::RightAnkle)?;
    Some((left.x - right.x).abs())
}
