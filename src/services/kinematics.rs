/// Trajectory extraction and differential kinematics
///
/// This module pulls per-joint position series and per-segment orientation
/// series out of a pose sequence and differentiates them:
/// - Joint trajectories (frames lacking the joint are skipped, never interpolated)
/// - Velocity and acceleration by fixed-interval finite differences
/// - Planar segment rotation (hip line, shoulder line)
/// - Series statistics shared by the analyzers

use statrs::statistics::Statistics;

use crate::config::BattingSide;
use crate::models::{JointName, Point3, PoseSequence};

/// Body segment whose line orientation is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Hips,
    Shoulders,
}

impl Segment {
    /// (left, right) landmarks spanning the segment
    pub fn landmarks(&self) -> (JointName, JointName) {
        match self {
            Segment::Hips => (JointName::LeftHip, JointName::RightHip),
            Segment::Shoulders => (JointName::LeftShoulder, JointName::RightShoulder),
        }
    }
}

/// Positions of one joint for every frame in which it was observed
pub fn joint_trajectory(sequence: &PoseSequence, joint: JointName) -> Vec<Point3> {
    sequence
        .frames
        .iter()
        .filter_map(|frame| frame.position(joint))
        .collect()
}

/// Trailing-hand wrist trajectory, falling back to the lead wrist.
///
/// Returns `None` when neither wrist appears anywhere in the sequence.
pub fn wrist_trajectory(
    sequence: &PoseSequence,
    batting_side: BattingSide,
) -> Option<(JointName, Vec<Point3>)> {
    [batting_side.trailing_wrist(), batting_side.lead_wrist()]
        .into_iter()
        .map(|joint| (joint, joint_trajectory(sequence, joint)))
        .find(|(_, trajectory)| !trajectory.is_empty())
}

/// Orientation of a segment's left-right line in the x-y plane, in degrees.
///
/// Frames missing either landmark are skipped.
pub fn segment_rotation(sequence: &PoseSequence, segment: Segment) -> Vec<f64> {
    let (left, right) = segment.landmarks();

    sequence
        .frames
        .iter()
        .filter_map(|frame| {
            let left = frame.position(left)?;
            let right = frame.position(right)?;
            Some((left.y - right.y).atan2(left.x - right.x).to_degrees())
        })
        .collect()
}

/// `series[i + 1] - series[i]`
pub fn first_differences(series: &[f64]) -> Vec<f64> {
    series.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Arithmetic mean, `None` for an empty series
pub fn mean(series: &[f64]) -> Option<f64> {
    if series.is_empty() {
        None
    } else {
        Some(series.iter().mean())
    }
}

/// Population standard deviation, `None` for an empty series
pub fn population_std_dev(series: &[f64]) -> Option<f64> {
    if series.is_empty() {
        None
    } else {
        Some(series.iter().population_std_dev())
    }
}

/// Index of the first maximum, `None` for an empty series
pub fn argmax(series: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in series.iter().enumerate() {
        match best {
            Some((_, current)) if *value <= current => {}
            _ => best = Some((idx, *value)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Finite-difference differentiation at a fixed frame interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialKinematics {
    frame_rate: f64,
}

impl DifferentialKinematics {
    /// Create a differentiator for samples taken at `frame_rate` Hz
    pub fn new(frame_rate: f64) -> Self {
        Self { frame_rate }
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Sampling interval in seconds
    pub fn dt(&self) -> f64 {
        1.0 / self.frame_rate
    }

    /// `(p[i] - p[i-1]) / dt`; one element shorter than the input
    pub fn velocity(&self, positions: &[Point3]) -> Vec<Point3> {
        self.differentiate(positions)
    }

    /// First difference of velocity under the same interval
    pub fn acceleration(&self, velocities: &[Point3]) -> Vec<Point3> {
        self.differentiate(velocities)
    }

    fn differentiate(&self, samples: &[Point3]) -> Vec<Point3> {
        let dt = self.dt();
        samples
            .windows(2)
            .map(|pair| pair[1].sub(&pair[0]).scale(1.0 / dt))
            .collect()
    }

    /// Per-sample vector magnitudes
    pub fn magnitudes(vectors: &[Point3]) -> Vec<f64> {
        vectors.iter().map(Point3::magnitude).collect()
    }

    /// Largest absolute per-sample change of a scalar series, as a rate
    pub fn peak_rate(&self, series: &[f64]) -> f64 {
        first_differences(series)
            .into_iter()
            .map(|delta| delta.abs() * self.frame_rate)
            .fold(0.0, f64::max)
    }
}
