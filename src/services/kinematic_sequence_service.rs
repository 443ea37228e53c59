/// Kinematic sequence analysis: do the hips start rotating before the shoulders?

use tracing::debug;

use crate::models::{EnergyTransfer, KinematicSequenceResult, PoseSequence};
use crate::services::kinematics::{self, DifferentialKinematics, Segment};

/// Efficiency points per frame of hip lead
const EFFICIENCY_PER_LEAD_FRAME: f64 = 10.0;
/// Initiation threshold in standard deviations of the rotation change
const INITIATION_SIGMA: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicSequenceAnalyzer;

impl KinematicSequenceAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compare hip-line and shoulder-line rotation initiation
    pub fn analyze(
        &self,
        sequence: &PoseSequence,
        kinematics: &DifferentialKinematics,
    ) -> KinematicSequenceResult {
        let hip_rotation = kinematics::segment_rotation(sequence, Segment::Hips);
        let shoulder_rotation = kinematics::segment_rotation(sequence, Segment::Shoulders);

        let hip_changes = angular_differences(&hip_rotation);
        let shoulder_changes = angular_differences(&shoulder_rotation);

        let mut result = KinematicSequenceResult {
            hip_peak_velocity: peak_angular_velocity(&hip_changes, kinematics),
            shoulder_peak_velocity: peak_angular_velocity(&shoulder_changes, kinematics),
            ..KinematicSequenceResult::default()
        };

        let (Some(hip_start), Some(shoulder_start)) = (
            initiation_index(&hip_changes),
            initiation_index(&shoulder_changes),
        ) else {
            debug!(
                "Rotation initiation undetermined ({} hip, {} shoulder samples)",
                hip_rotation.len(),
                shoulder_rotation.len()
            );
            return result;
        };

        let lead_time = shoulder_start as i64 - hip_start as i64;
        let (efficiency, energy_transfer) = rate_transfer(lead_time);

        debug!(
            "Hips initiate at {}, shoulders at {}: {}",
            hip_start, shoulder_start, energy_transfer
        );

        result.hip_initiation_time = Some(hip_start);
        result.shoulder_initiation_time = Some(shoulder_start);
        result.lead_time = Some(lead_time);
        result.sequence_efficiency = efficiency;
        result.energy_transfer = energy_transfer;
        result
    }
}

/// Frame-to-frame rotation change, wrapped into (-180, 180]
pub fn angular_differences(rotation: &[f64]) -> Vec<f64> {
    kinematics::first_differences(rotation)
        .into_iter()
        .map(|delta| {
            let wrapped = delta.rem_euclid(360.0);
            if wrapped > 180.0 {
                wrapped - 360.0
            } else {
                wrapped
            }
        })
        .collect()
}

/// First index whose change exceeds twice the series' standard deviation
pub fn initiation_index(changes: &[f64]) -> Option<usize> {
    let threshold = kinematics::population_std_dev(changes)? * INITIATION_SIGMA;
    changes.iter().position(|change| change.abs() > threshold)
}

/// Efficiency score and transfer rating for a hip lead measured in samples
pub fn rate_transfer(lead_time: i64) -> (f64, EnergyTransfer) {
    match lead_time {
        lead if lead >= 2 => (
            (lead as f64 * EFFICIENCY_PER_LEAD_FRAME).min(100.0),
            EnergyTransfer::Optimal,
        ),
        1 => (EFFICIENCY_PER_LEAD_FRAME, EnergyTransfer::Good),
        // simultaneous initiation: neither segment leads
        0 => (0.0, EnergyTransfer::Poor),
        _ => (0.0, EnergyTransfer::Reverse),
    }
}

fn peak_angular_velocity(changes: &[f64], kinematics: &DifferentialKinematics) -> f64 {
    changes
        .iter()
        .map(|change| change.abs() * kinematics.frame_rate())
        .fold(0.0, f64::max)
}
