/// Swing timing: total duration and the acceleration/deceleration split
/// around peak wrist speed

use tracing::debug;

use crate::config::BattingSide;
use crate::models::{PoseSequence, TemporalMetrics};
use crate::services::kinematics::{self, DifferentialKinematics};

#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalMetricsAnalyzer {
    batting_side: BattingSide,
}

impl TemporalMetricsAnalyzer {
    pub fn new(batting_side: BattingSide) -> Self {
        Self { batting_side }
    }

    pub fn analyze(
        &self,
        sequence: &PoseSequence,
        kinematics: &DifferentialKinematics,
    ) -> TemporalMetrics {
        let frame_rate = kinematics.frame_rate();
        let mut metrics = TemporalMetrics {
            frame_rate,
            total_swing_time: sequence.len() as f64 / frame_rate,
            ..TemporalMetrics::default()
        };

        let Some((wrist, positions)) = kinematics::wrist_trajectory(sequence, self.batting_side)
        else {
            return metrics;
        };

        let velocities = kinematics.velocity(&positions);
        let speeds = DifferentialKinematics::magnitudes(&velocities);
        let Some(peak_idx) = kinematics::argmax(&speeds) else {
            debug!("Single {} sample, no wrist speed", wrist);
            return metrics;
        };

        metrics.acceleration_phase_duration = peak_idx as f64 / frame_rate;
        metrics.deceleration_phase_duration = (speeds.len() - peak_idx) as f64 / frame_rate;
        metrics.peak_wrist_speed = speeds[peak_idx];
        metrics.peak_wrist_acceleration =
            DifferentialKinematics::magnitudes(&kinematics.acceleration(&velocities))
                .into_iter()
                .fold(0.0, f64::max);

        metrics
    }
}
