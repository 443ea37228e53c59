/// Performance Scoring Service
///
/// Combines three sub-scores into a weighted overall score (0-100):
/// - Kinematic sequence (40%): fixed score per energy-transfer rating
/// - Spatial mechanics (40%): penalized per spatial issue
/// - Temporal efficiency (20%): distance of swing time from the 1.0-1.5s window

use crate::models::{EnergyTransfer, Issue, PerformanceScores, TemporalMetrics};

const KINEMATIC_WEIGHT: f64 = 0.4;
const SPATIAL_WEIGHT: f64 = 0.4;
const TEMPORAL_WEIGHT: f64 = 0.2;

/// Number of spatial checks the spatial score is spread over
const SPATIAL_CHECKS: f64 = 4.0;

const OPTIMAL_SWING_TIME: (f64, f64) = (1.0, 1.5);
const SWING_TIME_TARGET: f64 = 1.25;
const TEMPORAL_MAX: f64 = 90.0;
const TEMPORAL_PENALTY_PER_SECOND: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceScorer;

impl PerformanceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a swing.
    ///
    /// An empty sequence (`total_frames == 0`) scores zero across the board.
    pub fn score(
        &self,
        total_frames: usize,
        energy_transfer: EnergyTransfer,
        issues: &[Issue],
        temporal: &TemporalMetrics,
    ) -> PerformanceScores {
        if total_frames == 0 {
            return PerformanceScores::default();
        }

        let kinematic_sequence_score = kinematic_score(energy_transfer);
        let spatial_mechanics_score = spatial_score(issues);
        let temporal_efficiency_score = temporal_score(temporal.total_swing_time);

        let overall_score = (kinematic_sequence_score * KINEMATIC_WEIGHT
            + spatial_mechanics_score * SPATIAL_WEIGHT
            + temporal_efficiency_score * TEMPORAL_WEIGHT)
            .clamp(0.0, 100.0);

        PerformanceScores {
            kinematic_sequence_score,
            spatial_mechanics_score,
            temporal_efficiency_score,
            overall_score,
        }
    }
}

pub fn kinematic_score(energy_transfer: EnergyTransfer) -> f64 {
    match energy_transfer {
        EnergyTransfer::Optimal => 95.0,
        EnergyTransfer::Good => 80.0,
        EnergyTransfer::Poor => 60.0,
        EnergyTransfer::Reverse => 30.0,
        EnergyTransfer::Undetermined => 50.0,
    }
}

pub fn spatial_score(issues: &[Issue]) -> f64 {
    let spatial_issues = issues.iter().filter(|issue| issue.is_spatial()).count() as f64;
    (100.0 - spatial_issues / SPATIAL_CHECKS * 100.0).max(0.0)
}

pub fn temporal_score(total_swing_time: f64) -> f64 {
    let (min, max) = OPTIMAL_SWING_TIME;
    if (min..=max).contains(&total_swing_time) {
        TEMPORAL_MAX
    } else {
        (TEMPORAL_MAX - (total_swing_time - SWING_TIME_TARGET).abs() * TEMPORAL_PENALTY_PER_SECOND)
            .max(0.0)
    }
}
