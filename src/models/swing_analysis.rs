use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::feedback::{FeedbackItem, Issue, Recommendation};

/// Named sub-intervals of a swing, in temporal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingPhase {
    Stance,
    Load,
    Stride,
    Swing,
    Contact,
    FollowThrough,
}

impl SwingPhase {
    pub fn all() -> [Self; 6] {
        [
            Self::Stance,
            Self::Load,
            Self::Stride,
            Self::Swing,
            Self::Contact,
            Self::FollowThrough,
        ]
    }
}

impl std::fmt::Display for SwingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwingPhase::Stance => write!(f, "stance"),
            SwingPhase::Load => write!(f, "load"),
            SwingPhase::Stride => write!(f, "stride"),
            SwingPhase::Swing => write!(f, "swing"),
            SwingPhase::Contact => write!(f, "contact"),
            SwingPhase::FollowThrough => write!(f, "follow_through"),
        }
    }
}

/// Half-open frame range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRange {
    pub start: usize,
    pub end: usize,
}

impl PhaseRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, frame: usize) -> bool {
        (self.start..self.end).contains(&frame)
    }
}

/// Phase map; empty when the phases could not be determined
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwingPhases(BTreeMap<SwingPhase, PhaseRange>);

impl SwingPhases {
    /// Phases unknown
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Build a phase map from the five interior boundaries.
    ///
    /// Boundaries are forced to be non-decreasing and capped at
    /// `total_frames`, so the resulting ranges always tile `[0, total_frames)`.
    pub fn from_boundaries(boundaries: [usize; 5], total_frames: usize) -> Self {
        let mut ranges = BTreeMap::new();
        let mut start = 0;

        for (phase, end) in SwingPhase::all().into_iter().zip(
            boundaries
                .into_iter()
                .chain(std::iter::once(total_frames)),
        ) {
            let end = end.clamp(start, total_frames);
            ranges.insert(phase, PhaseRange::new(start, end));
            start = end;
        }

        Self(ranges)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, phase: SwingPhase) -> Option<PhaseRange> {
        self.0.get(&phase).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SwingPhase, PhaseRange)> + '_ {
        self.0.iter().map(|(phase, range)| (*phase, *range))
    }

    /// Phase containing a frame
    pub fn phase_at(&self, frame: usize) -> Option<SwingPhase> {
        self.iter()
            .find(|(_, range)| range.contains(frame))
            .map(|(phase, _)| phase)
    }
}

/// Qualitative hips-to-shoulders energy transfer rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTransfer {
    Optimal,
    Good,
    Poor,
    Reverse,
    /// No rotation initiation could be detected for one of the segments
    Undetermined,
}

impl std::fmt::Display for EnergyTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnergyTransfer::Optimal => write!(f, "optimal"),
            EnergyTransfer::Good => write!(f, "good"),
            EnergyTransfer::Poor => write!(f, "poor"),
            EnergyTransfer::Reverse => write!(f, "reverse"),
            EnergyTransfer::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Hip/shoulder rotation timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicSequenceResult {
    /// Index into the hip rotation-change series where rotation initiates
    pub hip_initiation_time: Option<usize>,
    /// Index into the shoulder rotation-change series where rotation initiates
    pub shoulder_initiation_time: Option<usize>,
    /// `shoulder_initiation_time - hip_initiation_time`, in samples
    pub lead_time: Option<i64>,
    /// Peak hip-line angular velocity (deg/s)
    pub hip_peak_velocity: f64,
    /// Peak shoulder-line angular velocity (deg/s)
    pub shoulder_peak_velocity: f64,
    /// 0-100
    pub sequence_efficiency: f64,
    pub energy_transfer: EnergyTransfer,
}

impl Default for KinematicSequenceResult {
    fn default() -> Self {
        Self {
            hip_initiation_time: None,
            shoulder_initiation_time: None,
            lead_time: None,
            hip_peak_velocity: 0.0,
            shoulder_peak_velocity: 0.0,
            sequence_efficiency: 0.0,
            energy_transfer: EnergyTransfer::Undetermined,
        }
    }
}

/// Per-frame geometric series; a frame lacking the joints for a metric is
/// simply absent from that metric's series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialMetrics {
    /// Hip-midpoint to shoulder-midpoint distance (meters)
    pub hip_shoulder_separation: Vec<f64>,
    /// Hip-midpoint to head angle from vertical (degrees)
    pub spine_tilt: Vec<f64>,
    /// Horizontal ankle distance (meters)
    pub stance_width: Vec<f64>,
}

/// Means of the spatial series, absent when the series is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean_hip_shoulder_separation: Option<f64>,
    pub mean_spine_tilt: Option<f64>,
    pub mean_stance_width: Option<f64>,
}

/// Swing timing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalMetrics {
    /// Frame rate every duration below is based on
    pub frame_rate: f64,
    /// Seconds
    pub total_swing_time: f64,
    /// Seconds until peak wrist speed
    pub acceleration_phase_duration: f64,
    /// Seconds from peak wrist speed to the end
    pub deceleration_phase_duration: f64,
    /// m/s
    pub peak_wrist_speed: f64,
    /// m/s²
    pub peak_wrist_acceleration: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScores {
    pub kinematic_sequence_score: f64,
    pub spatial_mechanics_score: f64,
    pub temporal_efficiency_score: f64,
    pub overall_score: f64,
}

/// Complete swing analysis result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingAnalysisReport {
    pub total_frames: usize,
    pub frame_rate: f64,
    pub swing_phases: SwingPhases,
    pub kinematic_sequence: KinematicSequenceResult,
    pub spatial_analysis: SpatialMetrics,
    pub metric_summary: MetricSummary,
    pub temporal_analysis: TemporalMetrics,
    pub issues_detected: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    pub feedback: Vec<FeedbackItem>,
    pub performance_scores: PerformanceScores,
}
