// Swing analysis services

pub mod kinematics;
pub mod phase_segmentation;
pub mod kinematic_sequence_service;
pub mod spatial_metrics_service;
pub mod temporal_metrics_service;
pub mod issue_detection_service;
pub mod recommendation_service;
pub mod performance_scoring_service;
pub mod swing_analysis_service;
pub mod synthetic_swing;

pub use kinematics::DifferentialKinematics;
pub use phase_segmentation::{PhaseBoundaryDetector, VelocityPeakSegmenter};
pub use kinematic_sequence_service::KinematicSequenceAnalyzer;
pub use spatial_metrics_service::SpatialMetricsAnalyzer;
pub use temporal_metrics_service::TemporalMetricsAnalyzer;
pub use issue_detection_service::IssueDetector;
pub use recommendation_service::RecommendationService;
pub use performance_scoring_service::PerformanceScorer;
pub use swing_analysis_service::SwingAnalysisService;
pub use synthetic_swing::SyntheticSwing;
