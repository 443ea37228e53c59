/// Swing Analysis Service
///
/// Runs the full analysis over one pose sequence:
/// 1. Resolve the frame rate and build the differential kinematics
/// 2. Segment phases and analyze the kinematic sequence
/// 3. Measure spatial and temporal metrics
/// 4. Detect issues, attach recommendations and score the swing
///
/// The service owns no mutable state. One instance can analyze any number of
/// sequences, concurrently, against the same reference ranges.

use std::io::Read;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, BattingSide, ReferenceRanges};
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{PoseSequence, SwingAnalysisReport};
use crate::services::issue_detection_service::IssueDetector;
use crate::services::kinematic_sequence_service::KinematicSequenceAnalyzer;
use crate::services::kinematics::DifferentialKinematics;
use crate::services::performance_scoring_service::PerformanceScorer;
use crate::services::phase_segmentation::{PhaseBoundaryDetector, VelocityPeakSegmenter};
use crate::services::recommendation_service::RecommendationService;
use crate::services::spatial_metrics_service::SpatialMetricsAnalyzer;
use crate::services::temporal_metrics_service::TemporalMetricsAnalyzer;

#[derive(Clone)]
pub struct SwingAnalysisService {
    ranges: Arc<ReferenceRanges>,
    batting_side: BattingSide,
    frame_rate: Option<f64>,
    phase_detector: Arc<dyn PhaseBoundaryDetector>,
    issue_detector: IssueDetector,
    recommendations: RecommendationService,
    scorer: PerformanceScorer,
}

impl SwingAnalysisService {
    pub fn new(ranges: Arc<ReferenceRanges>) -> Self {
        let batting_side = BattingSide::default();
        Self {
            issue_detector: IssueDetector::new(ranges.clone()),
            ranges,
            batting_side,
            frame_rate: None,
            phase_detector: Arc::new(VelocityPeakSegmenter::new(batting_side)),
            recommendations: RecommendationService::new(),
            scorer: PerformanceScorer::new(),
        }
    }

    /// Build the service described by a configuration, loading its
    /// reference ranges
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let mut service = Self::new(Arc::new(config.reference_ranges()))
            .with_batting_side(config.batting_side);
        if let Some(fps) = config.frame_rate {
            service = service.with_frame_rate(fps);
        }
        service
    }

    /// Trailing-hand side. Also resets the phase detector to the
    /// velocity-peak segmenter for that side.
    pub fn with_batting_side(mut self, batting_side: BattingSide) -> Self {
        self.batting_side = batting_side;
        self.phase_detector = Arc::new(VelocityPeakSegmenter::new(batting_side));
        self
    }

    /// Frame rate that overrides whatever the pose data says.
    /// Non-positive or non-finite values are ignored.
    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        if fps.is_finite() && fps > 0.0 {
            self.frame_rate = Some(fps);
        } else {
            warn!("Ignoring invalid frame rate override {}", fps);
        }
        self
    }

    pub fn with_phase_detector(mut self, detector: Arc<dyn PhaseBoundaryDetector>) -> Self {
        self.phase_detector = detector;
        self
    }

    pub fn reference_ranges(&self) -> &ReferenceRanges {
        &self.ranges
    }

    pub fn batting_side(&self) -> BattingSide {
        self.batting_side
    }

    /// Analyze one swing. Missing joints and short or empty sequences
    /// degrade to empty or zero-valued parts of the report.
    pub fn analyze(&self, sequence: &PoseSequence) -> SwingAnalysisReport {
        let total_frames = sequence.len();
        let frame_rate = sequence.frame_rate(self.frame_rate);
        let kinematics = DifferentialKinematics::new(frame_rate);

        debug!(
            "Analyzing {} frames at {:.3} fps ({} batter)",
            total_frames, frame_rate, self.batting_side
        );

        let swing_phases = self.phase_detector.segment(sequence, &kinematics);
        let kinematic_sequence = KinematicSequenceAnalyzer::new().analyze(sequence, &kinematics);

        let spatial_analyzer = SpatialMetricsAnalyzer::new();
        let spatial_analysis = spatial_analyzer.analyze(sequence);
        let metric_summary = spatial_analyzer.summarize(&spatial_analysis);

        let temporal_analysis =
            TemporalMetricsAnalyzer::new(self.batting_side).analyze(sequence, &kinematics);

        let issues_detected = self.issue_detector.detect(&metric_summary, &kinematic_sequence);
        let recommendations = self.recommendations.recommend(&issues_detected);
        let feedback = self
            .recommendations
            .feedback(&issues_detected, &recommendations);

        let performance_scores = self.scorer.score(
            total_frames,
            kinematic_sequence.energy_transfer,
            &issues_detected,
            &temporal_analysis,
        );

        info!(
            "Swing analyzed: {} frames, {} transfer, {} issues, overall score {:.1}",
            total_frames,
            kinematic_sequence.energy_transfer,
            issues_detected.len(),
            performance_scores.overall_score
        );

        SwingAnalysisReport {
            total_frames,
            frame_rate,
            swing_phases,
            kinematic_sequence,
            spatial_analysis,
            metric_summary,
            temporal_analysis,
            issues_detected,
            recommendations,
            feedback,
            performance_scores,
        }
    }

    /// Parse, validate and analyze a serialized pose sequence
    pub fn analyze_json(&self, json: &str) -> AnalysisResult<SwingAnalysisReport> {
        let sequence = PoseSequence::from_json_str(json)?;
        Ok(self.analyze(&sequence))
    }

    /// Parse, validate and analyze a pose sequence read from `reader`
    pub fn analyze_reader<R: Read>(&self, reader: R) -> AnalysisResult<SwingAnalysisReport> {
        let sequence = PoseSequence::from_reader(reader)?;
        Ok(self.analyze(&sequence))
    }

    /// Analyze several sequences in parallel on the blocking thread pool.
    ///
    /// Reports come back in input order.
    pub async fn analyze_batch(
        &self,
        sequences: Vec<PoseSequence>,
    ) -> AnalysisResult<Vec<SwingAnalysisReport>> {
        info!("Analyzing batch of {} swings", sequences.len());

        let tasks = sequences.into_iter().map(|sequence| {
            let service = self.clone();
            tokio::task::spawn_blocking(move || service.analyze(&sequence))
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.map_err(AnalysisError::from))
            .collect()
    }
}

impl Default for SwingAnalysisService {
    fn default() -> Self {
        Self::new(Arc::new(ReferenceRanges::default()))
    }
}

impl std::fmt::Debug for SwingAnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwingAnalysisService")
            .field("ranges", &self.ranges.len())
            .field("batting_side", &self.batting_side)
            .field("frame_rate", &self.frame_rate)
            .finish_non_exhaustive()
    }
}
