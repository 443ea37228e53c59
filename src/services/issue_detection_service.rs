/// Rule-based swing issue detection
///
/// Compares the mean of each spatial series against its reference range and
/// checks the kinematic-sequence rating. Rules run in a fixed order and an
/// empty series simply skips its rule.

use std::sync::Arc;

use crate::config::ReferenceRanges;
use crate::models::{EnergyTransfer, Issue, KinematicSequenceResult, MetricSummary};

#[derive(Debug, Clone)]
pub struct IssueDetector {
    ranges: Arc<ReferenceRanges>,
}

impl IssueDetector {
    pub fn new(ranges: Arc<ReferenceRanges>) -> Self {
        Self { ranges }
    }

    pub fn detect(
        &self,
        summary: &MetricSummary,
        kinematic: &KinematicSequenceResult,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        if let Some(separation) = summary.mean_hip_shoulder_separation {
            let range = self.ranges.hip_shoulder_separation();
            if range.is_below(separation) {
                issues.push(Issue::InsufficientHipShoulderSeparation);
            } else if range.is_above(separation) {
                issues.push(Issue::ExcessiveHipShoulderSeparation);
            }
        }

        match kinematic.energy_transfer {
            EnergyTransfer::Reverse => issues.push(Issue::ReverseKinematicSequence),
            EnergyTransfer::Poor => issues.push(Issue::PoorKinematicSequenceTiming),
            EnergyTransfer::Optimal | EnergyTransfer::Good | EnergyTransfer::Undetermined => {}
        }

        if let Some(tilt) = summary.mean_spine_tilt {
            let range = self.ranges.spine_tilt();
            if range.is_below(tilt) {
                issues.push(Issue::InsufficientSpineTilt);
            } else if range.is_above(tilt) {
                issues.push(Issue::ExcessiveSpineTilt);
            }
        }

        if let Some(width) = summary.mean_stance_width {
            let range = self.ranges.stance_width();
            if range.is_below(width) {
                issues.push(Issue::NarrowStance);
            } else if range.is_above(width) {
                issues.push(Issue::WideStance);
            }
        }

        if !issues.is_empty() {
            tracing::debug!("Detected {} swing issues", issues.len());
        }

        issues
    }
}

impl Default for IssueDetector {
    fn default() -> Self {
        Self::new(Arc::new(ReferenceRanges::default()))
    }
}
