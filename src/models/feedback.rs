/// Detected swing issues and the coaching bundles attached to them

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Closed vocabulary of detectable swing faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Issue {
    InsufficientHipShoulderSeparation,
    ExcessiveHipShoulderSeparation,
    ReverseKinematicSequence,
    PoorKinematicSequenceTiming,
    InsufficientSpineTilt,
    ExcessiveSpineTilt,
    NarrowStance,
    WideStance,
}

/// Which coaching bundle addresses an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKey {
    TorsoCoil,
    GroundUpSequencing,
    SpineAngle,
    StableBase,
    General,
}

impl Issue {
    /// Stable machine-readable identifier
    pub fn code(&self) -> &'static str {
        match self {
            Issue::InsufficientHipShoulderSeparation => "insufficient_hip_shoulder_separation",
            Issue::ExcessiveHipShoulderSeparation => "excessive_hip_shoulder_separation",
            Issue::ReverseKinematicSequence => "reverse_kinematic_sequence",
            Issue::PoorKinematicSequenceTiming => "poor_kinematic_sequence_timing",
            Issue::InsufficientSpineTilt => "insufficient_spine_tilt",
            Issue::ExcessiveSpineTilt => "excessive_spine_tilt",
            Issue::NarrowStance => "narrow_stance",
            Issue::WideStance => "wide_stance",
        }
    }

    /// Athlete-facing description
    pub fn description(&self) -> &'static str {
        match self {
            Issue::InsufficientHipShoulderSeparation => "Insufficient 3D hip-shoulder separation",
            Issue::ExcessiveHipShoulderSeparation => "Excessive hip-shoulder separation",
            Issue::ReverseKinematicSequence => {
                "Reverse kinematic sequence - shoulders leading hips"
            }
            Issue::PoorKinematicSequenceTiming => "Poor kinematic sequence timing",
            Issue::InsufficientSpineTilt => "Insufficient spine tilt",
            Issue::ExcessiveSpineTilt => "Excessive spine tilt",
            Issue::NarrowStance => "Narrow stance detected",
            Issue::WideStance => "Overly wide stance",
        }
    }

    pub fn recommendation_key(&self) -> RecommendationKey {
        match self {
            Issue::InsufficientHipShoulderSeparation => RecommendationKey::TorsoCoil,
            Issue::ReverseKinematicSequence => RecommendationKey::GroundUpSequencing,
            Issue::InsufficientSpineTilt => RecommendationKey::SpineAngle,
            Issue::NarrowStance => RecommendationKey::StableBase,
            Issue::ExcessiveHipShoulderSeparation
            | Issue::PoorKinematicSequenceTiming
            | Issue::ExcessiveSpineTilt
            | Issue::WideStance => RecommendationKey::General,
        }
    }

    /// Separation, tilt and stance faults count against spatial mechanics
    pub fn is_spatial(&self) -> bool {
        !matches!(
            self,
            Issue::ReverseKinematicSequence | Issue::PoorKinematicSequenceTiming
        )
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Issue", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("description", self.description())?;
        state.end()
    }
}

/// Drills, exercises and a technical cue for one issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub drills: Vec<String>,
    pub exercises: Vec<String>,
    pub technical_focus: String,
}

/// Recommendation paired with the issue it answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub issue: String,
    pub category: String,
    pub drills: Vec<String>,
    pub exercises: Vec<String>,
    pub technical_focus: String,
}

impl FeedbackItem {
    pub fn new(issue: &Issue, recommendation: &Recommendation) -> Self {
        Self {
            issue: issue.description().to_string(),
            category: recommendation.category.clone(),
            drills: recommendation.drills.clone(),
            exercises: recommendation.exercises.clone(),
            technical_focus: recommendation.technical_focus.clone(),
        }
    }
}
