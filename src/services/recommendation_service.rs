/// Coaching recommendations for detected swing issues
///
/// Every issue carries a [`RecommendationKey`]; the key selects a fixed
/// drill/exercise bundle. Issues keyed `General` get a generic bundle that
/// names the issue in its technical focus.

use crate::models::{FeedbackItem, Issue, Recommendation, RecommendationKey};

struct Bundle {
    category: &'static str,
    drills: [&'static str; 4],
    exercises: [&'static str; 4],
    technical_focus: &'static str,
}

impl Bundle {
    fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            category: self.category.to_string(),
            drills: self.drills.iter().map(|s| s.to_string()).collect(),
            exercises: self.exercises.iter().map(|s| s.to_string()).collect(),
            technical_focus: self.technical_focus.to_string(),
        }
    }
}

const TORSO_COIL: Bundle = Bundle {
    category: "Kinematic Sequence",
    drills: [
        "3D separation drill with resistance bands",
        "Hip turn with shoulder restraint drill",
        "Mirror work focusing on torso coil",
        "Medicine ball rotational throws",
    ],
    exercises: [
        "Seated Russian twists",
        "Cable wood chops",
        "Thoracic spine mobility work",
        "Hip flexor stretches",
    ],
    technical_focus: "Work on creating proper torso coil by leading with hips while keeping shoulders closed",
};

const GROUND_UP_SEQUENCING: Bundle = Bundle {
    category: "Power Generation",
    drills: [
        "Hip-first initiation drill",
        "Pause swing with hip emphasis",
        "Towel drill for sequence timing",
        "Step and swing coordination",
    ],
    exercises: [
        "Hip abductor strengthening",
        "Glute activation exercises",
        "Core rotational power training",
        "Balance and proprioception work",
    ],
    technical_focus: "Practice initiating movement from the ground up - hips lead, shoulders follow",
};

const SPINE_ANGLE: Bundle = Bundle {
    category: "Posture & Setup",
    drills: [
        "Spine angle awareness drill",
        "Posture mirror work",
        "Athletic position holds",
        "Tilt and turn combination drill",
    ],
    exercises: [
        "Thoracic extension exercises",
        "Hip hinge movement patterns",
        "Posterior chain strengthening",
        "Core stability training",
    ],
    technical_focus: "Maintain proper spine tilt throughout the swing for optimal launch angle",
};

const STABLE_BASE: Bundle = Bundle {
    category: "Setup & Balance",
    drills: [
        "Stance width marker drill",
        "Wide stance batting practice",
        "Balance challenge drills",
        "Stability progression training",
    ],
    exercises: [
        "Single-leg balance exercises",
        "Lateral strength training",
        "Hip abductor strengthening",
        "Ankle stability work",
    ],
    technical_focus: "Establish a stable, athletic base with proper foot placement for balance and power",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationService;

impl RecommendationService {
    pub fn new() -> Self {
        Self
    }

    /// One recommendation per issue, in issue order
    pub fn recommend(&self, issues: &[Issue]) -> Vec<Recommendation> {
        issues.iter().map(|issue| self.recommendation_for(issue)).collect()
    }

    pub fn recommendation_for(&self, issue: &Issue) -> Recommendation {
        let bundle = match issue.recommendation_key() {
            RecommendationKey::TorsoCoil => &TORSO_COIL,
            RecommendationKey::GroundUpSequencing => &GROUND_UP_SEQUENCING,
            RecommendationKey::SpineAngle => &SPINE_ANGLE,
            RecommendationKey::StableBase => &STABLE_BASE,
            RecommendationKey::General => return general_recommendation(issue),
        };

        bundle.to_recommendation()
    }

    /// Pair each issue with its recommendation for athlete-facing output
    pub fn feedback(&self, issues: &[Issue], recommendations: &[Recommendation]) -> Vec<FeedbackItem> {
        issues
            .iter()
            .zip(recommendations)
            .map(|(issue, recommendation)| FeedbackItem::new(issue, recommendation))
            .collect()
    }
}

fn general_recommendation(issue: &Issue) -> Recommendation {
    Recommendation {
        category: "General Improvement".to_string(),
        drills: vec![
            "Video analysis and feedback".to_string(),
            "Slow motion practice".to_string(),
        ],
        exercises: vec!["General strength and conditioning".to_string()],
        technical_focus: format!("Address: {}", issue.description()),
    }
}
