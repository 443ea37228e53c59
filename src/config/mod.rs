pub mod reference_ranges;

pub use reference_ranges::{MetricRange, ReferenceRanges};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::JointName;

/// Batter handedness; decides which wrist is the trailing hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BattingSide {
    #[default]
    Right,
    Left,
}

impl BattingSide {
    /// Wrist of the top (trailing) hand on the bat
    pub fn trailing_wrist(&self) -> JointName {
        match self {
            BattingSide::Right => JointName::RightWrist,
            BattingSide::Left => JointName::LeftWrist,
        }
    }

    pub fn lead_wrist(&self) -> JointName {
        match self {
            BattingSide::Right => JointName::LeftWrist,
            BattingSide::Left => JointName::RightWrist,
        }
    }
}

impl FromStr for BattingSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" | "r" => Ok(BattingSide::Right),
            "left" | "l" => Ok(BattingSide::Left),
            other => anyhow::bail!("Unknown batting side: {}", other),
        }
    }
}

impl std::fmt::Display for BattingSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattingSide::Right => write!(f, "right"),
            BattingSide::Left => write!(f, "left"),
        }
    }
}

/// Analysis configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Reference range override file (JSON or TOML)
    pub reference_ranges_path: Option<PathBuf>,
    /// Frame rate override; otherwise taken from the pose data
    pub frame_rate: Option<f64>,
    pub batting_side: BattingSide,
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_ranges_path: None,
            frame_rate: None,
            batting_side: BattingSide::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let reference_ranges_path = env::var("SWING_REFERENCE_RANGES").ok().map(PathBuf::from);
        let frame_rate = env::var("SWING_FRAME_RATE")
            .ok()
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|fps| fps.is_finite() && *fps > 0.0);
        let batting_side = env::var("SWING_BATTING_SIDE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(AnalysisConfig {
            reference_ranges_path,
            frame_rate,
            batting_side,
            log_level,
        })
    }

    /// Load the reference ranges this configuration points at
    pub fn reference_ranges(&self) -> ReferenceRanges {
        ReferenceRanges::load(self.reference_ranges_path.as_deref())
    }
}
