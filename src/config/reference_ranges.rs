use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const HIP_SHOULDER_SEPARATION: &str = "hip_shoulder_separation_3d";
pub const SPINE_TILT: &str = "spine_tilt_deg";
pub const STANCE_WIDTH: &str = "stance_width_m";

/// Acceptable `[min, max]` band for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_below(&self, value: f64) -> bool {
        value < self.min
    }

    pub fn is_above(&self, value: f64) -> bool {
        value > self.max
    }
}

impl From<[f64; 2]> for MetricRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<MetricRange> for [f64; 2] {
    fn from(range: MetricRange) -> Self {
        [range.min, range.max]
    }
}

/// Biomechanical reference ranges keyed by metric name.
///
/// Read once at startup and shared read-only between analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceRanges {
    ranges: BTreeMap<String, MetricRange>,
}

const DEFAULT_RANGES: [(&str, MetricRange); 13] = [
    (HIP_SHOULDER_SEPARATION, MetricRange::new(0.15, 0.35)),
    ("pelvis_rotation_deg", MetricRange::new(40.0, 60.0)),
    ("shoulder_rotation_deg", MetricRange::new(90.0, 120.0)),
    ("bat_speed_mph", MetricRange::new(75.0, 95.0)),
    ("stride_timing_ms", MetricRange::new(150.0, 200.0)),
    ("knee_angle_deg", MetricRange::new(140.0, 170.0)),
    ("elbow_angle_deg", MetricRange::new(90.0, 140.0)),
    ("wrist_snap_timing_ms", MetricRange::new(50.0, 100.0)),
    ("weight_transfer_ratio", MetricRange::new(0.6, 0.8)),
    ("hip_lead_time_ms", MetricRange::new(30.0, 80.0)),
    ("launch_angle_deg", MetricRange::new(10.0, 30.0)),
    (SPINE_TILT, MetricRange::new(10.0, 25.0)),
    (STANCE_WIDTH, MetricRange::new(0.3, 0.8)),
];

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_RANGES
                .iter()
                .map(|(name, range)| (name.to_string(), *range))
                .collect(),
        }
    }
}

impl ReferenceRanges {
    /// Load overrides from `path`, falling back to the built-in defaults.
    ///
    /// Never fails: an unreadable or unparseable file leaves the defaults in
    /// place and is reported as a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No reference range file configured, using defaults");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(ranges) => {
                tracing::info!("Loaded reference ranges from {:?}", path);
                ranges
            }
            Err(e) => {
                tracing::warn!("Using default reference ranges: {:#}", e);
                Self::default()
            }
        }
    }

    /// Strictly read a JSON (`.json`) or TOML file and merge it over the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference range file {:?}", path))?;

        let overrides: BTreeMap<String, MetricRange> = match path
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) if ext.eq_ignore_ascii_case("json") => serde_json::from_str(&contents)
                .context("Failed to parse reference range JSON")?,
            _ => toml::from_str(&contents).context("Failed to parse reference range TOML")?,
        };

        let mut ranges = Self::default();
        ranges.merge(overrides);
        Ok(ranges)
    }

    /// Apply overrides key by key; invalid bands keep the previous value
    pub fn merge(&mut self, overrides: BTreeMap<String, MetricRange>) {
        for (name, range) in overrides {
            if range.is_valid() {
                self.ranges.insert(name, range);
            } else {
                tracing::warn!(
                    "Ignoring invalid reference range for {}: [{}, {}]",
                    name,
                    range.min,
                    range.max
                );
            }
        }
    }

    pub fn get(&self, metric: &str) -> Option<MetricRange> {
        self.ranges.get(metric).copied()
    }

    /// Range for a metric the built-in table always provides
    pub fn get_or_default(&self, metric: &str) -> MetricRange {
        self.get(metric).unwrap_or_else(|| {
            DEFAULT_RANGES
                .iter()
                .find(|(name, _)| *name == metric)
                .map(|(_, range)| *range)
                .unwrap_or(MetricRange::new(f64::NEG_INFINITY, f64::INFINITY))
        })
    }

    pub fn hip_shoulder_separation(&self) -> MetricRange {
        self.get_or_default(HIP_SHOULDER_SEPARATION)
    }

    pub fn spine_tilt(&self) -> MetricRange {
        self.get_or_default(SPINE_TILT)
    }

    pub fn stance_width(&self) -> MetricRange {
        self.get_or_default(STANCE_WIDTH)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricRange)> + '_ {
        self.ranges.iter().map(|(name, range)| (name.as_str(), *range))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize reference ranges")
    }
}
