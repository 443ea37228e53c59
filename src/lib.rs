// Library exports for Swing Coach
// The binary and the integration tests build on these modules

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{AnalysisConfig, BattingSide, MetricRange, ReferenceRanges};
pub use error::{AnalysisError, AnalysisResult};
pub use models::{PoseSequence, SwingAnalysisReport};
pub use services::SwingAnalysisService;
