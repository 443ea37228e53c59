use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::{write_json, AnalysisOptions};
use crate::models::PoseSequence;
use crate::services::SwingAnalysisService;

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Pose sequence JSON files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    #[command(flatten)]
    options: AnalysisOptions,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

impl AnalyzeCommand {
    pub async fn execute(self) -> Result<()> {
        let config = self.options.resolve()?;
        let service = SwingAnalysisService::from_config(&config);

        let mut sequences = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let sequence = PoseSequence::from_json_str(&json)
                .with_context(|| format!("Invalid pose data in {}", path.display()))?;
            info!("Loaded {} frames from {}", sequence.len(), path.display());
            sequences.push(sequence);
        }

        let mut reports = service.analyze_batch(sequences).await?;

        if reports.len() == 1 {
            let report = reports.remove(0);
            write_json(&report, self.output.as_deref(), self.compact)
        } else {
            write_json(&reports, self.output.as_deref(), self.compact)
        }
    }
}
