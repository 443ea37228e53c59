use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::{write_json, AnalysisOptions};
use crate::services::{SwingAnalysisService, SyntheticSwing};

#[derive(Args)]
pub struct DemoCommand {
    /// Number of frames to generate
    #[arg(long, default_value = "60")]
    frames: usize,

    /// Also save the generated pose sequence as JSON
    #[arg(long, value_name = "PATH")]
    write_pose: Option<PathBuf>,

    #[command(flatten)]
    options: AnalysisOptions,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

impl DemoCommand {
    pub async fn execute(self) -> Result<()> {
        let sequence = SyntheticSwing::new().with_frames(self.frames).generate();

        if let Some(path) = &self.write_pose {
            let json = serde_json::to_string_pretty(&sequence)?;
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Synthetic pose sequence written to {}", path.display());
        }

        let config = self.options.resolve()?;
        let report = SwingAnalysisService::from_config(&config).analyze(&sequence);

        write_json(&report, self.output.as_deref(), self.compact)
    }
}
