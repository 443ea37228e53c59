use anyhow::Result;
use clap::Args;

use super::AnalysisOptions;

#[derive(Args)]
pub struct RangesCommand {
    #[command(flatten)]
    options: AnalysisOptions,
}

impl RangesCommand {
    pub async fn execute(self) -> Result<()> {
        let ranges = self.options.resolve()?.reference_ranges();
        print!("{}", ranges.to_toml_string()?);
        Ok(())
    }
}
