mod analyze;
mod demo;
mod ranges;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{AnalysisConfig, BattingSide};

pub use analyze::AnalyzeCommand;
pub use demo::DemoCommand;
pub use ranges::RangesCommand;

#[derive(Parser)]
#[command(name = "swing-coach")]
#[command(about = "Baseball swing biomechanics analysis from 3D pose sequences", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more pose sequence files
    Analyze(AnalyzeCommand),

    /// Print the effective reference ranges as TOML
    Ranges(RangesCommand),

    /// Analyze a generated demonstration swing
    Demo(DemoCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        match self.command {
            Commands::Analyze(cmd) => cmd.execute().await,
            Commands::Ranges(cmd) => cmd.execute().await,
            Commands::Demo(cmd) => cmd.execute().await,
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Analysis options shared by the subcommands; unset flags fall back to the
/// environment
#[derive(clap::Args, Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Reference range override file (JSON or TOML)
    #[arg(long, value_name = "PATH")]
    reference_ranges: Option<PathBuf>,

    /// Frame rate of the pose data, overriding its metadata and timestamps
    #[arg(long, value_name = "FPS")]
    frame_rate: Option<f64>,

    /// Batting side of the hitter
    #[arg(long, value_enum)]
    batting_side: Option<BattingSide>,
}

impl AnalysisOptions {
    /// Environment configuration with command line overrides applied
    pub fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig::from_env()?;

        if let Some(path) = &self.reference_ranges {
            config.reference_ranges_path = Some(path.clone());
        }
        if let Some(fps) = self.frame_rate {
            anyhow::ensure!(
                fps.is_finite() && fps > 0.0,
                "Frame rate must be positive, got {}",
                fps
            );
            config.frame_rate = Some(fps);
        }
        if let Some(side) = self.batting_side {
            config.batting_side = side;
        }

        Ok(config)
    }
}

/// Write a value as JSON to a file, or to stdout when no path is given
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };

    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "swing-coach",
            "analyze",
            "a.json",
            "b.json",
            "--frame-rate",
            "120",
            "--batting-side",
            "left",
            "--compact",
        ])
        .unwrap();

        assert!(!cli.verbose());
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_options_reject_bad_frame_rate() {
        let options = AnalysisOptions {
            frame_rate: Some(0.0),
            ..AnalysisOptions::default()
        };
        assert!(options.resolve().is_err());
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json(&vec![1, 2, 3], Some(&path), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1,2,3]\n");
    }
}
