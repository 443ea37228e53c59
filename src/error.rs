use thiserror::Error;

/// Failures that surface to the caller.
///
/// Missing joints, empty sequences and too-short trajectories are not errors;
/// the analyzers degrade to empty or zero-valued results instead. Only input
/// that breaks the pose-sequence contract ends up here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed pose data: {0}")]
    MalformedInput(#[from] serde_json::Error),
    #[error("Invalid pose sequence: {0}")]
    InvalidSequence(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
