use thiserror::Error;

use super::state_machine::RunPhase;

/// Reasons a draft or user input cannot become an analysis request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Feature title is required")]
    MissingTitle,
    #[error("Feature description is required")]
    MissingDescription,
    #[error("Feature category is required")]
    MissingCategory,
    #[error("Confidence threshold {0} is outside 0-100")]
    ThresholdOutOfRange(u8),
    #[error("Risk score {0} is outside 0-100")]
    RiskScoreOutOfRange(u8),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Unknown analysis mode: {0}")]
    UnknownMode(String),
    #[error("No sample feature #{0}")]
    UnknownSample(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Analysis request rejected: {0}")]
    Rejected(#[from] ValidationError),
    #[error("An analysis run is already in progress")]
    AlreadyRunning,
    #[error("Analysis run left the running state unexpectedly: {0:?}")]
    Interrupted(RunPhase),
}
