// Compliance Lens Library - Feature Compliance Scoring Workflow
// This exposes the core components for testing and integration

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod history;
pub mod shutdown;
pub mod telemetry;

// Re-export key types for easy access
pub use analysis::{
    AnalysisDraft, AnalysisRequest, AnalysisResult, AnalysisSettings, AnalysisStage,
    AnalysisWorkflow, CancelHandle, Category, ComplianceStatus, ResultSink, RiskScore,
    RiskScorer, RunOutcome, RunPhase, RunSnapshot, ValidationError, WorkflowError,
};
pub use app::{AppError, AppState, View};
pub use crate::config::{config, ComplianceLensConfig};
pub use history::{AnalysisHistory, HistoryFilter, SharedHistory};
pub use shutdown::ShutdownCoordinator;
pub use telemetry::{generate_correlation_id, init_telemetry, shutdown_telemetry};
