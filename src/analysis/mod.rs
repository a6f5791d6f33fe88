// Feature compliance analysis - input collection, staged run, result synthesis
//
// The workflow is split so each piece is testable on its own: drafts validate
// into requests, the run tracker owns the stage state machine, the synthesizer
// turns a score into a result and the workflow ties them together on tokio.

pub mod draft;
pub mod error;
pub mod scoring;
pub mod state_machine;
pub mod synthesizer;
pub mod types;
pub mod workflow;

pub use draft::{sample, samples, AnalysisDraft, SampleFeature};
pub use error::{ValidationError, WorkflowError};
pub use scoring::{FixedScorer, RandomScorer, RiskScorer};
pub use state_machine::{RunEvent, RunPhase, RunTracker};
pub use synthesizer::ResultSynthesizer;
pub use types::{
    AnalysisMode, AnalysisRequest, AnalysisResult, AnalysisSettings, AnalysisStage, Category,
    ComplianceStatus, ConfidenceThreshold, RegionCode, RegulationCheck, RiskScore, Severity,
    KNOWN_REGIONS,
};
pub use workflow::{
    AnalysisWorkflow, CancelHandle, ResultSink, RunOutcome, RunSnapshot, DEFAULT_STAGE_DELAY,
};
