//! Timed analysis workflow.
//!
//! [`AnalysisWorkflow::submit`] drives a [`RunTracker`] through every
//! [`AnalysisStage`], sleeping a fixed delay at each one. After the last stage
//! it synthesizes a result and hands it to every registered [`ResultSink`].
//! Progress is published on a `watch` channel so a presentation layer can
//! follow along without polling the workflow itself.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn, Instrument};

use super::draft::AnalysisDraft;
use super::error::WorkflowError;
use super::scoring::{RandomScorer, RiskScorer};
use super::state_machine::{RunEvent, RunPhase, RunTracker};
use super::synthesizer::ResultSynthesizer;
use super::types::{AnalysisRequest, AnalysisResult, AnalysisSettings, AnalysisStage};
use crate::telemetry::{create_analysis_span, generate_correlation_id};

pub const DEFAULT_STAGE_DELAY: Duration = Duration::from_millis(1500);

/// Receives every completed result, exactly once per run
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn on_complete(&self, result: Arc<AnalysisResult>);
}

/// What a presentation layer can observe about the workflow
#[derive(Debug, Clone, Default)]
pub struct RunSnapshot {
    pub phase: RunPhase,
    pub last_result: Option<Arc<AnalysisResult>>,
}

impl RunSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn current_stage(&self) -> Option<AnalysisStage> {
        self.phase.stage()
    }
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(Arc<AnalysisResult>),
    Aborted { run_id: String, stage: AnalysisStage },
}

impl RunOutcome {
    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match self {
            RunOutcome::Completed(result) => Some(result),
            RunOutcome::Aborted { .. } => None,
        }
    }
}

/// Aborts the run that is in flight when [`CancelHandle::cancel`] is called
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<u64>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }
}

pub struct AnalysisWorkflow {
    tracker: Mutex<RunTracker>,
    synthesizer: ResultSynthesizer,
    stage_delay: Duration,
    sinks: RwLock<Vec<Arc<dyn ResultSink>>>,
    snapshot_tx: watch::Sender<RunSnapshot>,
    cancel_tx: Arc<watch::Sender<u64>>,
}

impl Default for AnalysisWorkflow {
    fn default() -> Self {
        Self::new(Arc::new(RandomScorer::new()), DEFAULT_STAGE_DELAY)
    }
}

impl AnalysisWorkflow {
    pub fn new(scorer: Arc<dyn RiskScorer>, stage_delay: Duration) -> Self {
        let (snapshot_tx, _) = watch::channel(RunSnapshot::default());
        let (cancel_tx, _) = watch::channel(0u64);
        Self {
            tracker: Mutex::new(RunTracker::new()),
            synthesizer: ResultSynthesizer::new(scorer),
            stage_delay,
            sinks: RwLock::new(Vec::new()),
            snapshot_tx,
            cancel_tx: Arc::new(cancel_tx),
        }
    }

    pub fn stage_delay(&self) -> Duration {
        self.stage_delay
    }

    pub async fn add_sink(&self, sink: Arc<dyn ResultSink>) {
        self.sinks.write().await.push(sink);
    }

    pub fn subscribe(&self) -> watch::Receiver<RunSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.snapshot_tx.borrow().is_running()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: Arc::clone(&self.cancel_tx),
        }
    }

    /// Validate the draft and run it. Rejected drafts leave the workflow idle.
    pub async fn submit_draft(&self, draft: &AnalysisDraft) -> Result<RunOutcome, WorkflowError> {
        let request = draft.to_request().inspect_err(|e| {
            warn!(reason = %e, "Analysis submission rejected");
        })?;
        self.submit(request, draft.settings()).await
    }

    pub async fn submit(
        &self,
        request: AnalysisRequest,
        settings: AnalysisSettings,
    ) -> Result<RunOutcome, WorkflowError> {
        let run_id = generate_correlation_id();
        let mut cancel_rx = self.cancel_tx.subscribe();

        {
            let mut tracker = self.lock_tracker();
            if tracker.is_running() {
                warn!(run_id = %run_id, "Analysis already in progress, rejecting submit");
                return Err(WorkflowError::AlreadyRunning);
            }
            let phase = tracker.handle(RunEvent::Submit {
                run_id: run_id.clone(),
            });
            self.publish_phase(phase);
        }
        // Only cancellations issued after this point apply to this run
        cancel_rx.mark_unchanged();
        let _guard = RunGuard {
            workflow: self,
            run_id: &run_id,
        };

        let span = create_analysis_span(&run_id, &request, &settings);
        self.run_stages(&run_id, &request, cancel_rx)
            .instrument(span)
            .await
    }

    /// Return a finished workflow to Idle. The last result stays observable.
    ///
    /// Submitting again works without this; it is for callers that want the
    /// presentation to drop back to the empty form.
    pub fn reset(&self) -> RunPhase {
        let mut tracker = self.lock_tracker();
        if !tracker.phase().is_terminal() {
            return tracker.phase();
        }
        let phase = tracker.handle(RunEvent::Reset);
        self.publish_phase(phase);
        phase
    }

    async fn run_stages(
        &self,
        run_id: &str,
        request: &AnalysisRequest,
        mut cancel_rx: watch::Receiver<u64>,
    ) -> Result<RunOutcome, WorkflowError> {
        info!(
            title = request.title(),
            category = %request.category(),
            regions = request.regions().len(),
            scorer = self.synthesizer.scorer_name(),
            "Starting compliance analysis"
        );

        let mut stage = AnalysisStage::ParsingDescription;
        let result = loop {
            info!(stage = stage.index(), label = stage.label(), "Analysis stage");

            let cancelled = tokio::select! {
                _ = tokio::time::sleep(self.stage_delay) => false,
                changed = cancel_rx.changed() => changed.is_ok(),
            };

            if cancelled {
                let phase = self.lock_tracker().handle(RunEvent::Abort);
                self.publish_phase(phase);
                return match phase {
                    RunPhase::Aborted { stage } => Ok(RunOutcome::Aborted {
                        run_id: run_id.to_string(),
                        stage,
                    }),
                    other => Err(WorkflowError::Interrupted(other)),
                };
            }

            if stage.is_last() {
                // Synthesized before leaving Running so Complete never lacks a result
                break Arc::new(self.synthesizer.synthesize(run_id, request).await);
            }

            match self.lock_tracker().handle(RunEvent::Advance) {
                phase @ RunPhase::Running { stage: next } => {
                    self.publish_phase(phase);
                    stage = next;
                }
                other => return Err(WorkflowError::Interrupted(other)),
            }
        };

        let phase = self.lock_tracker().handle(RunEvent::Advance);
        if phase != RunPhase::Complete {
            return Err(WorkflowError::Interrupted(phase));
        }
        info!(
            risk_score = result.risk_score.value(),
            status = %result.status,
            "Compliance analysis complete"
        );

        self.snapshot_tx.send_modify(|snapshot| {
            snapshot.phase = RunPhase::Complete;
            snapshot.last_result = Some(Arc::clone(&result));
        });

        for sink in self.sinks.read().await.iter() {
            sink.on_complete(Arc::clone(&result)).await;
        }

        Ok(RunOutcome::Completed(result))
    }

    fn lock_tracker(&self) -> MutexGuard<'_, RunTracker> {
        // Never held across an await; a poisoned lock still holds a valid state
        self.tracker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish_phase(&self, phase: RunPhase) {
        self.snapshot_tx.send_modify(|snapshot| {
            snapshot.phase = phase;
            if phase.is_running() && phase.stage() == Some(AnalysisStage::ParsingDescription) {
                snapshot.last_result = None;
            }
        });
    }
}

/// Aborts the run if the `submit` future is dropped before it finishes
struct RunGuard<'a> {
    workflow: &'a AnalysisWorkflow,
    run_id: &'a str,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut tracker = self.workflow.lock_tracker();
        if !tracker.is_running() {
            return;
        }
        let phase = tracker.handle(RunEvent::Abort);
        warn!(run_id = %self.run_id, ?phase, "Analysis run dropped before finishing");
        self.workflow.publish_phase(phase);
    }
}
