use serde::{Deserialize, Serialize};
use statig::prelude::*;

use super::types::AnalysisStage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEvent {
    Submit { run_id: String },
    Advance,
    Abort,
    /// Clears a finished run back to Idle; sent by [`AnalysisWorkflow::reset`]
    ///
    /// [`AnalysisWorkflow::reset`]: super::workflow::AnalysisWorkflow::reset
    Reset,
}

/// Externally visible phase of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Running { stage: AnalysisStage },
    Complete,
    Aborted { stage: AnalysisStage },
}

impl RunPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, RunPhase::Running { .. })
    }

    pub fn stage(&self) -> Option<AnalysisStage> {
        match self {
            RunPhase::Running { stage } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Complete | RunPhase::Aborted { .. })
    }
}

/// Idle -> Running(0..=4) -> Complete, with Abort as the only way out of a run
#[derive(Debug, Default)]
pub struct AnalysisRunMachine {
    run_id: Option<String>,
}

#[state_machine(initial = "State::idle()", state(derive(Debug, Clone, Copy, PartialEq, Eq)))]
impl AnalysisRunMachine {
    #[state]
    fn idle(&mut self, event: &RunEvent) -> Outcome<State> {
        match event {
            RunEvent::Submit { run_id } => self.start(run_id),
            _ => Handled,
        }
    }

    #[state]
    fn running(&mut self, stage: &mut AnalysisStage, event: &RunEvent) -> Outcome<State> {
        match event {
            RunEvent::Advance => match stage.next() {
                Some(next) => {
                    tracing::debug!(
                        run_id = ?self.run_id,
                        stage = next.index(),
                        label = next.label(),
                        "Analysis stage advanced"
                    );
                    Transition(State::running(next))
                }
                None => {
                    tracing::info!(run_id = ?self.run_id, "Analysis stages complete");
                    Transition(State::complete())
                }
            },
            RunEvent::Abort => {
                tracing::warn!(
                    run_id = ?self.run_id,
                    stage = stage.index(),
                    "Analysis run aborted"
                );
                Transition(State::aborted(*stage))
            }
            RunEvent::Submit { run_id } => {
                tracing::warn!(
                    active_run = ?self.run_id,
                    rejected_run = %run_id,
                    "Ignoring submit while a run is in progress"
                );
                Handled
            }
            RunEvent::Reset => Handled,
        }
    }

    #[state]
    fn complete(&mut self, event: &RunEvent) -> Outcome<State> {
        match event {
            RunEvent::Submit { run_id } => self.start(run_id),
            RunEvent::Reset => {
                self.run_id = None;
                Transition(State::idle())
            }
            _ => Handled,
        }
    }

    #[state]
    fn aborted(&mut self, stage: &mut AnalysisStage, event: &RunEvent) -> Outcome<State> {
        match event {
            RunEvent::Submit { run_id } => self.start(run_id),
            RunEvent::Reset => {
                tracing::debug!(
                    run_id = ?self.run_id,
                    stage = stage.index(),
                    "Clearing aborted run"
                );
                self.run_id = None;
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}

impl AnalysisRunMachine {
    fn start(&mut self, run_id: &str) -> Outcome<State> {
        self.run_id = Some(run_id.to_string());
        tracing::info!(run_id = %run_id, "Analysis run started");
        Transition(State::running(AnalysisStage::ParsingDescription))
    }
}

/// Owns the state machine and exposes its state as a [`RunPhase`]
pub struct RunTracker {
    machine: statig::blocking::StateMachine<AnalysisRunMachine>,
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            machine: AnalysisRunMachine::default().state_machine(),
        }
    }

    pub fn handle(&mut self, event: RunEvent) -> RunPhase {
        self.machine.handle(&event);
        self.phase()
    }

    pub fn phase(&self) -> RunPhase {
        match self.machine.state() {
            State::Idle {} => RunPhase::Idle,
            State::Running { stage } => RunPhase::Running { stage: *stage },
            State::Complete {} => RunPhase::Complete,
            State::Aborted { stage } => RunPhase::Aborted { stage: *stage },
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase().is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(id: &str) -> RunEvent {
        RunEvent::Submit {
            run_id: id.to_string(),
        }
    }

    #[test]
    fn test_full_run_visits_every_stage_in_order() {
        let mut tracker = RunTracker::new();
        assert_eq!(tracker.phase(), RunPhase::Idle);

        let mut seen = vec![tracker.handle(submit("run-1")).stage().unwrap()];
        loop {
            match tracker.handle(RunEvent::Advance) {
                RunPhase::Running { stage } => seen.push(stage),
                RunPhase::Complete => break,
                other => panic!("unexpected phase {other:?}"),
            }
        }

        assert_eq!(seen, AnalysisStage::ALL.to_vec());
        assert_eq!(tracker.phase(), RunPhase::Complete);
    }

    #[test]
    fn test_idle_ignores_advance_and_abort() {
        let mut tracker = RunTracker::new();
        assert_eq!(tracker.handle(RunEvent::Advance), RunPhase::Idle);
        assert_eq!(tracker.handle(RunEvent::Abort), RunPhase::Idle);
    }

    #[test]
    fn test_submit_while_running_is_ignored() {
        let mut tracker = RunTracker::new();
        tracker.handle(submit("run-1"));
        tracker.handle(RunEvent::Advance);

        let phase = tracker.handle(submit("run-2"));
        assert_eq!(
            phase,
            RunPhase::Running {
                stage: AnalysisStage::CheckingRegulations
            }
        );
    }

    #[test]
    fn test_abort_records_stage_and_is_terminal() {
        let mut tracker = RunTracker::new();
        tracker.handle(submit("run-1"));
        tracker.handle(RunEvent::Advance);
        tracker.handle(RunEvent::Advance);

        let phase = tracker.handle(RunEvent::Abort);
        assert_eq!(
            phase,
            RunPhase::Aborted {
                stage: AnalysisStage::AnalyzingCode
            }
        );
        assert!(phase.is_terminal());
        assert_eq!(tracker.handle(RunEvent::Advance), phase);
        assert_eq!(tracker.handle(RunEvent::Reset), RunPhase::Idle);
    }

    #[test]
    fn test_complete_allows_new_submission() {
        let mut tracker = RunTracker::new();
        tracker.handle(submit("run-1"));
        for _ in 0..5 {
            tracker.handle(RunEvent::Advance);
        }
        assert_eq!(tracker.phase(), RunPhase::Complete);

        let phase = tracker.handle(submit("run-2"));
        assert_eq!(
            phase,
            RunPhase::Running {
                stage: AnalysisStage::ParsingDescription
            }
        );
    }
}
