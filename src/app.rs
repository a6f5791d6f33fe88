// Application-level state: active view, theme and the session history

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::analysis::{AnalysisResult, AnalysisWorkflow, RandomScorer, RiskScorer};
use crate::config::AnalysisConfig;
use crate::history::SharedHistory;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Unknown view: {0}")]
    UnknownView(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Dashboard,
    FeatureAnalysis,
    ComplianceLibrary,
    AuditTrail,
    Settings,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::FeatureAnalysis,
        View::ComplianceLibrary,
        View::AuditTrail,
        View::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::FeatureAnalysis => "feature-analysis",
            View::ComplianceLibrary => "compliance-library",
            View::AuditTrail => "audit-trail",
            View::Settings => "settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| AppError::UnknownView(s.to_string()))
    }
}

/// State shared by every view. All mutation goes through the named updates.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    active_view: View,
    dark_mode: bool,
    history: SharedHistory,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    pub fn navigate(&mut self, view: View) {
        info!(from = %self.active_view, to = %view, "Navigating");
        self.active_view = view;
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub async fn record_result(&self, result: Arc<AnalysisResult>) {
        self.history.append(result).await;
    }

    /// Build a workflow whose completed results land in this state's history
    pub async fn workflow(&self, config: &AnalysisConfig) -> AnalysisWorkflow {
        self.workflow_with_scorer(config, Arc::new(RandomScorer::new()))
            .await
    }

    pub async fn workflow_with_scorer(
        &self,
        config: &AnalysisConfig,
        scorer: Arc<dyn RiskScorer>,
    ) -> AnalysisWorkflow {
        let workflow = AnalysisWorkflow::new(scorer, config.stage_delay());
        workflow.add_sink(Arc::new(self.history.clone())).await;
        workflow
    }
}
