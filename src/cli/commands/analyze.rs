use anyhow::Result;
use tokio::sync::watch;

use crate::analysis::{
    sample, AnalysisDraft, AnalysisMode, AnalysisStage, Category, ConfidenceThreshold, RunOutcome,
    RunSnapshot,
};
use crate::app::{AppState, View};
use crate::cli::commands::{print_result, scorer_for};
use crate::config::ComplianceLensConfig;
use crate::shutdown::ShutdownCoordinator;

#[derive(Debug, Default)]
pub struct AnalyzeCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub regions: Vec<String>,
    pub code_snippet: Option<String>,
    pub mode: Option<String>,
    pub confidence: Option<u8>,
    pub sample: Option<usize>,
    pub seed: Option<u64>,
    pub json: bool,
}

impl AnalyzeCommand {
    /// Build the draft the way the form would: sample first, then edits
    pub fn build_draft(&self, config: &ComplianceLensConfig) -> Result<AnalysisDraft> {
        let mut draft = AnalysisDraft::with_settings(config.analysis.default_settings());

        if let Some(number) = self.sample {
            draft.load_sample(sample(number)?);
        }
        if let Some(title) = &self.title {
            draft.set_title(title.as_str());
        }
        if let Some(description) = &self.description {
            draft.set_description(description.as_str());
        }
        if let Some(category) = &self.category {
            draft.set_category(Some(category.parse::<Category>()?));
        }
        for region in &self.regions {
            draft.toggle_region(region);
        }
        if let Some(snippet) = &self.code_snippet {
            draft.set_code_snippet(snippet.as_str());
        }
        if let Some(mode) = &self.mode {
            draft.set_mode(mode.parse::<AnalysisMode>()?);
        }
        if let Some(confidence) = self.confidence {
            draft.set_confidence_threshold(ConfidenceThreshold::new(confidence)?);
        }

        Ok(draft)
    }

    pub async fn execute(&self, config: &ComplianceLensConfig) -> Result<()> {
        let draft = self.build_draft(config)?;

        let mut state = AppState::new();
        state.navigate(View::FeatureAnalysis);
        let workflow = state
            .workflow_with_scorer(&config.analysis, scorer_for(self.seed))
            .await;

        let mut shutdown = ShutdownCoordinator::new();
        shutdown.install_signal_handlers(workflow.cancel_handle());

        let progress = if self.json {
            None
        } else {
            println!("🔍 Analyzing \"{}\"...", draft.title());
            println!();
            Some(tokio::spawn(print_progress(workflow.subscribe())))
        };

        let outcome = workflow.submit_draft(&draft).await;

        if let Some(progress) = progress {
            progress.abort();
        }
        shutdown.shutdown().await?;

        match outcome? {
            RunOutcome::Completed(result) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&*result)?);
                } else {
                    println!();
                    print_result(&result);
                }
            }
            RunOutcome::Aborted { run_id, stage } => {
                println!();
                println!(
                    "🛑 Analysis {} aborted during stage {} ({})",
                    run_id,
                    stage.index() + 1,
                    stage.label()
                );
            }
        }

        Ok(())
    }
}

async fn print_progress(mut rx: watch::Receiver<RunSnapshot>) {
    let mut last: Option<AnalysisStage> = None;
    loop {
        let stage = rx.borrow_and_update().current_stage();
        if let Some(stage) = stage {
            if last != Some(stage) {
                println!(
                    "   ⏳ [{}/{}] {}",
                    stage.index() + 1,
                    AnalysisStage::ALL.len(),
                    stage.label()
                );
                last = Some(stage);
            }
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RegionCode;

    #[test]
    fn test_flags_override_sample() {
        let command = AnalyzeCommand {
            sample: Some(1),
            title: Some("Custom title".to_string()),
            regions: vec!["EU".to_string(), "US".to_string()],
            mode: Some("deep".to_string()),
            confidence: Some(90),
            ..Default::default()
        };

        let draft = command.build_draft(&ComplianceLensConfig::default()).unwrap();

        assert_eq!(draft.title(), "Custom title");
        assert_eq!(draft.category(), Some(Category::Content));
        // EU came from the sample, so the flag toggles it off
        assert!(!draft.regions().contains(&RegionCode::new("EU")));
        assert!(draft.regions().contains(&RegionCode::new("US")));
        assert_eq!(draft.settings().mode, AnalysisMode::Deep);
        assert_eq!(draft.settings().confidence_threshold.value(), 90);
    }

    #[test]
    fn test_invalid_flags_are_errors() {
        let bad_category = AnalyzeCommand {
            category: Some("Gaming".to_string()),
            ..Default::default()
        };
        assert!(bad_category.build_draft(&ComplianceLensConfig::default()).is_err());

        let bad_sample = AnalyzeCommand {
            sample: Some(9),
            ..Default::default()
        };
        assert!(bad_sample.build_draft(&ComplianceLensConfig::default()).is_err());
    }
}
