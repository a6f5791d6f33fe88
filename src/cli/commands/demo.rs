use anyhow::Result;
use tracing::info;

use crate::analysis::{samples, AnalysisDraft, ComplianceStatus, RunOutcome};
use crate::app::{AppState, View};
use crate::cli::commands::{scorer_for, status_emoji};
use crate::config::ComplianceLensConfig;
use crate::history::DASHBOARD_RECENT;
use crate::shutdown::ShutdownCoordinator;

pub struct DemoCommand {
    pub runs: usize,
    pub seed: Option<u64>,
}

impl DemoCommand {
    pub async fn execute(&self, config: &ComplianceLensConfig) -> Result<()> {
        let mut state = AppState::new();
        state.navigate(View::FeatureAnalysis);
        let workflow = state
            .workflow_with_scorer(&config.analysis, scorer_for(self.seed))
            .await;

        let mut shutdown = ShutdownCoordinator::new();
        shutdown.install_signal_handlers(workflow.cancel_handle());

        println!("🎬 Running {} analyses over the bundled samples", self.runs);
        println!();

        let mut draft = AnalysisDraft::with_settings(config.analysis.default_settings());
        for (run, sample) in samples().iter().cycle().take(self.runs).enumerate() {
            draft.load_sample(sample);
            print!("   ▶️  Run {}: {} ... ", run + 1, sample.title);
            std::io::Write::flush(&mut std::io::stdout())?;

            match workflow.submit_draft(&draft).await? {
                RunOutcome::Completed(result) => {
                    println!("{} {} ({})", status_emoji(&result), result.status, result.risk_score);
                    workflow.reset();
                }
                RunOutcome::Aborted { .. } => {
                    println!("🛑 aborted");
                    break;
                }
            }
        }
        shutdown.shutdown().await?;

        state.navigate(View::Dashboard);
        let history = state.history().snapshot().await;
        info!(entries = history.len(), "Demo session finished");

        println!();
        println!("📊 SESSION SUMMARY:");
        println!("───────────────────");
        let counts = history.status_counts();
        for status in [
            ComplianceStatus::Compliant,
            ComplianceStatus::NeedsReview,
            ComplianceStatus::NonCompliant,
        ] {
            println!("   {}: {}", status.title(), counts.get(&status).copied().unwrap_or(0));
        }
        if let Some(average) = history.average_risk_score() {
            println!("   Average risk score: {:.1}", average);
        }
        println!();
        println!("🕒 RECENT ANALYSES:");
        for entry in history.recent(DASHBOARD_RECENT) {
            println!(
                "   {} {} - {} ({})",
                status_emoji(entry),
                entry.timestamp,
                entry.title,
                entry.risk_score
            );
        }

        Ok(())
    }
}
