use anyhow::Result;

use crate::analysis::AnalysisStage;
use crate::config::ComplianceLensConfig;

pub struct StagesCommand;

impl StagesCommand {
    pub fn execute(&self, config: &ComplianceLensConfig) -> Result<()> {
        let delay = config.analysis.stage_delay();
        println!("🔧 ANALYSIS STAGES ({:.1}s each)", delay.as_secs_f64());
        println!("──────────────────────────────");
        for stage in AnalysisStage::ALL {
            println!("   {}. {}", stage.index() + 1, stage.label());
        }
        println!();
        println!(
            "   ⏱️  Total: {:.1}s",
            (delay * AnalysisStage::ALL.len() as u32).as_secs_f64()
        );
        Ok(())
    }
}
