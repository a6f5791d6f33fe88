pub mod analyze;
pub mod demo;
pub mod samples;
pub mod stages;

use std::sync::Arc;

use crate::analysis::{AnalysisResult, RandomScorer, RiskScorer};

pub(crate) fn scorer_for(seed: Option<u64>) -> Arc<dyn RiskScorer> {
    match seed {
        Some(seed) => Arc::new(RandomScorer::seeded(seed)),
        None => Arc::new(RandomScorer::new()),
    }
}

pub(crate) fn status_emoji(result: &AnalysisResult) -> &'static str {
    match result.status {
        crate::analysis::ComplianceStatus::Compliant => "✅",
        crate::analysis::ComplianceStatus::NeedsReview => "⚠️ ",
        crate::analysis::ComplianceStatus::NonCompliant => "❌",
    }
}

pub(crate) fn print_result(result: &AnalysisResult) {
    println!(
        "{} {} (risk score {})",
        status_emoji(result),
        result.status.title(),
        result.risk_score
    );
    println!("   📋 {} [{}]", result.title, result.category);
    println!("   🕒 {}", result.timestamp);
    println!();
    println!("📜 REGULATIONS CHECKED:");
    for regulation in &result.regulations {
        let marker = if regulation.applicable { "●" } else { "○" };
        println!("   {} {} ({:?})", marker, regulation.name, regulation.severity);
    }
    println!();
    println!("🧠 REASONING:");
    println!("   {}", result.reasoning);
    println!();
    println!("🛠️  RECOMMENDED ACTIONS:");
    for (i, action) in result.actions.iter().enumerate() {
        println!("   {}. {}", i + 1, action);
    }
    println!();
    println!("🔎 SIMILAR CASES:");
    for case in &result.similar_cases {
        println!("   • {}", case);
    }
}
