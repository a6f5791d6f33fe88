//! Result synthesis.
//!
//! Turns a request plus a risk score into a complete [`AnalysisResult`].
//! The regulation, action and similar-case tables are static: they do not
//! depend on the request.

use chrono::{DateTime, Local};
use std::sync::Arc;

use super::scoring::RiskScorer;
use super::types::{
    AnalysisRequest, AnalysisResult, ComplianceStatus, RegulationCheck, RiskScore, Severity,
};

const REGULATIONS: [(&str, Severity, bool); 3] = [
    ("EU Digital Services Act", Severity::Medium, true),
    ("COPPA", Severity::Low, false),
    ("California CCPA", Severity::High, true),
];

const RECOMMENDED_ACTIONS: [&str; 4] = [
    "Implement data encryption for EU users",
    "Add consent management for California users",
    "Review data retention policies",
    "Update privacy policy documentation",
];

const SIMILAR_CASES: [&str; 2] = [
    "Location-based advertising restrictions (Risk Score: 45)",
    "User data collection for analytics (Risk Score: 62)",
];

/// e.g. `3/7/2025, 4:05:09 PM`
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub struct ResultSynthesizer {
    scorer: Arc<dyn RiskScorer>,
}

impl ResultSynthesizer {
    pub fn new(scorer: Arc<dyn RiskScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    pub async fn synthesize(&self, run_id: &str, request: &AnalysisRequest) -> AnalysisResult {
        let risk_score = self.scorer.score(request).await;
        build_result(run_id, request, risk_score, Local::now())
    }
}

/// Assemble the result record for an already computed score
pub fn build_result(
    run_id: &str,
    request: &AnalysisRequest,
    risk_score: RiskScore,
    at: DateTime<Local>,
) -> AnalysisResult {
    AnalysisResult {
        run_id: run_id.to_string(),
        title: request.title().to_string(),
        category: request.category(),
        status: ComplianceStatus::from_risk_score(risk_score),
        risk_score,
        timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        regulations: REGULATIONS
            .iter()
            .map(|(name, severity, applicable)| RegulationCheck {
                name: name.to_string(),
                severity: *severity,
                applicable: *applicable,
            })
            .collect(),
        reasoning: reasoning_for(request),
        actions: RECOMMENDED_ACTIONS.iter().map(|a| a.to_string()).collect(),
        similar_cases: SIMILAR_CASES.iter().map(|c| c.to_string()).collect(),
    }
}

fn reasoning_for(request: &AnalysisRequest) -> String {
    format!(
        "Based on the analysis of \"{}\", the system identified potential compliance concerns \
         related to data processing and user privacy. The feature involves {} functionality \
         which requires careful consideration of regional regulations.",
        request.title(),
        request.category().as_str().to_lowercase()
    )
}
