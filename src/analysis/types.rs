// Core data types for the feature compliance analysis workflow

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Product area a feature belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Content,
    Commerce,
    Safety,
    Analytics,
    Social,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Content,
        Category::Commerce,
        Category::Safety,
        Category::Analytics,
        Category::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Content => "Content",
            Category::Commerce => "Commerce",
            Category::Safety => "Safety",
            Category::Analytics => "Analytics",
            Category::Social => "Social",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Upper-cased region code such as `EU` or `US`.
///
/// Codes outside [`KNOWN_REGIONS`] are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable name for catalog regions
    pub fn display_name(&self) -> Option<&'static str> {
        KNOWN_REGIONS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const KNOWN_REGIONS: [(&str, &str); 8] = [
    ("US", "United States"),
    ("EU", "European Union"),
    ("UK", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("IN", "India"),
    ("JP", "Japan"),
    ("BR", "Brazil"),
];

/// Scan depth selected by the user. Recorded with each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Quick,
    Deep,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Quick => f.write_str("quick"),
            AnalysisMode::Deep => f.write_str("deep"),
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(AnalysisMode::Quick),
            "deep" => Ok(AnalysisMode::Deep),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

/// Percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfidenceThreshold(u8);

impl ConfidenceThreshold {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::ThresholdOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self(75)
    }
}

impl TryFrom<u8> for ConfidenceThreshold {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceThreshold> for u8 {
    fn from(threshold: ConfidenceThreshold) -> Self {
        threshold.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub mode: AnalysisMode,
    pub confidence_threshold: ConfidenceThreshold,
}

/// A validated feature description, ready for analysis.
///
/// Only [`AnalysisDraft::to_request`](super::draft::AnalysisDraft::to_request)
/// builds one, so title and description are never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: Category,
    pub(crate) regions: BTreeSet<RegionCode>,
    pub(crate) code_snippet: Option<String>,
}

impl AnalysisRequest {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn regions(&self) -> &BTreeSet<RegionCode> {
        &self.regions
    }

    pub fn code_snippet(&self) -> Option<&str> {
        self.code_snippet.as_deref()
    }
}

/// One step of the simulated analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnalysisStage {
    ParsingDescription,
    CheckingRegulations,
    AnalyzingCode,
    GeneratingReport,
    FinalizingRecommendations,
}

impl AnalysisStage {
    pub const ALL: [AnalysisStage; 5] = [
        AnalysisStage::ParsingDescription,
        AnalysisStage::CheckingRegulations,
        AnalysisStage::AnalyzingCode,
        AnalysisStage::GeneratingReport,
        AnalysisStage::FinalizingRecommendations,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisStage::ParsingDescription => "Parsing feature description...",
            AnalysisStage::CheckingRegulations => "Checking regulatory database...",
            AnalysisStage::AnalyzingCode => "Analyzing code patterns...",
            AnalysisStage::GeneratingReport => "Generating compliance report...",
            AnalysisStage::FinalizingRecommendations => "Finalizing recommendations...",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Simulated compliance risk, higher is worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MAX: u8 = 100;

    /// Values above 100 are clamped
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(ValidationError::RiskScoreOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    NeedsReview,
    NonCompliant,
}

impl ComplianceStatus {
    pub const NEEDS_REVIEW_FROM: u8 = 30;
    pub const NON_COMPLIANT_FROM: u8 = 70;

    pub fn from_risk_score(score: RiskScore) -> Self {
        match score.value() {
            s if s < Self::NEEDS_REVIEW_FROM => ComplianceStatus::Compliant,
            s if s < Self::NON_COMPLIANT_FROM => ComplianceStatus::NeedsReview,
            _ => ComplianceStatus::NonCompliant,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NeedsReview => "needs-review",
            ComplianceStatus::NonCompliant => "non-compliant",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::NeedsReview => "Needs Review",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationCheck {
    pub name: String,
    pub severity: Severity,
    pub applicable: bool,
}

/// Outcome of one completed analysis run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub run_id: String,
    pub title: String,
    pub category: Category,
    pub status: ComplianceStatus,
    pub risk_score: RiskScore,
    pub timestamp: String,
    pub regulations: Vec<RegulationCheck>,
    pub reasoning: String,
    pub actions: Vec<String>,
    pub similar_cases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds_are_exact() {
        for score in 0..=29 {
            assert_eq!(
                ComplianceStatus::from_risk_score(RiskScore::new(score)),
                ComplianceStatus::Compliant,
                "score {score}"
            );
        }
        for score in 30..=69 {
            assert_eq!(
                ComplianceStatus::from_risk_score(RiskScore::new(score)),
                ComplianceStatus::NeedsReview,
                "score {score}"
            );
        }
        for score in 70..=99 {
            assert_eq!(
                ComplianceStatus::from_risk_score(RiskScore::new(score)),
                ComplianceStatus::NonCompliant,
                "score {score}"
            );
        }
    }

    #[test]
    fn test_status_boundaries() {
        let status = |s| ComplianceStatus::from_risk_score(RiskScore::new(s));
        assert_eq!(status(29), ComplianceStatus::Compliant);
        assert_eq!(status(30), ComplianceStatus::NeedsReview);
        assert_eq!(status(69), ComplianceStatus::NeedsReview);
        assert_eq!(status(70), ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_stage_ordering() {
        let indices: Vec<usize> = AnalysisStage::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(
            AnalysisStage::ParsingDescription.next(),
            Some(AnalysisStage::CheckingRegulations)
        );
        assert!(AnalysisStage::FinalizingRecommendations.is_last());
        assert_eq!(AnalysisStage::from_index(5), None);
        assert_eq!(
            AnalysisStage::GeneratingReport.label(),
            "Generating compliance report..."
        );
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("content".parse::<Category>().unwrap(), Category::Content);
        assert_eq!(" Safety ".parse::<Category>().unwrap(), Category::Safety);
        assert!(matches!(
            "Gaming".parse::<Category>(),
            Err(ValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_confidence_threshold_range() {
        assert_eq!(ConfidenceThreshold::default().value(), 75);
        assert!(ConfidenceThreshold::new(100).is_ok());
        assert!(matches!(
            ConfidenceThreshold::new(101),
            Err(ValidationError::ThresholdOutOfRange(101))
        ));
    }

    #[test]
    fn test_region_code_normalization() {
        let eu = RegionCode::new(" eu ");
        assert_eq!(eu.as_str(), "EU");
        assert_eq!(eu.display_name(), Some("European Union"));
        assert_eq!(RegionCode::new("ID").display_name(), None);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ComplianceStatus::NeedsReview).unwrap();
        assert_eq!(json, "\"needs-review\"");
    }

    #[test]
    fn test_risk_score_deserialization_enforces_range() {
        let score: RiskScore = serde_json::from_str("42").unwrap();
        assert_eq!(score.value(), 42);
        assert_eq!(serde_json::to_string(&score).unwrap(), "42");

        assert!(serde_json::from_str::<RiskScore>("100").is_ok());
        assert!(serde_json::from_str::<RiskScore>("250").is_err());
        assert!(serde_json::from_str::<RiskScore>("101").is_err());
    }
}
