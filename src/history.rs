//! Session history of completed analyses.
//!
//! Most recent result first, unbounded, never persisted. The dashboard and
//! audit views read from it through the query helpers below.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::analysis::{AnalysisResult, ComplianceStatus, ResultSink};

/// Number of entries the dashboard shows as "recent"
pub const DASHBOARD_RECENT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct AnalysisHistory {
    entries: Vec<Arc<AnalysisResult>>,
}

/// Audit log filter. Empty search and no status matches everything.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub search: String,
    pub status: Option<ComplianceStatus>,
}

impl HistoryFilter {
    pub fn matches(&self, result: &AnalysisResult) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty() || result.title.to_lowercase().contains(&needle);
        let matches_status = self.status.map_or(true, |s| s == result.status);
        matches_search && matches_status
    }
}

impl AnalysisHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, result: Arc<AnalysisResult>) {
        debug!(
            run_id = %result.run_id,
            total = self.entries.len() + 1,
            "Recording analysis result"
        );
        self.entries.insert(0, result);
    }

    pub fn entries(&self) -> &[Arc<AnalysisResult>] {
        &self.entries
    }

    pub fn head(&self) -> Option<&Arc<AnalysisResult>> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn recent(&self, n: usize) -> &[Arc<AnalysisResult>] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn status_counts(&self) -> HashMap<ComplianceStatus, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.status).or_insert(0) += 1;
        }
        counts
    }

    pub fn average_risk_score(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u32 = self
            .entries
            .iter()
            .map(|e| u32::from(e.risk_score.value()))
            .sum();
        Some(f64::from(total) / self.entries.len() as f64)
    }

    pub fn filter(&self, filter: &HistoryFilter) -> Vec<Arc<AnalysisResult>> {
        self.entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }
}

/// Cloneable handle to a history shared between the workflow and views
#[derive(Debug, Clone, Default)]
pub struct SharedHistory {
    inner: Arc<RwLock<AnalysisHistory>>,
}

impl SharedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, result: Arc<AnalysisResult>) {
        self.inner.write().await.append(result);
    }

    /// Copy of the current history
    pub async fn snapshot(&self) -> AnalysisHistory {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl ResultSink for SharedHistory {
    async fn on_complete(&self, result: Arc<AnalysisResult>) {
        self.append(result).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::synthesizer::build_result;
    use crate::analysis::{AnalysisDraft, Category, RiskScore};
    use chrono::Local;

    fn result(title: &str, score: u8) -> Arc<AnalysisResult> {
        let mut draft = AnalysisDraft::new();
        draft.set_title(title);
        draft.set_description("desc");
        draft.set_category(Some(Category::Analytics));
        let request = draft.to_request().unwrap();
        Arc::new(build_result(title, &request, RiskScore::new(score), Local::now()))
    }

    #[test]
    fn test_append_is_most_recent_first() {
        let mut history = AnalysisHistory::new();
        history.append(result("R1", 10));
        history.append(result("R2", 20));
        history.append(result("R3", 30));

        let titles: Vec<&str> = history.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["R3", "R2", "R1"]);
        assert_eq!(history.head().unwrap().title, "R3");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = AnalysisHistory::new();
        let r = result("Same", 10);
        history.append(r.clone());
        history.append(r);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_recent_is_capped() {
        let mut history = AnalysisHistory::new();
        assert!(history.recent(DASHBOARD_RECENT).is_empty());
        for i in 0..7 {
            history.append(result(&format!("R{i}"), 10));
        }
        let recent = history.recent(DASHBOARD_RECENT);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].title, "R6");
    }

    #[test]
    fn test_status_counts_and_average() {
        let mut history = AnalysisHistory::new();
        assert_eq!(history.average_risk_score(), None);

        history.append(result("a", 10));
        history.append(result("b", 50));
        history.append(result("c", 90));
        history.append(result("d", 20));

        let counts = history.status_counts();
        assert_eq!(counts.get(&ComplianceStatus::Compliant), Some(&2));
        assert_eq!(counts.get(&ComplianceStatus::NeedsReview), Some(&1));
        assert_eq!(counts.get(&ComplianceStatus::NonCompliant), Some(&1));
        assert_eq!(history.average_risk_score(), Some(42.5));
    }

    #[test]
    fn test_filter_by_search_and_status() {
        let mut history = AnalysisHistory::new();
        history.append(result("Geo filtering", 10));
        history.append(result("Age verification", 80));
        history.append(result("geo ads", 50));

        let by_search = history.filter(&HistoryFilter {
            search: "GEO".to_string(),
            status: None,
        });
        let titles: Vec<&str> = by_search.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["geo ads", "Geo filtering"]);

        let by_status = history.filter(&HistoryFilter {
            search: String::new(),
            status: Some(ComplianceStatus::NonCompliant),
        });
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].title, "Age verification");

        assert_eq!(history.filter(&HistoryFilter::default()).len(), 3);
    }

    #[tokio::test]
    async fn test_shared_history_as_sink() {
        let history = SharedHistory::new();
        let sink: Arc<dyn ResultSink> = Arc::new(history.clone());

        sink.on_complete(result("R1", 10)).await;
        sink.on_complete(result("R2", 10)).await;

        let snapshot = history.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.head().unwrap().title, "R2");
    }
}
