// Risk scoring seam - swap the random scorer for a real rule engine here

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use super::types::{AnalysisRequest, RiskScore};

/// Produces a risk score for a feature request
#[async_trait]
pub trait RiskScorer: Send + Sync {
    async fn score(&self, request: &AnalysisRequest) -> RiskScore;

    fn name(&self) -> &'static str;
}

/// Uniform draw from `0..100`, ignoring the request entirely
#[derive(Debug, Default)]
pub struct RandomScorer {
    seeded: Option<Mutex<StdRng>>,
}

impl RandomScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible sequence of scores for demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn draw(&self) -> u8 {
        match &self.seeded {
            Some(rng) => match rng.lock() {
                Ok(mut rng) => rng.random_range(0..100),
                Err(poisoned) => poisoned.into_inner().random_range(0..100),
            },
            None => rand::rng().random_range(0..100),
        }
    }
}

#[async_trait]
impl RiskScorer for RandomScorer {
    async fn score(&self, _request: &AnalysisRequest) -> RiskScore {
        RiskScore::new(self.draw())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Always returns the same score
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub RiskScore);

impl FixedScorer {
    pub fn new(score: u8) -> Self {
        Self(RiskScore::new(score))
    }
}

#[async_trait]
impl RiskScorer for FixedScorer {
    async fn score(&self, _request: &AnalysisRequest) -> RiskScore {
        self.0
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::draft::AnalysisDraft;
    use crate::analysis::types::Category;

    fn request() -> AnalysisRequest {
        let mut draft = AnalysisDraft::new();
        draft.set_title("X");
        draft.set_description("Y");
        draft.set_category(Some(Category::Content));
        draft.to_request().unwrap()
    }

    #[tokio::test]
    async fn test_random_scores_stay_below_100() {
        let scorer = RandomScorer::new();
        let request = request();
        for _ in 0..500 {
            assert!(scorer.score(&request).await.value() < 100);
        }
    }

    #[tokio::test]
    async fn test_seeded_scorer_is_reproducible() {
        let request = request();
        let a = RandomScorer::seeded(42);
        let b = RandomScorer::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.score(&request).await, b.score(&request).await);
        }
    }

    #[tokio::test]
    async fn test_fixed_scorer() {
        let scorer = FixedScorer::new(70);
        assert_eq!(scorer.score(&request()).await.value(), 70);
        assert_eq!(scorer.name(), "fixed");
    }
}
