//! Input collection for the analysis form.
//!
//! An [`AnalysisDraft`] accepts any edit without complaint; the presence
//! checks happen only when it is turned into an [`AnalysisRequest`].

use std::collections::BTreeSet;

use super::error::ValidationError;
use super::types::{
    AnalysisMode, AnalysisRequest, AnalysisSettings, Category, ConfidenceThreshold, RegionCode,
};

/// Pre-filled feature used to demo the workflow
#[derive(Debug, Clone, Copy)]
pub struct SampleFeature {
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub regions: &'static [&'static str],
    pub code_snippet: &'static str,
}

const SAMPLE_FEATURES: [SampleFeature; 2] = [
    SampleFeature {
        title: "Location-based content filtering for France copyright compliance",
        description: "Implement geo-fencing to restrict certain copyrighted content in France based on local copyright laws and licensing agreements.",
        category: Category::Content,
        regions: &["EU"],
        code_snippet: r#"if (userLocation === "FR") { filterCopyrightedContent(); }"#,
    },
    SampleFeature {
        title: "Age verification system for Indonesian users",
        description: "Enhanced age verification process for users in Indonesia to comply with local digital protection laws for minors.",
        category: Category::Safety,
        regions: &["ID"],
        code_snippet: r#"if (userCountry === "ID") { requireAgeVerification(); }"#,
    },
];

pub fn samples() -> &'static [SampleFeature] {
    &SAMPLE_FEATURES
}

/// Look up a sample by its 1-based number as shown to users
pub fn sample(number: usize) -> Result<&'static SampleFeature, ValidationError> {
    number
        .checked_sub(1)
        .and_then(|i| SAMPLE_FEATURES.get(i))
        .ok_or(ValidationError::UnknownSample(number))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisDraft {
    title: String,
    description: String,
    category: Option<Category>,
    regions: BTreeSet<RegionCode>,
    code_snippet: String,
    settings: AnalysisSettings,
}

impl AnalysisDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AnalysisSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn set_code_snippet(&mut self, snippet: impl Into<String>) {
        self.code_snippet = snippet.into();
    }

    /// Adds the region if absent, removes it if present
    pub fn toggle_region(&mut self, code: &str) {
        let region = RegionCode::new(code);
        if !self.regions.remove(&region) {
            self.regions.insert(region);
        }
    }

    pub fn set_mode(&mut self, mode: AnalysisMode) {
        self.settings.mode = mode;
    }

    pub fn set_confidence_threshold(&mut self, threshold: ConfidenceThreshold) {
        self.settings.confidence_threshold = threshold;
    }

    /// Replace every feature field with the sample. Settings are kept.
    pub fn load_sample(&mut self, sample: &SampleFeature) {
        *self = Self {
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            category: Some(sample.category),
            regions: sample.regions.iter().map(|r| RegionCode::new(r)).collect(),
            code_snippet: sample.code_snippet.to_string(),
            settings: self.settings,
        };
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn regions(&self) -> &BTreeSet<RegionCode> {
        &self.regions
    }

    pub fn code_snippet(&self) -> &str {
        &self.code_snippet
    }

    pub fn settings(&self) -> AnalysisSettings {
        self.settings
    }

    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn to_request(&self) -> Result<AnalysisRequest, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        let category = self.category.ok_or(ValidationError::MissingCategory)?;

        let code_snippet = if self.code_snippet.trim().is_empty() {
            None
        } else {
            Some(self.code_snippet.clone())
        };

        Ok(AnalysisRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            category,
            regions: self.regions.clone(),
            code_snippet,
        })
    }
}
