use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::analysis::{AnalysisMode, AnalysisSettings, ConfidenceThreshold};

/// Main configuration structure for Compliance Lens
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ComplianceLensConfig {
    /// Analysis workflow settings
    pub analysis: AnalysisConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Time spent in each analysis stage
    pub stage_delay_ms: u64,
    /// Mode preselected on new drafts
    pub default_mode: AnalysisMode,
    /// Threshold preselected on new drafts
    pub default_confidence_threshold: ConfidenceThreshold,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stage_delay_ms: 1500,
            default_mode: AnalysisMode::Quick,
            default_confidence_threshold: ConfidenceThreshold::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }

    pub fn default_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            mode: self.default_mode,
            confidence_threshold: self.default_confidence_threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (overridden by RUST_LOG)
    pub log_level: String,
    /// Emit JSON log lines instead of human readable ones
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ComplianceLensConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (compliance-lens.toml, .compliance-lens-rc)
    /// 3. Environment variables (prefixed with COMPLIANCE_LENS__)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("compliance-lens.toml").exists() {
            builder = builder.add_source(File::with_name("compliance-lens"));
        }

        if Path::new(".compliance-lens-rc").exists() {
            builder = builder.add_source(
                File::with_name(".compliance-lens-rc").format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("COMPLIANCE_LENS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit TOML file, then apply environment overrides
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).format(config::FileFormat::Toml))
            .add_source(
                Environment::with_prefix("COMPLIANCE_LENS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<ComplianceLensConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = ComplianceLensConfig::load_env_file();
        ComplianceLensConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static ComplianceLensConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_reference_timing() {
        let config = ComplianceLensConfig::default();
        assert_eq!(config.analysis.stage_delay(), Duration::from_millis(1500));
        assert_eq!(config.analysis.default_mode, AnalysisMode::Quick);
        assert_eq!(config.analysis.default_confidence_threshold.value(), 75);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: ComplianceLensConfig = toml::from_str(
            r#"
            [analysis]
            stage_delay_ms = 10
            default_mode = "deep"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.analysis.stage_delay_ms, 10);
        assert_eq!(parsed.analysis.default_mode, AnalysisMode::Deep);
        assert_eq!(parsed.analysis.default_confidence_threshold.value(), 75);
        assert!(!parsed.observability.json_logs);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let parsed: Result<ComplianceLensConfig, _> = toml::from_str(
            r#"
            [analysis]
            default_confidence_threshold = 140
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compliance-lens.toml");

        let mut config = ComplianceLensConfig::default();
        config.analysis.stage_delay_ms = 250;
        config.observability.json_logs = true;
        config.save_to_file(&path).unwrap();

        let loaded = ComplianceLensConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(ComplianceLensConfig::load_from(dir.path().join("absent.toml")).is_err());
    }
}
