//! Configuration management for pairfit
//!
//! Scoring weights, tier thresholds, and outfit caps are tuning values, not
//! contracts; they live here as named configuration so behavior is validated
//! by property tests instead of golden numbers baked into the engine.

use crate::error::{PairfitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub scoring: ScoringConfig,
    pub combos: CombosConfig,
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverrides>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Pair-scoring weights and tier thresholds
///
/// Weights apply to the four score components; the two thresholds split the
/// bounded 0..=1 raw score into HIGH / MEDIUM / LOW tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub category_weight: f32,
    pub color_weight: f32,
    pub style_weight: f32,
    pub formality_weight: f32,
    pub high_threshold: f32,
    pub medium_threshold: f32,
}

/// Outfit assembly caps
///
/// The per-tab ceilings are presentation decisions applied by the tabs
/// controller; the assembler itself only sees `assembly_limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombosConfig {
    /// Combos generated per assembly pass before tab caps apply
    pub assembly_limit: usize,
    /// Ceiling when a single tab is populated
    pub max_per_tab_single: usize,
    /// Ceiling per tab when both tabs are populated
    pub max_per_tab_dual: usize,
    /// Optional-category decorations attached per combo
    pub max_decorations: usize,
}

/// Mode A suggestion limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    pub max_bullets: usize,
}

/// Profile-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_tab_single: Option<usize>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PairfitError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PairfitError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| PairfitError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Load configuration with a specific profile applied
    pub fn load_with_profile(path: &Path, profile: &str) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_profile(profile)?;
        Ok(config)
    }

    /// Apply a profile's overrides to the configuration
    pub fn apply_profile(&mut self, profile: &str) -> Result<()> {
        if let Some(overrides) = self.profiles.get(profile) {
            if let Some(high) = overrides.high_threshold {
                self.scoring.high_threshold = high;
            }
            if let Some(medium) = overrides.medium_threshold {
                self.scoring.medium_threshold = medium;
            }
            if let Some(cap) = overrides.max_per_tab_single {
                self.combos.max_per_tab_single = cap;
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: PAIRFIT_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("PAIRFIT_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        // Simple implementation for common overrides
        match path {
            "SCORING__HIGH_THRESHOLD" => {
                self.scoring.high_threshold = Self::parse_env(path, value)?;
            }
            "SCORING__MEDIUM_THRESHOLD" => {
                self.scoring.medium_threshold = Self::parse_env(path, value)?;
            }
            "COMBOS__MAX_PER_TAB_SINGLE" => {
                self.combos.max_per_tab_single = Self::parse_env(path, value)?;
            }
            "COMBOS__MAX_PER_TAB_DUAL" => {
                self.combos.max_per_tab_dual = Self::parse_env(path, value)?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    fn parse_env<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
        value.parse().map_err(|_| PairfitError::InvalidConfigValue {
            path: path.to_string(),
            message: format!("Cannot parse '{}'", value),
        })
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PairfitError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("pairfit").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            scoring: ScoringConfig {
                category_weight: 0.25,
                color_weight: 0.35,
                style_weight: 0.25,
                formality_weight: 0.15,
                high_threshold: 0.62,
                medium_threshold: 0.42,
            },
            combos: CombosConfig {
                assembly_limit: 5,
                max_per_tab_single: 5,
                max_per_tab_dual: 3,
                max_decorations: 2,
            },
            suggestions: SuggestionsConfig { max_bullets: 3 },
            profiles: HashMap::new(),
        }
    }
}
