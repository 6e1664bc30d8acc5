use crate::config::Config;
use crate::error::{PairfitError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_scoring(config, &mut errors);
        Self::validate_combos(config, &mut errors);
        Self::validate_suggestions(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PairfitError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_scoring(config: &Config, errors: &mut Vec<ValidationError>) {
        let scoring = &config.scoring;

        let weights = [
            ("scoring.category_weight", scoring.category_weight),
            ("scoring.color_weight", scoring.color_weight),
            ("scoring.style_weight", scoring.style_weight),
            ("scoring.formality_weight", scoring.formality_weight),
        ];
        for (path, weight) in weights {
            if weight <= 0.0 {
                errors.push(ValidationError::new(path, "Weight must be positive"));
            }
        }

        // Weights must sum to ~1.0 so the raw score stays bounded in 0..=1
        let sum: f32 = weights.iter().map(|(_, w)| w).sum();
        if !(0.95..=1.05).contains(&sum) {
            errors.push(ValidationError::new(
                "scoring",
                format!("Component weights must sum to 1.0 (got {:.3})", sum),
            ));
        }

        if !(0.0..1.0).contains(&scoring.medium_threshold) {
            errors.push(ValidationError::new(
                "scoring.medium_threshold",
                "Threshold must be within 0..1",
            ));
        }
        if !(0.0..1.0).contains(&scoring.high_threshold) {
            errors.push(ValidationError::new(
                "scoring.high_threshold",
                "Threshold must be within 0..1",
            ));
        }
        if scoring.high_threshold <= scoring.medium_threshold {
            errors.push(ValidationError::new(
                "scoring.high_threshold",
                "HIGH threshold must exceed MEDIUM threshold",
            ));
        }
    }

    fn validate_combos(config: &Config, errors: &mut Vec<ValidationError>) {
        let combos = &config.combos;

        if combos.assembly_limit == 0 {
            errors.push(ValidationError::new(
                "combos.assembly_limit",
                "Assembly limit must be greater than 0",
            ));
        }
        if combos.max_per_tab_single == 0 {
            errors.push(ValidationError::new(
                "combos.max_per_tab_single",
                "Single-tab cap must be greater than 0",
            ));
        }
        if combos.max_per_tab_dual == 0 {
            errors.push(ValidationError::new(
                "combos.max_per_tab_dual",
                "Dual-tab cap must be greater than 0",
            ));
        }
        if combos.max_per_tab_dual > combos.max_per_tab_single {
            errors.push(ValidationError::new(
                "combos.max_per_tab_dual",
                "Dual-tab cap cannot exceed single-tab cap",
            ));
        }
    }

    fn validate_suggestions(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.suggestions.max_bullets == 0 {
            errors.push(ValidationError::new(
                "suggestions.max_bullets",
                "Bullet cap must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_weight_sum_rejected() {
        let mut config = Config::default();
        config.scoring.color_weight = 0.9;

        let result = ConfigValidator::validate(&config);
        assert!(matches!(
            result,
            Err(PairfitError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = Config::default();
        config.scoring.high_threshold = 0.3;
        config.scoring.medium_threshold = 0.5;

        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_dual_cap_exceeding_single_rejected() {
        let mut config = Config::default();
        config.combos.max_per_tab_dual = 10;
        config.combos.max_per_tab_single = 5;

        assert!(ConfigValidator::validate(&config).is_err());
    }
}
