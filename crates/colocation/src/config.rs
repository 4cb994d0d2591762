//! Configuration for colocation runs.

use crate::constraint::{CellConstraint, ConstraintKind, DEFAULT_FILL_VALUE};
use crate::error::{ColocationError, Result};
use crate::kernel::{Kernel, KernelKind};
use serde::{Deserialize, Serialize};

/// Configuration for a colocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColocationConfig {
    /// Cell membership strategy.
    pub constraint: ConstraintKind,

    /// Output value for cells that receive no points.
    #[serde(with = "crate::float_format::float")]
    pub fill_value: f64,

    /// Aggregation kernel.
    pub kernel: KernelKind,

    /// Compute cells in parallel.
    pub parallel: bool,
}

impl Default for ColocationConfig {
    fn default() -> Self {
        Self {
            constraint: ConstraintKind::Interval,
            fill_value: DEFAULT_FILL_VALUE,
            kernel: KernelKind::Mean,
            parallel: false,
        }
    }
}

impl ColocationConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("COLOCATION_CONSTRAINT") {
            if let Some(kind) = ConstraintKind::parse(&val) {
                config.constraint = kind;
            }
        }

        if let Ok(val) = std::env::var("COLOCATION_FILL_VALUE") {
            if let Some(fill) = parse_fill_value(&val) {
                config.fill_value = fill;
            }
        }

        if let Ok(val) = std::env::var("COLOCATION_KERNEL") {
            if let Some(kind) = KernelKind::parse(&val) {
                config.kernel = kind;
            }
        }

        if let Ok(val) = std::env::var("COLOCATION_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.fill_value.is_nan() {
            return Err(ColocationError::config(
                "fill_value must not be NaN; use a sentinel or infinity",
            ));
        }
        Ok(())
    }

    /// Build the configured constraint.
    pub fn build_constraint(&self) -> Box<dyn CellConstraint> {
        self.constraint.build(self.fill_value)
    }

    /// Build the configured kernel.
    pub fn build_kernel(&self) -> Box<dyn Kernel> {
        self.kernel.build()
    }
}

/// Parse a fill value, accepting `inf`/`-inf` spellings.
pub fn parse_fill_value(s: &str) -> Option<f64> {
    match s.trim().to_lowercase().as_str() {
        "inf" | "+inf" | "infinity" | "+infinity" => Some(f64::INFINITY),
        "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        other => other.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ColocationConfig::default();
        assert_eq!(config.constraint, ConstraintKind::Interval);
        assert_eq!(config.fill_value, f64::INFINITY);
        assert_eq!(config.kernel, KernelKind::Mean);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ColocationConfig::default();
        config.fill_value = f64::NAN;
        assert!(matches!(config.validate(), Err(ColocationError::Config(_))));

        config.fill_value = -999.9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_fill_value() {
        assert_eq!(parse_fill_value("-999.9"), Some(-999.9));
        assert_eq!(parse_fill_value("inf"), Some(f64::INFINITY));
        assert_eq!(parse_fill_value("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_fill_value("-inf"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_fill_value("missing"), None);
    }

    #[test]
    fn test_build_from_config() {
        let config = ColocationConfig {
            constraint: ConstraintKind::Binning,
            fill_value: -1.0,
            ..Default::default()
        };
        let constraint = config.build_constraint();
        assert_eq!(constraint.name(), "binning");
        assert_eq!(constraint.fill_value(), -1.0);
        assert_eq!(config.build_kernel().name(), "mean");
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ColocationConfig =
            serde_json::from_str(r#"{"constraint": "binning"}"#).unwrap();
        assert_eq!(config.constraint, ConstraintKind::Binning);
        assert_eq!(config.fill_value, f64::INFINITY);
    }

    #[test]
    fn test_default_config_json_round_trip() {
        let config = ColocationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""fill_value":"inf""#));

        let back: ColocationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let negative: ColocationConfig =
            serde_json::from_str(r#"{"fill_value": "-inf"}"#).unwrap();
        assert_eq!(negative.fill_value, f64::NEG_INFINITY);
    }
}
