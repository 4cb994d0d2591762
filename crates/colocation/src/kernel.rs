//! Aggregation kernels that reduce the points of one cell to a single value.

use serde::{Deserialize, Serialize};

/// Reduces the values assigned to a grid cell to one output value.
///
/// The colocator only calls `reduce` with a non-empty slice; empty cells are
/// resolved to the constraint's fill value without consulting the kernel.
pub trait Kernel: Send + Sync {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Reduce a non-empty slice of values.
    fn reduce(&self, values: &[f64]) -> f64;
}

/// Arithmetic mean.
///
/// Values are summed in the order given, in double precision, then divided
/// by the count. An empty slice yields NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mean;

impl Kernel for Mean {
    fn name(&self) -> &'static str {
        "mean"
    }

    #[inline]
    fn reduce(&self, values: &[f64]) -> f64 {
        let sum: f64 = values.iter().sum();
        sum / values.len() as f64
    }
}

/// Kernel selection for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    #[default]
    Mean,
}

impl KernelKind {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mean" | "average" => Some(Self::Mean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
        }
    }

    /// Build the kernel this kind names.
    pub fn build(&self) -> Box<dyn Kernel> {
        match self {
            Self::Mean => Box::new(Mean),
        }
    }
}

impl std::fmt::Display for KernelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_single_value_is_exact() {
        assert_eq!(Mean.reduce(&[1.2]), 1.2);
        assert_eq!(Mean.reduce(&[-999.9]), -999.9);
    }

    #[test]
    fn test_mean_of_two_values() {
        test_utils::assert_approx_eq!(Mean.reduce(&[1.2, 1.4]), 1.3, 1.0e-15);
    }

    #[test]
    fn test_mean_matches_sequential_sum() {
        let values = [0.1, 0.2, 0.3, 1.0e10, -1.0e10];
        let mut sum = 0.0f64;
        for v in values {
            sum += v;
        }
        assert_eq!(Mean.reduce(&values), sum / 5.0);
    }

    #[test]
    fn test_mean_of_nothing_is_nan() {
        assert!(Mean.reduce(&[]).is_nan());
    }

    #[test]
    fn test_kernel_kind_parse() {
        assert_eq!(KernelKind::parse("mean"), Some(KernelKind::Mean));
        assert_eq!(KernelKind::parse(" MEAN "), Some(KernelKind::Mean));
        assert_eq!(KernelKind::parse("average"), Some(KernelKind::Mean));
        assert_eq!(KernelKind::parse("median"), None);
        assert_eq!(KernelKind::Mean.build().name(), "mean");
        assert_eq!(KernelKind::Mean.to_string(), "mean");
    }
}
