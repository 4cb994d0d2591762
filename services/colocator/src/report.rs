//! Serialized result of a colocation job.

use colocation::{ColocationConfig, MaskedGrid};
use serde::{Deserialize, Serialize};

/// Output written by the job runner.
///
/// `rows` holds the filled output split along the last grid axis; masked
/// cells read back as `fill_value`. Infinite values are written as the
/// strings `"inf"` and `"-inf"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColocationReport {
    pub constraint: String,
    pub kernel: String,
    pub shape: Vec<usize>,
    #[serde(with = "colocation::float_format::float")]
    pub fill_value: f64,
    pub populated_cells: usize,
    #[serde(with = "colocation::float_format::float_rows")]
    pub rows: Vec<Vec<f64>>,
    pub mask: Vec<bool>,
}

impl ColocationReport {
    pub fn new(config: &ColocationConfig, grid: &MaskedGrid) -> Self {
        Self {
            constraint: config.constraint.to_string(),
            kernel: config.kernel.to_string(),
            shape: grid.shape().to_vec(),
            fill_value: grid.fill_value(),
            populated_cells: grid.count(),
            rows: grid.filled_rows(),
            mask: grid.mask().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_masked_grid() {
        let grid = MaskedGrid::from_cells(vec![2, 2], vec![Some(1.0), None, None, Some(4.0)], -1.0);
        let report = ColocationReport::new(&ColocationConfig::default(), &grid);

        assert_eq!(report.constraint, "interval");
        assert_eq!(report.kernel, "mean");
        assert_eq!(report.populated_cells, 2);
        assert_eq!(report.rows, vec![vec![1.0, -1.0], vec![-1.0, 4.0]]);
        assert_eq!(report.mask, vec![false, true, true, false]);
    }

    #[test]
    fn test_default_fill_value_round_trips_through_json() {
        let grid = MaskedGrid::from_cells(vec![1, 2], vec![None, Some(0.25)], f64::INFINITY);
        let report = ColocationReport::new(&ColocationConfig::default(), &grid);

        let json = serde_json::to_string(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fill_value"], "inf");
        assert_eq!(value["rows"][0][0], "inf");
        assert_eq!(value["rows"][0][1], 0.25);

        let back: ColocationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
