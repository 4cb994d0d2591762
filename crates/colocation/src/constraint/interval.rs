//! Direct interval containment.

use super::{ensure_points, CellConstraint, DEFAULT_FILL_VALUE};
use crate::error::Result;
use crate::grid::CellBounds;
use crate::points::PointSet;

/// Selects points whose coordinates satisfy `lower <= c <= upper` on every
/// axis of the cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeCellConstraint {
    fill_value: f64,
}

impl CubeCellConstraint {
    pub fn new(fill_value: f64) -> Self {
        Self { fill_value }
    }
}

impl Default for CubeCellConstraint {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_VALUE)
    }
}

impl CellConstraint for CubeCellConstraint {
    fn name(&self) -> &'static str {
        "interval"
    }

    fn fill_value(&self) -> f64 {
        self.fill_value
    }

    fn select(&self, cell: &CellBounds, points: &PointSet) -> Result<PointSet> {
        ensure_points(points)?;
        Ok(points
            .iter()
            .filter(|p| cell.contains(&p.coords))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColocationError;
    use crate::grid::Interval;
    use crate::points::HyperPoint;

    fn cell() -> CellBounds {
        CellBounds::new(vec![Interval::new(-2.5, 2.5), Interval::new(2.5, 7.5)])
    }

    fn points(coords: &[(f64, f64)]) -> PointSet {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| HyperPoint::new(vec![a, b], i as f64))
            .collect()
    }

    #[test]
    fn test_default_fill_value_is_infinity() {
        assert_eq!(CubeCellConstraint::default().fill_value(), f64::INFINITY);
        assert_eq!(CubeCellConstraint::new(-999.9).fill_value(), -999.9);
    }

    #[test]
    fn test_selects_interior_and_edge_points() {
        let set = points(&[(0.0, 5.0), (-2.5, 2.5), (2.5, 7.5), (2.6, 5.0), (0.0, 7.6)]);
        let selected = CubeCellConstraint::default().select(&cell(), &set).unwrap();
        assert_eq!(selected.values(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_non_finite_coordinates_are_never_selected() {
        let set = points(&[(f64::NAN, 5.0), (0.0, f64::INFINITY)]);
        let selected = CubeCellConstraint::default().select(&cell(), &set).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_empty_point_set_is_an_error() {
        let err = CubeCellConstraint::default()
            .select(&cell(), &PointSet::default())
            .unwrap_err();
        assert_eq!(err, ColocationError::EmptyPoints);
    }
}
