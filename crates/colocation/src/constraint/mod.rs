//! Cell membership constraints.
//!
//! A constraint decides which ungridded points belong to a grid cell. Cell
//! membership is over closed intervals, so a point on an edge shared by two
//! cells belongs to both, and a point where four cells meet belongs to all
//! four.
//!
//! Two implementations are provided and must agree exactly:
//!
//! - [`CubeCellConstraint`] tests every point against the cell's bounds.
//! - [`BinningCubeCellConstraint`] bins every point once against the whole
//!   grid and then answers each cell from its bucket.

mod binning;
mod interval;

pub use binning::BinningCubeCellConstraint;
pub use interval::CubeCellConstraint;

use crate::error::{ColocationError, Result};
use crate::grid::{CellBounds, DestinationGrid, GridCell};
use crate::points::PointSet;
use serde::{Deserialize, Serialize};

/// Fill value used when none is given.
pub const DEFAULT_FILL_VALUE: f64 = f64::INFINITY;

/// Selects the ungridded points that fall within a grid cell.
pub trait CellConstraint: Send + Sync {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Output value for cells that receive no points.
    fn fill_value(&self) -> f64;

    /// Copy the points lying within `cell`.
    ///
    /// Fails with [`ColocationError::EmptyPoints`] when `points` is empty.
    fn select(&self, cell: &CellBounds, points: &PointSet) -> Result<PointSet>;

    /// Bind the constraint to a grid and point set.
    ///
    /// Implementations may precompute per-grid state here. The default
    /// selector calls [`CellConstraint::select`] for every cell.
    fn prepare<'a>(
        &'a self,
        _grid: &'a DestinationGrid,
        points: &'a PointSet,
    ) -> Result<Box<dyn CellSelector + 'a>> {
        ensure_points(points)?;
        Ok(Box::new(PerCellSelector {
            constraint: self,
            points,
        }))
    }
}

/// Answers cell membership queries for one grid and point set.
pub trait CellSelector: Send + Sync {
    fn select_cell(&self, cell: &GridCell) -> Result<PointSet>;
}

struct PerCellSelector<'a, C: ?Sized> {
    constraint: &'a C,
    points: &'a PointSet,
}

impl<C> CellSelector for PerCellSelector<'_, C>
where
    C: CellConstraint + ?Sized,
{
    fn select_cell(&self, cell: &GridCell) -> Result<PointSet> {
        self.constraint.select(&cell.bounds, self.points)
    }
}

pub(crate) fn ensure_points(points: &PointSet) -> Result<()> {
    if points.is_empty() {
        Err(ColocationError::EmptyPoints)
    } else {
        Ok(())
    }
}

/// Constraint selection for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    /// Direct interval containment.
    #[default]
    Interval,
    /// Histogram binning against the whole grid.
    Binning,
}

impl ConstraintKind {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "interval" | "cube_cell" | "cubecell" => Some(Self::Interval),
            "binning" | "binned" | "binning_cube_cell" => Some(Self::Binning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interval => "interval",
            Self::Binning => "binning",
        }
    }

    /// Build the constraint this kind names.
    pub fn build(&self, fill_value: f64) -> Box<dyn CellConstraint> {
        match self {
            Self::Interval => Box::new(CubeCellConstraint::new(fill_value)),
            Self::Binning => Box::new(BinningCubeCellConstraint::new(fill_value)),
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
