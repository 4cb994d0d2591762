//! Destination grid description and cell bound queries.
//!
//! A [`DestinationGrid`] is an ordered list of [`GridAxis`] values. Each axis
//! holds one closed [`Interval`] per cell, and a grid cell is the cartesian
//! product of one interval from every axis. Cells are enumerated in
//! row-major order (last axis varies fastest).

use crate::error::{ColocationError, Result};
use serde::{Deserialize, Serialize};

/// A closed interval `[lower, upper]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Create an interval from two edges given in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// Check if a value lies within the interval, edges included.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval.
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// Indices of `intervals` sorted by lower bound, then upper bound.
///
/// The order does not depend on how the intervals are listed.
pub(crate) fn ascending_order(intervals: &[Interval]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&a, &b| {
        intervals[a]
            .lower
            .total_cmp(&intervals[b].lower)
            .then(intervals[a].upper.total_cmp(&intervals[b].upper))
    });
    order
}

/// One axis of a destination grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    name: String,
    standard_name: Option<String>,
    points: Vec<f64>,
    bounds: Vec<Interval>,
}

impl GridAxis {
    /// Create an axis from explicit cell bounds.
    ///
    /// Cell centres are taken as the midpoint of each bound pair.
    pub fn from_bounds(name: impl Into<String>, bounds: &[(f64, f64)]) -> Result<Self> {
        let name = name.into();
        let bounds: Vec<Interval> = bounds.iter().map(|&(a, b)| Interval::new(a, b)).collect();
        let points = bounds.iter().map(Interval::center).collect();
        let axis = Self {
            name,
            standard_name: None,
            points,
            bounds,
        };
        axis.validate()?;
        Ok(axis)
    }

    /// Create an axis from cell centres, guessing the cell bounds.
    ///
    /// Interior edges sit halfway between neighbouring centres; the two
    /// outer edges extend half a cell beyond the first and last centre.
    pub fn from_points(name: impl Into<String>, points: &[f64]) -> Result<Self> {
        let name = name.into();
        if points.len() < 2 {
            return Err(ColocationError::invalid_grid(format!(
                "axis '{}' needs at least two points to guess bounds, got {}",
                name,
                points.len()
            )));
        }

        let n = points.len();
        let mut edges = Vec::with_capacity(n + 1);
        edges.push(points[0] - (points[1] - points[0]) / 2.0);
        for pair in points.windows(2) {
            edges.push((pair[0] + pair[1]) / 2.0);
        }
        edges.push(points[n - 1] + (points[n - 1] - points[n - 2]) / 2.0);

        let bounds = edges
            .windows(2)
            .map(|pair| Interval::new(pair[0], pair[1]))
            .collect();

        let axis = Self {
            name,
            standard_name: None,
            points: points.to_vec(),
            bounds,
        };
        axis.validate()?;
        Ok(axis)
    }

    /// Attach a CF standard name to the axis.
    pub fn with_standard_name(mut self, standard_name: impl Into<String>) -> Self {
        self.standard_name = Some(standard_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn standard_name(&self) -> Option<&str> {
        self.standard_name.as_deref()
    }

    /// Cell centres.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Closed cell bounds, one per cell.
    pub fn bounds(&self) -> &[Interval] {
        &self.bounds
    }

    /// Number of cells along this axis.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// The interval covered by the whole axis.
    pub fn extent(&self) -> Interval {
        let lower = self
            .bounds
            .iter()
            .map(|b| b.lower)
            .fold(f64::INFINITY, f64::min);
        let upper = self
            .bounds
            .iter()
            .map(|b| b.upper)
            .fold(f64::NEG_INFINITY, f64::max);
        Interval { lower, upper }
    }

    /// Cell indices ordered by ascending bounds.
    ///
    /// Axes may run in either direction (latitude is often stored north to
    /// south), so lookups that rely on sorted edges go through this order.
    pub fn ascending_order(&self) -> Vec<usize> {
        ascending_order(&self.bounds)
    }

    fn validate(&self) -> Result<()> {
        if self.bounds.is_empty() {
            return Err(ColocationError::invalid_grid(format!(
                "axis '{}' has no cells",
                self.name
            )));
        }

        if let Some(i) = self.bounds.iter().position(|b| !b.is_finite()) {
            return Err(ColocationError::invalid_grid(format!(
                "axis '{}' has non-finite bounds at cell {}",
                self.name, i
            )));
        }

        // Cells may touch but never overlap.
        let order = self.ascending_order();
        for pair in order.windows(2) {
            let prev = self.bounds[pair[0]];
            let next = self.bounds[pair[1]];
            if next.lower < prev.upper {
                return Err(ColocationError::invalid_grid(format!(
                    "axis '{}' has overlapping cells {} [{}, {}] and {} [{}, {}]",
                    self.name, pair[0], prev.lower, prev.upper, pair[1], next.lower, next.upper
                )));
            }
        }

        Ok(())
    }
}

/// Closed bounds of one grid cell, one interval per grid axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBounds {
    intervals: Vec<Interval>,
}

impl CellBounds {
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.intervals.len()
    }

    /// Interval along one axis.
    pub fn get(&self, axis: usize) -> Option<&Interval> {
        self.intervals.get(axis)
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Check if a coordinate tuple lies within the cell on every axis.
    ///
    /// Coordinates beyond the cell's rank are ignored; a tuple shorter than
    /// the rank is never contained.
    pub fn contains(&self, coords: &[f64]) -> bool {
        coords.len() >= self.intervals.len()
            && self
                .intervals
                .iter()
                .zip(coords)
                .all(|(interval, &c)| interval.contains(c))
    }
}

/// A grid cell with its position and bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Index along each axis.
    pub index: Vec<usize>,
    /// Row-major flat index.
    pub flat: usize,
    pub bounds: CellBounds,
}

/// A regular rectangular destination grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationGrid {
    axes: Vec<GridAxis>,
}

impl DestinationGrid {
    /// Create a grid from its axes, outermost first.
    pub fn new(axes: Vec<GridAxis>) -> Result<Self> {
        if axes.is_empty() {
            return Err(ColocationError::invalid_grid("grid has no axes"));
        }
        Ok(Self { axes })
    }

    pub fn axes(&self) -> &[GridAxis] {
        &self.axes
    }

    /// Look up an axis by name.
    pub fn axis(&self, name: &str) -> Option<&GridAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    /// Number of cells along each axis.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(GridAxis::len).collect()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.axes.iter().map(GridAxis::len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closed bounds of the cell at `index` (one index per axis).
    pub fn cell_bounds(&self, index: &[usize]) -> Option<CellBounds> {
        if index.len() != self.axes.len() {
            return None;
        }
        let intervals = self
            .axes
            .iter()
            .zip(index)
            .map(|(axis, &i)| axis.bounds.get(i).copied())
            .collect::<Option<Vec<_>>>()?;
        Some(CellBounds::new(intervals))
    }

    /// Convert a per-axis index to a row-major flat index.
    pub fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.axes.len() {
            return None;
        }
        let mut flat = 0;
        for (axis, &i) in self.axes.iter().zip(index) {
            if i >= axis.len() {
                return None;
            }
            flat = flat * axis.len() + i;
        }
        Some(flat)
    }

    /// Convert a row-major flat index to a per-axis index.
    pub fn unravel_index(&self, flat: usize) -> Option<Vec<usize>> {
        if flat >= self.len() {
            return None;
        }
        let mut index = vec![0; self.axes.len()];
        let mut rem = flat;
        for (slot, axis) in index.iter_mut().zip(&self.axes).rev() {
            *slot = rem % axis.len();
            rem /= axis.len();
        }
        Some(index)
    }

    /// The cell at a row-major flat index.
    pub fn cell(&self, flat: usize) -> Option<GridCell> {
        let index = self.unravel_index(flat)?;
        let bounds = self.cell_bounds(&index)?;
        Some(GridCell {
            index,
            flat,
            bounds,
        })
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.len()).filter_map(move |flat| self.cell(flat))
    }
}
