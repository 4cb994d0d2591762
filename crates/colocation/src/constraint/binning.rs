//! Histogram binning.
//!
//! Every point is digitized once per axis against the axis' sorted cell
//! edges. Because cells are closed, a coordinate on an edge shared by two
//! cells lands in both bins, and the point is scattered into the bucket of
//! every cell in the cartesian product of its per-axis bins.

use super::{ensure_points, CellConstraint, CellSelector, DEFAULT_FILL_VALUE};
use crate::error::Result;
use crate::grid::{ascending_order, CellBounds, DestinationGrid, GridCell, Interval};
use crate::points::PointSet;
use tracing::debug;

/// Selects points by binning them against the whole grid up front.
///
/// Produces exactly the same subsets as
/// [`CubeCellConstraint`](super::CubeCellConstraint), in the same order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinningCubeCellConstraint {
    fill_value: f64,
}

impl BinningCubeCellConstraint {
    pub fn new(fill_value: f64) -> Self {
        Self { fill_value }
    }
}

impl Default for BinningCubeCellConstraint {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_VALUE)
    }
}

impl CellConstraint for BinningCubeCellConstraint {
    fn name(&self) -> &'static str {
        "binning"
    }

    fn fill_value(&self) -> f64 {
        self.fill_value
    }

    fn select(&self, cell: &CellBounds, points: &PointSet) -> Result<PointSet> {
        ensure_points(points)?;

        // A single cell is a one-bin histogram on every axis.
        let bins: Vec<AxisBins> = cell
            .intervals()
            .iter()
            .map(|interval| AxisBins::from_intervals(std::slice::from_ref(interval)))
            .collect();

        let mut hits = Vec::with_capacity(2);
        Ok(points
            .iter()
            .filter(|p| {
                p.coords.len() >= bins.len()
                    && bins.iter().zip(&p.coords).all(|(axis, &c)| {
                        hits.clear();
                        axis.digitize(c, &mut hits);
                        !hits.is_empty()
                    })
            })
            .cloned()
            .collect())
    }

    fn prepare<'a>(
        &'a self,
        grid: &'a DestinationGrid,
        points: &'a PointSet,
    ) -> Result<Box<dyn CellSelector + 'a>> {
        ensure_points(points)?;

        let axes: Vec<AxisBins> = grid
            .axes()
            .iter()
            .map(|axis| AxisBins::from_intervals(axis.bounds()))
            .collect();
        let strides = strides(&grid.shape());

        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); grid.len()];
        let mut per_axis: Vec<Vec<usize>> = vec![Vec::with_capacity(2); axes.len()];
        let mut outside = 0usize;

        for (i, point) in points.iter().enumerate() {
            if point.coords.len() < axes.len() {
                outside += 1;
                continue;
            }

            let mut inside = true;
            for ((bins, hits), &c) in axes.iter().zip(per_axis.iter_mut()).zip(&point.coords) {
                hits.clear();
                bins.digitize(c, hits);
                if hits.is_empty() {
                    inside = false;
                    break;
                }
            }

            if inside {
                scatter(&mut buckets, &per_axis, &strides, i);
            } else {
                outside += 1;
            }
        }

        debug!(
            points = points.len(),
            outside,
            populated_cells = buckets.iter().filter(|b| !b.is_empty()).count(),
            "Binned points onto grid"
        );

        Ok(Box::new(BinnedSelector { points, buckets }))
    }
}

/// Cell edges of one axis, sorted by lower bound.
#[derive(Debug, Clone)]
struct AxisBins {
    lowers: Vec<f64>,
    uppers: Vec<f64>,
    /// Original cell index of each sorted bin.
    cells: Vec<usize>,
}

impl AxisBins {
    fn from_intervals(intervals: &[Interval]) -> Self {
        let order = ascending_order(intervals);
        Self {
            lowers: order.iter().map(|&i| intervals[i].lower).collect(),
            uppers: order.iter().map(|&i| intervals[i].upper).collect(),
            cells: order,
        }
    }

    /// Push the index of every bin whose closed interval contains `value`.
    ///
    /// Relies on bins not overlapping, so upper edges are sorted too and the
    /// backwards scan can stop at the first bin that ends before `value`.
    fn digitize(&self, value: f64, out: &mut Vec<usize>) {
        let pos = self.lowers.partition_point(|&lower| lower <= value);
        for k in (0..pos).rev() {
            if self.uppers[k] >= value {
                out.push(self.cells[k]);
            } else {
                break;
            }
        }
    }
}

fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for k in (0..shape.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * shape[k + 1];
    }
    strides
}

/// Add `point` to every cell formed by one bin from each axis.
fn scatter(buckets: &mut [Vec<usize>], per_axis: &[Vec<usize>], strides: &[usize], point: usize) {
    let mut cursor = vec![0usize; per_axis.len()];
    loop {
        let flat: usize = cursor
            .iter()
            .zip(per_axis)
            .zip(strides)
            .map(|((&c, hits), &stride)| hits[c] * stride)
            .sum();
        buckets[flat].push(point);

        // Advance the odometer, last axis fastest.
        let mut axis = per_axis.len();
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            cursor[axis] += 1;
            if cursor[axis] < per_axis[axis].len() {
                break;
            }
            cursor[axis] = 0;
        }
    }
}

struct BinnedSelector<'a> {
    points: &'a PointSet,
    buckets: Vec<Vec<usize>>,
}

impl CellSelector for BinnedSelector<'_> {
    fn select_cell(&self, cell: &GridCell) -> Result<PointSet> {
        Ok(self
            .buckets
            .get(cell.flat)
            .map(|bucket| self.points.subset(bucket))
            .unwrap_or_default())
    }
}
