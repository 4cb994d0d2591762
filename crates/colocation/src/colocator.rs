//! Ungridded-to-gridded colocation.
//!
//! ```text
//! UngriddedData ──► PointSet (coords in grid axis order)
//!                        │
//!                        ▼
//!          CellConstraint::prepare(grid, points)
//!                        │
//!        for each cell (row-major, optionally parallel)
//!                        │
//!                        ├─► selector.select_cell(cell)
//!                        │
//!                        ├─► empty     → masked (fill value)
//!                        └─► non-empty → Kernel::reduce(values)
//!                        │
//!                        ▼
//!                    MaskedGrid
//! ```

use crate::config::ColocationConfig;
use crate::constraint::{CellConstraint, CellSelector};
use crate::error::Result;
use crate::grid::{DestinationGrid, GridCell};
use crate::kernel::Kernel;
use crate::output::MaskedGrid;
use crate::points::UngriddedData;
use rayon::prelude::*;
use tracing::{debug, debug_span};

/// Colocates ungridded point data onto a destination grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UngriddedGriddedColocator {
    parallel: bool,
}

impl UngriddedGriddedColocator {
    /// Create a sequential colocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a colocator that computes cells in parallel.
    pub fn parallel() -> Self {
        Self { parallel: true }
    }

    pub fn from_config(config: &ColocationConfig) -> Self {
        Self {
            parallel: config.parallel,
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Colocate `data` onto the cells of `points`.
    ///
    /// Returns the output grids; the first holds the kernel result for each
    /// cell, with cells that received no points masked to the constraint's
    /// fill value.
    ///
    /// Fails before any cell is computed if `data` has no points or no
    /// coordinates, or if a grid axis has no matching coordinate.
    pub fn colocate(
        &self,
        points: &DestinationGrid,
        data: &UngriddedData,
        constraint: &dyn CellConstraint,
        kernel: &dyn Kernel,
    ) -> Result<Vec<MaskedGrid>> {
        let grid = points;
        let span = debug_span!(
            "colocate",
            shape = ?grid.shape(),
            points = data.len(),
            constraint = constraint.name(),
            kernel = kernel.name(),
            parallel = self.parallel,
        );
        let _enter = span.enter();

        let point_set = data.to_point_set(grid)?;
        let selector = constraint.prepare(grid, &point_set)?;

        let cells = if self.parallel {
            (0..grid.len())
                .into_par_iter()
                .filter_map(|flat| grid.cell(flat))
                .map(|cell| reduce_cell(selector.as_ref(), &cell, kernel))
                .collect::<Result<Vec<_>>>()?
        } else {
            grid.cells()
                .map(|cell| reduce_cell(selector.as_ref(), &cell, kernel))
                .collect::<Result<Vec<_>>>()?
        };

        let output = MaskedGrid::from_cells(grid.shape(), cells, constraint.fill_value());
        debug!(
            populated_cells = output.count(),
            total_cells = output.len(),
            "Colocation complete"
        );

        Ok(vec![output])
    }
}

fn reduce_cell(
    selector: &dyn CellSelector,
    cell: &GridCell,
    kernel: &dyn Kernel,
) -> Result<Option<f64>> {
    let selected = selector.select_cell(cell)?;
    if selected.is_empty() {
        Ok(None)
    } else {
        Ok(Some(kernel.reduce(&selected.values())))
    }
}
