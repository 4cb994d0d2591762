//! Ungridded-to-Gridded Colocation
//!
//! This crate maps scattered point observations (satellite swaths, ground
//! stations) onto the cells of a regular rectangular grid, so they can be
//! compared with gridded model output. For every destination cell it:
//!
//! - **Selects** the observations inside the cell's closed bounds, so points
//!   on a shared edge count towards every adjacent cell
//! - **Reduces** them with an aggregation kernel (mean)
//! - **Masks** cells that received nothing, reading back as the fill value
//!
//! # Architecture
//!
//! ```text
//! DestinationGrid + UngriddedData
//!      │
//!      ▼
//! UngriddedGriddedColocator::colocate
//!      │
//!      ├─► CellConstraint (CubeCellConstraint | BinningCubeCellConstraint)
//!      │
//!      ├─► Kernel (Mean)
//!      │
//!      ▼
//! Vec<MaskedGrid>   (first element: kernel output)
//! ```
//!
//! # Example
//!
//! ```
//! use colocation::{
//!     Coord, CubeCellConstraint, DestinationGrid, GridAxis, Mean, UngriddedData,
//!     UngriddedGriddedColocator,
//! };
//!
//! let grid = DestinationGrid::new(vec![
//!     GridAxis::from_points("latitude", &[-10.0, -5.0, 0.0, 5.0, 10.0])?,
//!     GridAxis::from_points("longitude", &[-5.0, 0.0, 5.0])?,
//! ])?;
//! let data = UngriddedData::new(
//!     vec![
//!         Coord::new("latitude", vec![0.5]),
//!         Coord::new("longitude", vec![0.5]),
//!     ],
//!     vec![1.2],
//! );
//!
//! let out = UngriddedGriddedColocator::new().colocate(
//!     &grid,
//!     &data,
//!     &CubeCellConstraint::new(-999.9),
//!     &Mean,
//! )?;
//! assert_eq!(out[0].get(&[2, 1]), Some(1.2));
//! # Ok::<(), colocation::ColocationError>(())
//! ```

pub mod colocator;
pub mod config;
pub mod constraint;
pub mod error;
pub mod float_format;
pub mod grid;
pub mod kernel;
pub mod output;
pub mod points;

// Re-export commonly used types at crate root
pub use colocator::UngriddedGriddedColocator;
pub use config::ColocationConfig;
pub use constraint::{
    BinningCubeCellConstraint, CellConstraint, CellSelector, ConstraintKind, CubeCellConstraint,
    DEFAULT_FILL_VALUE,
};
pub use error::{ColocationError, Result};
pub use grid::{CellBounds, DestinationGrid, GridAxis, GridCell, Interval};
pub use kernel::{Kernel, KernelKind, Mean};
pub use output::MaskedGrid;
pub use points::{Coord, HyperPoint, PointSet, UngriddedData};
