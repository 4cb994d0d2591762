//! Deterministic generators for scattered observations.
//!
//! Generated point sets mix interior points with points snapped exactly onto
//! cell edges and points outside the grid, so constraint implementations get
//! exercised on every membership case.

use colocation::{Coord, DestinationGrid, UngriddedData};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates `n` scattered observations over and around `grid`.
///
/// Roughly a third of the coordinates land exactly on a cell edge and a
/// small share fall outside the grid's extent. Coordinates are named after
/// the grid's axes. Values are uniform in `[0, 100)`.
///
/// # Example
///
/// ```
/// use test_utils::{create_scattered_points, make_square_5x3_2d_grid};
///
/// let grid = make_square_5x3_2d_grid();
/// let data = create_scattered_points(&grid, 50, 42);
/// assert_eq!(data.len(), 50);
/// assert_eq!(data.coords.len(), 2);
/// ```
pub fn create_scattered_points(grid: &DestinationGrid, n: usize, seed: u64) -> UngriddedData {
    let mut rng = StdRng::seed_from_u64(seed);

    let coords = grid
        .axes()
        .iter()
        .map(|axis| {
            let extent = axis.extent();
            let edges: Vec<f64> = axis
                .bounds()
                .iter()
                .flat_map(|b| [b.lower, b.upper])
                .collect();
            let margin = extent.width() * 0.1;

            let points = (0..n)
                .map(|_| match rng.gen_range(0..10) {
                    0..=2 => edges[rng.gen_range(0..edges.len())],
                    3 => rng.gen_range(extent.lower - margin..extent.upper + margin),
                    _ => rng.gen_range(extent.lower..extent.upper),
                })
                .collect();
            Coord::new(axis.name(), points)
        })
        .collect();

    let values = (0..n).map(|_| rng.gen_range(0.0..100.0)).collect();
    UngriddedData::new(coords, values)
}

/// Creates `n` observations uniformly inside `grid`'s extent.
pub fn create_uniform_points(grid: &DestinationGrid, n: usize, seed: u64) -> UngriddedData {
    let mut rng = StdRng::seed_from_u64(seed);

    let coords = grid
        .axes()
        .iter()
        .map(|axis| {
            let extent = axis.extent();
            let points = (0..n)
                .map(|_| rng.gen_range(extent.lower..=extent.upper))
                .collect();
            Coord::new(axis.name(), points)
        })
        .collect();

    let values = (0..n).map(|_| rng.gen_range(-50.0..50.0)).collect();
    UngriddedData::new(coords, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::make_square_5x3_2d_grid;

    #[test]
    fn test_scattered_points_are_deterministic() {
        let grid = make_square_5x3_2d_grid();
        let a = create_scattered_points(&grid, 100, 7);
        let b = create_scattered_points(&grid, 100, 7);
        assert_eq!(a, b);
        assert_ne!(a, create_scattered_points(&grid, 100, 8));
    }

    #[test]
    fn test_scattered_points_hit_edges() {
        let grid = make_square_5x3_2d_grid();
        let data = create_scattered_points(&grid, 200, 1);
        let lat_edges = [-12.5, -7.5, -2.5, 2.5, 7.5, 12.5];
        assert!(data.coords[0].points.iter().any(|p| lat_edges.contains(p)));
    }

    #[test]
    fn test_uniform_points_stay_inside() {
        let grid = make_square_5x3_2d_grid();
        let data = create_uniform_points(&grid, 100, 3);
        assert!(data.coords[0].points.iter().all(|&p| (-12.5..=12.5).contains(&p)));
        assert!(data.coords[1].points.iter().all(|&p| (-7.5..=7.5).contains(&p)));
    }
}
