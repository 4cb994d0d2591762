//! Mock destination grids and ungridded data for colocation tests.
//!
//! Every fixture is a plain factory function; nothing is shared between
//! tests.

use colocation::{Coord, DestinationGrid, GridAxis, UngriddedData};

/// Fill value used by most colocation scenarios.
pub const FILL_VALUE: f64 = -999.9;

/// Latitude centres of the 5x3 grid.
pub const SQUARE_5X3_LATITUDES: [f64; 5] = [-10.0, -5.0, 0.0, 5.0, 10.0];

/// Longitude centres of the 5x3 grid.
pub const SQUARE_5X3_LONGITUDES: [f64; 3] = [-5.0, 0.0, 5.0];

/// A 5x3 latitude/longitude grid with 5 degree cells.
///
/// Latitude centres run -10..=10 and longitude centres -5..=5, with guessed
/// bounds, so cell edges sit at ±2.5, ±7.5 and ±12.5 degrees.
pub fn make_square_5x3_2d_grid() -> DestinationGrid {
    make_lat_lon_grid(&SQUARE_5X3_LATITUDES, &SQUARE_5X3_LONGITUDES)
}

/// A latitude/longitude grid with bounds guessed from the given centres.
///
/// # Panics
///
/// Panics if either axis has fewer than two centres.
pub fn make_lat_lon_grid(latitudes: &[f64], longitudes: &[f64]) -> DestinationGrid {
    DestinationGrid::new(vec![
        GridAxis::from_points("latitude", latitudes)
            .expect("latitude axis")
            .with_standard_name("latitude"),
        GridAxis::from_points("longitude", longitudes)
            .expect("longitude axis")
            .with_standard_name("longitude"),
    ])
    .expect("grid")
}

/// Ungridded data from latitude, longitude and value columns.
pub fn make_ungridded_data(lat: &[f64], lon: &[f64], values: &[f64]) -> UngriddedData {
    UngriddedData::new(
        vec![
            Coord::new("latitude", lat.to_vec())
                .with_standard_name("latitude")
                .with_units("degrees_north"),
            Coord::new("longitude", lon.to_vec())
                .with_standard_name("longitude")
                .with_units("degrees_east"),
        ],
        values.to_vec(),
    )
}

/// One observation at (`lat`, `lon`).
pub fn make_dummy_ungridded_data_single_point(lat: f64, lon: f64, value: f64) -> UngriddedData {
    make_ungridded_data(&[lat], &[lon], &[value])
}

/// Two observations at the same location with different values.
pub fn make_dummy_ungridded_data_two_points_with_different_values(
    lat: f64,
    lon: f64,
    value_1: f64,
    value_2: f64,
) -> UngriddedData {
    make_ungridded_data(&[lat, lat], &[lon, lon], &[value_1, value_2])
}

/// Three observations along the grid diagonal with no standard names.
///
/// They sit on the centres of cells [0][0], [2][1] and [4][2] of the 5x3
/// grid, with values 1, 2 and 3.
pub fn make_dummy_1d_ungridded_data() -> UngriddedData {
    UngriddedData::new(
        vec![
            Coord::new("latitude", vec![-10.0, 0.0, 10.0]),
            Coord::new("longitude", vec![-5.0, 0.0, 5.0]),
        ],
        vec![1.0, 2.0, 3.0],
    )
}

/// Same points as [`make_dummy_1d_ungridded_data`], but the coordinates
/// carry standard names that are not valid CF names.
pub fn make_dummy_1d_ungridded_data_with_invalid_standard_name() -> UngriddedData {
    UngriddedData::new(
        vec![
            Coord::new("latitude", vec![-10.0, 0.0, 10.0]).with_standard_name("notavalidname"),
            Coord::new("longitude", vec![-5.0, 0.0, 5.0]).with_standard_name("alsonotvalid"),
        ],
        vec![1.0, 2.0, 3.0],
    )
}

/// Data with no coordinates and no values.
pub fn make_empty_ungridded_data() -> UngriddedData {
    UngriddedData::default()
}

/// A 5x3 expected result with `fill` everywhere except the given cells.
pub fn expected_5x3(fill: f64, cells: &[([usize; 2], f64)]) -> Vec<Vec<f64>> {
    let mut rows = vec![vec![fill; 3]; 5];
    for &([row, col], value) in cells {
        rows[row][col] = value;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_grid_shape() {
        let grid = make_square_5x3_2d_grid();
        assert_eq!(grid.shape(), vec![5, 3]);
        assert_eq!(grid.axes()[0].name(), "latitude");
        assert_eq!(grid.axes()[1].standard_name(), Some("longitude"));
    }

    #[test]
    fn test_two_point_fixture() {
        let data = make_dummy_ungridded_data_two_points_with_different_values(0.5, 0.5, 1.2, 1.4);
        assert_eq!(data.len(), 2);
        assert_eq!(data.coords[0].points, vec![0.5, 0.5]);
        assert_eq!(data.values, vec![1.2, 1.4]);
    }

    #[test]
    fn test_expected_5x3() {
        let rows = expected_5x3(-1.0, &[([2, 1], 1.2), ([4, 2], 3.0)]);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2], vec![-1.0, 1.2, -1.0]);
        assert_eq!(rows[4][2], 3.0);
    }
}
