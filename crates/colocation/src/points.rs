//! Ungridded (scattered) point data.
//!
//! [`UngriddedData`] is how point sources hand observations to the
//! colocator: a list of named coordinate arrays plus one value per point.
//! The colocator flattens it into a [`PointSet`] whose coordinates follow
//! the destination grid's axis order.

use crate::error::{ColocationError, Result};
use crate::grid::DestinationGrid;
use serde::{Deserialize, Serialize};

/// One coordinate array of ungridded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// Variable name, e.g. "latitude".
    pub name: String,
    /// CF standard name. May be missing or not a valid CF name; it is only
    /// used as a fallback when matching coordinates to grid axes.
    #[serde(default)]
    pub standard_name: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    /// One coordinate value per point.
    pub points: Vec<f64>,
}

impl Coord {
    pub fn new(name: impl Into<String>, points: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            standard_name: None,
            units: None,
            points,
        }
    }

    pub fn with_standard_name(mut self, standard_name: impl Into<String>) -> Self {
        self.standard_name = Some(standard_name.into());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Scattered observations: coordinate arrays and one value per point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UngriddedData {
    pub coords: Vec<Coord>,
    pub values: Vec<f64>,
}

impl UngriddedData {
    pub fn new(coords: Vec<Coord>, values: Vec<f64>) -> Self {
        Self { coords, values }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there is nothing to colocate: no coordinates or no values.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty() || self.values.is_empty()
    }

    /// Find the coordinate for a grid axis: by name, then by standard name.
    pub fn coord(&self, axis_name: &str, axis_standard_name: Option<&str>) -> Option<&Coord> {
        self.coords
            .iter()
            .find(|c| c.name == axis_name)
            .or_else(|| {
                self.coords.iter().find(|c| {
                    c.standard_name.as_deref() == Some(axis_name)
                        || (axis_standard_name.is_some()
                            && c.standard_name.as_deref() == axis_standard_name)
                })
            })
    }

    /// Check that the data can be colocated.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ColocationError::EmptyPoints);
        }
        for coord in &self.coords {
            if coord.len() != self.values.len() {
                return Err(ColocationError::invalid_argument(format!(
                    "coordinate '{}' has {} points but there are {} values",
                    coord.name,
                    coord.len(),
                    self.values.len()
                )));
            }
        }
        Ok(())
    }

    /// Flatten into a [`PointSet`] whose coordinates follow the grid's axes.
    pub fn to_point_set(&self, grid: &DestinationGrid) -> Result<PointSet> {
        self.validate()?;

        let columns = grid
            .axes()
            .iter()
            .map(|axis| {
                self.coord(axis.name(), axis.standard_name())
                    .ok_or_else(|| ColocationError::missing_coordinate(axis.name()))
            })
            .collect::<Result<Vec<&Coord>>>()?;

        let points = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| HyperPoint {
                coords: columns.iter().map(|c| c.points[i]).collect(),
                value,
            })
            .collect();

        Ok(PointSet::new(points))
    }
}

/// A single observation with coordinates in grid axis order.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperPoint {
    pub coords: Vec<f64>,
    pub value: f64,
}

impl HyperPoint {
    pub fn new(coords: Vec<f64>, value: f64) -> Self {
        Self { coords, value }
    }
}

/// An ordered list of observations, all with the same coordinate rank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<HyperPoint>,
}

impl PointSet {
    pub fn new(points: Vec<HyperPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[HyperPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HyperPoint> {
        self.points.iter()
    }

    /// Values of all points, in order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Copy the points at the given positions, in the order given.
    pub fn subset(&self, indices: &[usize]) -> PointSet {
        PointSet::new(
            indices
                .iter()
                .filter_map(|&i| self.points.get(i).cloned())
                .collect(),
        )
    }
}

impl FromIterator<HyperPoint> for PointSet {
    fn from_iter<I: IntoIterator<Item = HyperPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a HyperPoint;
    type IntoIter = std::slice::Iter<'a, HyperPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
