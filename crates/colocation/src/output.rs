//! Masked output grids.

use serde::{Deserialize, Serialize};

/// A grid-shaped array where each cell is either a value or masked.
///
/// Masked cells are cells no observation reached. They read as the fill
/// value through [`MaskedGrid::filled`], but stay distinguishable from
/// computed values that happen to equal the fill value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskedGrid {
    shape: Vec<usize>,
    #[serde(with = "crate::float_format::float_vec")]
    data: Vec<f64>,
    mask: Vec<bool>,
    #[serde(with = "crate::float_format::float")]
    fill_value: f64,
}

impl MaskedGrid {
    /// Create a grid with every cell masked.
    pub fn masked(shape: Vec<usize>, fill_value: f64) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![fill_value; len],
            mask: vec![true; len],
            fill_value,
        }
    }

    /// Build a grid from per-cell results in row-major order.
    ///
    /// `None` entries become masked cells.
    pub fn from_cells(shape: Vec<usize>, cells: Vec<Option<f64>>, fill_value: f64) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), cells.len());
        let mask = cells.iter().map(Option::is_none).collect();
        let data = cells
            .into_iter()
            .map(|c| c.unwrap_or(fill_value))
            .collect();
        Self {
            shape,
            data,
            mask,
            fill_value,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major mask; `true` marks a cell without data.
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Row-major values with masked cells set to the fill value.
    pub fn filled(&self) -> Vec<f64> {
        self.data
            .iter()
            .zip(&self.mask)
            .map(|(&v, &m)| if m { self.fill_value } else { v })
            .collect()
    }

    /// Filled values split into rows along the last axis.
    pub fn filled_rows(&self) -> Vec<Vec<f64>> {
        let width = self.shape.last().copied().unwrap_or(0).max(1);
        self.filled().chunks(width).map(<[f64]>::to_vec).collect()
    }

    /// Value at a per-axis index, or `None` if masked or out of range.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        let flat = self.flat_index(index)?;
        if self.mask[flat] {
            None
        } else {
            Some(self.data[flat])
        }
    }

    /// Whether the cell at a per-axis index is masked.
    ///
    /// Out-of-range indices count as masked.
    pub fn is_masked(&self, index: &[usize]) -> bool {
        self.flat_index(index).map_or(true, |flat| self.mask[flat])
    }

    /// Number of unmasked cells.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&m| !m).count()
    }

    fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &n) in index.iter().zip(&self.shape) {
            if i >= n {
                return None;
            }
            flat = flat * n + i;
        }
        Some(flat)
    }
}
