// =============================================================================
// Indicator Column
// =============================================================================
//
// A column of derived values aligned positionally with its series. Warm-up
// cells are `None`; there is no NaN sentinel anywhere in the engine.

use serde::Serialize;

/// Positionally aligned indicator values; `None` marks an undefined cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct IndicatorColumn {
    cells: Vec<Option<f64>>,
}

impl IndicatorColumn {
    /// A column of `len` undefined cells.
    pub fn undefined(len: usize) -> Self {
        Self {
            cells: vec![None; len],
        }
    }

    pub fn from_cells(cells: Vec<Option<f64>>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at `index`, or `None` when the cell is undefined or out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.cells.get(index).copied().flatten()
    }

    /// Value of the final cell, if defined.
    pub fn last(&self) -> Option<f64> {
        self.cells.last().copied().flatten()
    }

    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }

    /// Index of the first defined cell, i.e. the end of the warm-up window.
    pub fn first_defined(&self) -> Option<usize> {
        self.cells.iter().position(Option::is_some)
    }

    pub fn defined_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.cells.iter().copied()
    }

    /// Defined values in order, skipping the warm-up gap.
    pub fn defined_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(|c| *c).collect()
    }
}

impl FromIterator<Option<f64>> for IndicatorColumn {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
