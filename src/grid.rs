// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rendered result: one boolean per pixel, stored row-major.

use std::slice::Chunks;

/// A `rows x cols` grid of set-membership flags.  Row 0 holds the
/// samples with the smallest imaginary part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// A grid with every cell cleared.
    pub fn new(rows: usize, cols: usize) -> Grid {
        Grid {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at `row`, `col` is a member of the set.
    /// Panics when out of bounds, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(col < self.cols, "column {} out of {}", col, self.cols);
        self.cells[row * self.cols + col]
    }

    /// Iterate over the rows, bottom (row 0) first.
    pub fn iter_rows(&self) -> Chunks<'_, bool> {
        self.cells.chunks(self.cols.max(1))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// How many cells are members of the set.
    pub fn count_members(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty_of_members() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.count_members(), 0);
        assert_eq!(grid.iter_rows().count(), 3);
    }

    #[test]
    fn cells_are_row_major() {
        let mut grid = Grid::new(2, 3);
        grid.cells_mut()[4] = true;
        assert!(grid.get(1, 1));
        assert!(!grid.get(0, 1));
        let rows: Vec<&[bool]> = grid.iter_rows().collect();
        assert_eq!(rows[1], &[false, true, false][..]);
        assert_eq!(grid.count_members(), 1);
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds_panics() {
        Grid::new(2, 2).get(0, 2);
    }
}
