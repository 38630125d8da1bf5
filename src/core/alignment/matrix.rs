//! Flat row-major DP matrix.
//!
//! Every alignment call allocates its own score and backpointer matrices of
//! `(n + 1) x (m + 1)` cells, fills them once and drops them after traceback.
//! Memory is O(n*m); there is no banding or linear-space reduction.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct DpMatrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> DpMatrix<T> {
    /// Allocate a `rows x cols` matrix with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        DpMatrix {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Matrix sized for a query of length `n` against a target of length `m`
    pub fn for_lengths(n: usize, m: usize, fill: T) -> Self {
        Self::new(n + 1, m + 1, fill)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cells of row `i`, columns `0..cols`
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.cols;
        &self.cells[start..start + self.cols]
    }
}

impl<T> Index<(usize, usize)> for DpMatrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.rows && j < self.cols);
        &self.cells[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for DpMatrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.cells[i * self.cols + j]
    }
}
