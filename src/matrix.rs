//! The co-kernel / kernel-cube matrix
//!
//! Rows are the distinct co-kernels seen across the kernel pairs of an
//! expression; columns are the distinct cubes appearing inside the kernels.
//! Entry `(i, j)` is set when the kernel produced for co-kernel `i` contains
//! column cube `j`, i.e. when `F / row_i` contains `col_j`. An all-ones
//! submatrix of this matrix is a common sub-expression: the selected column
//! cubes form a divisor shared by every selected co-kernel.

use crate::sop::{Cube, Expr};
use std::collections::{BTreeMap, BTreeSet};

/// Boolean matrix indexed by co-kernels and kernel cubes
///
/// Stored sparsely as the set of one-entries plus row and column label
/// arrays with reverse lookup maps. Rows and columns are deduplicated by
/// value; the first occurrence in the pair stream fixes the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelMatrix {
    rows: Vec<Cube>,
    cols: Vec<Cube>,
    row_index: BTreeMap<Cube, usize>,
    col_index: BTreeMap<Cube, usize>,
    ones: BTreeSet<(usize, usize)>,
    col_rows: Vec<BTreeSet<usize>>,
}

/// Build the kernel matrix from a stream of (co-kernel, kernel) pairs
///
/// The pairs normally come from [`crate::kernel_pairs`]; the same kernel
/// appearing under several co-kernels contributes one row per co-kernel,
/// which is what makes multi-row rectangles visible.
pub fn build_kernel_matrix(pairs: &[(Cube, Expr)]) -> KernelMatrix {
    let mut matrix = KernelMatrix::default();
    for (co, kernel) in pairs {
        let i = matrix.intern_row(co);
        for cube in kernel.cubes() {
            let j = matrix.intern_col(cube);
            if matrix.ones.insert((i, j)) {
                matrix.col_rows[j].insert(i);
            }
        }
    }
    matrix
}

impl KernelMatrix {
    fn intern_row(&mut self, co: &Cube) -> usize {
        match self.row_index.get(co) {
            Some(&i) => i,
            None => {
                let i = self.rows.len();
                self.rows.push(co.clone());
                self.row_index.insert(co.clone(), i);
                i
            }
        }
    }

    fn intern_col(&mut self, cube: &Cube) -> usize {
        match self.col_index.get(cube) {
            Some(&j) => j,
            None => {
                let j = self.cols.len();
                self.cols.push(cube.clone());
                self.col_index.insert(cube.clone(), j);
                self.col_rows.push(BTreeSet::new());
                j
            }
        }
    }

    /// Number of co-kernel rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of kernel-cube columns
    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// True when the matrix has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The co-kernel labelling row `i`
    pub fn row(&self, i: usize) -> &Cube {
        &self.rows[i]
    }

    /// The cube labelling column `j`
    pub fn col(&self, j: usize) -> &Cube {
        &self.cols[j]
    }

    /// Literal count of the cube labelling column `j`
    pub fn col_literal_count(&self, j: usize) -> usize {
        self.cols[j].len()
    }

    /// Look up the row index of a co-kernel
    pub fn row_of(&self, co: &Cube) -> Option<usize> {
        self.row_index.get(co).copied()
    }

    /// Look up the column index of a kernel cube
    pub fn col_of(&self, cube: &Cube) -> Option<usize> {
        self.col_index.get(cube).copied()
    }

    /// Whether entry `(i, j)` is set
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.ones.contains(&(i, j))
    }

    /// The set of row indices with a one in column `j`
    pub fn rows_of_col(&self, j: usize) -> &BTreeSet<usize> {
        &self.col_rows[j]
    }

    /// Iterate over the one-entries as `(row, col)` index pairs
    pub fn ones(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ones.iter().copied()
    }
}
