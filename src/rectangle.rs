//! Closed rectangle enumeration and profit ranking
//!
//! A rectangle is a pair of row and column index sets whose cross product
//! lies entirely on one-entries of the kernel matrix. A closed rectangle
//! cannot gain a column without losing a row. Each closed rectangle with at
//! least two rows and two columns describes a multi-cube divisor shared by
//! several co-kernels; the profit model scores the literal savings of
//! extracting it.

use crate::matrix::KernelMatrix;
use std::collections::BTreeSet;

/// Default cap on the number of rectangles enumerated per matrix
pub const DEFAULT_RECTANGLE_CAP: usize = 10_000;

/// An all-ones submatrix, identified by its row and column index sets
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rectangle {
    rows: BTreeSet<usize>,
    cols: BTreeSet<usize>,
}

impl Rectangle {
    /// Build a rectangle from explicit row and column index sets
    pub fn new(rows: BTreeSet<usize>, cols: BTreeSet<usize>) -> Self {
        Rectangle { rows, cols }
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Number of covered matrix entries
    pub fn area(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    /// The row index set
    pub fn rows(&self) -> &BTreeSet<usize> {
        &self.rows
    }

    /// The column index set
    pub fn cols(&self) -> &BTreeSet<usize> {
        &self.cols
    }
}

/// The outcome of a rectangle enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    /// The closed rectangles found, in discovery order
    pub rectangles: Vec<Rectangle>,
    /// True when the cap cut the enumeration short
    pub capped: bool,
}

/// Enumerate the closed rectangles of a kernel matrix
///
/// Depth-first search over column subsets in canonical order: starting from
/// each seed column the search keeps the set of rows shared by the columns
/// picked so far, only adding later columns that preserve at least one row.
/// At every node the column set is closed to all columns whose row set
/// covers the current rows. Rectangles with fewer than two rows or columns
/// are trivial or single-row cases and are not reported. Enumeration stops
/// after `cap` rectangles and reports the truncation.
pub fn enumerate_closed_rectangles(matrix: &KernelMatrix, cap: usize) -> Enumeration {
    let mut search = Search {
        matrix,
        cap,
        seen: BTreeSet::new(),
        found: Vec::new(),
        capped: false,
    };
    for j in 0..matrix.num_cols() {
        if matrix.rows_of_col(j).is_empty() {
            continue;
        }
        search.descend(j + 1, matrix.rows_of_col(j).clone());
        if search.capped {
            break;
        }
    }
    Enumeration {
        rectangles: search.found,
        capped: search.capped,
    }
}

struct Search<'a> {
    matrix: &'a KernelMatrix,
    cap: usize,
    seen: BTreeSet<(BTreeSet<usize>, BTreeSet<usize>)>,
    found: Vec<Rectangle>,
    capped: bool,
}

impl Search<'_> {
    /// Columns whose row set covers every row in `rows`
    fn closure(&self, rows: &BTreeSet<usize>) -> BTreeSet<usize> {
        (0..self.matrix.num_cols())
            .filter(|&j| rows.is_subset(self.matrix.rows_of_col(j)))
            .collect()
    }

    fn descend(&mut self, start: usize, rows: BTreeSet<usize>) {
        let cols = self.closure(&rows);
        if rows.len() >= 2 && cols.len() >= 2 {
            let key = (rows.clone(), cols.clone());
            if self.seen.insert(key) {
                self.found.push(Rectangle::new(rows.clone(), cols.clone()));
                if self.found.len() >= self.cap {
                    self.capped = true;
                    return;
                }
            }
        }
        for j in start..self.matrix.num_cols() {
            // Columns already in the closure change nothing
            if cols.contains(&j) {
                continue;
            }
            let narrowed: BTreeSet<usize> = rows
                .intersection(self.matrix.rows_of_col(j))
                .copied()
                .collect();
            if narrowed.is_empty() {
                continue;
            }
            self.descend(j + 1, narrowed);
            if self.capped {
                return;
            }
        }
    }
}

/// Literal savings of extracting a rectangle
///
/// With `L_C` the summed literal count of the column cubes and `L_R` the
/// summed literal count of the co-kernel rows, the extraction replaces the
/// `|R| * |C|` covered product cubes (`|C| * L_R + |R| * L_C` literals) by
/// one definition of `L_C` literals plus one `co-kernel * node` cube per
/// row, giving
///
/// ```text
/// profit = L_C * (|R| - 1) + L_R * (|C| - 1) - |R|
/// ```
///
/// computed directly from this identity rather than by counting an applied
/// rewrite, so the score is the same in every extraction context.
pub fn rectangle_profit(matrix: &KernelMatrix, rect: &Rectangle) -> i64 {
    let col_literals: i64 = rect
        .cols()
        .iter()
        .map(|&j| matrix.col_literal_count(j) as i64)
        .sum();
    let row_literals: i64 = rect
        .rows()
        .iter()
        .map(|&i| matrix.row(i).len() as i64)
        .sum();
    let rows = rect.num_rows() as i64;
    let cols = rect.num_cols() as i64;
    col_literals * (rows - 1) + row_literals * (cols - 1) - rows
}

/// Enumerate, score and rank the profitable rectangles of a matrix
///
/// Returns the rectangles with profit at least 1, best first, along with a
/// flag reporting whether enumeration was cut short by the cap. Ties are
/// broken deterministically: larger area, then more rows, then the
/// lexicographically smallest row index set, then column index set.
pub fn ranked_rectangles(matrix: &KernelMatrix, cap: usize) -> (Vec<(Rectangle, i64)>, bool) {
    let enumeration = enumerate_closed_rectangles(matrix, cap);
    let mut ranked: Vec<(Rectangle, i64)> = enumeration
        .rectangles
        .into_iter()
        .map(|rect| {
            let profit = rectangle_profit(matrix, &rect);
            (rect, profit)
        })
        .filter(|(_, profit)| *profit >= 1)
        .collect();
    ranked.sort_by(|(ra, pa), (rb, pb)| {
        pb.cmp(pa)
            .then_with(|| rb.area().cmp(&ra.area()))
            .then_with(|| rb.num_rows().cmp(&ra.num_rows()))
            .then_with(|| ra.rows().cmp(rb.rows()))
            .then_with(|| ra.cols().cmp(rb.cols()))
    });
    (ranked, enumeration.capped)
}

/// The most profitable rectangle of a matrix, if any has profit at least 1
pub fn best_rectangle(matrix: &KernelMatrix, cap: usize) -> Option<(Rectangle, i64)> {
    let (ranked, _) = ranked_rectangles(matrix, cap);
    ranked.into_iter().next()
}
