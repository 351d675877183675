//! Extraction steps: rewriting an expression against a chosen divisor
//!
//! Two kinds of step exist. A rectangle step factors a multi-cube divisor
//! out of several co-kernels at once; a single-row step factors the quotient
//! of one co-kernel, the pattern a rectangle cannot see because only one
//! kernel row participates. Both replace covered cubes of the expression by
//! `co-kernel * node` products and yield the body of a new definition.

use crate::error::SynthesisError;
use crate::matrix::KernelMatrix;
use crate::rectangle::Rectangle;
use crate::sop::{Cube, Expr, Literal};

/// One candidate extraction, as selected by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Factor the column cubes of a rectangle out of its co-kernel rows
    Rectangle {
        /// The rectangle being applied
        rect: Rectangle,
        /// Literal savings of applying it
        profit: i64,
    },
    /// Factor the quotient by a single co-kernel cube
    SingleRow {
        /// The co-kernel cube being divided out
        divisor: Cube,
        /// Literal savings of applying it
        profit: i64,
    },
}

impl Step {
    /// Literal savings of this step
    pub fn profit(&self) -> i64 {
        match self {
            Step::Rectangle { profit, .. } => *profit,
            Step::SingleRow { profit, .. } => *profit,
        }
    }
}

/// Apply a step to an expression, naming the extracted node
///
/// Returns the rewritten expression and the body of the new definition.
pub fn apply_step(
    f: &Expr,
    matrix: &KernelMatrix,
    step: &Step,
    name: &Literal,
) -> Result<(Expr, Expr), SynthesisError> {
    match step {
        Step::Rectangle { rect, .. } => apply_rectangle_once(f, matrix, rect, name),
        Step::SingleRow { divisor, .. } => Ok(apply_single_row_once(f, divisor, name)),
    }
}

/// Apply one rectangle extraction
///
/// The definition body is the sum of the rectangle's column cubes. For each
/// row, every product of the row's co-kernel with a column cube is removed
/// from `f` and replaced by the single cube `co-kernel * name`. Every
/// product cube must be present in `f`; a missing cube means the rectangle
/// does not describe `f` and the operation fails with
/// [`SynthesisError::RectangleNotRealized`] without touching anything.
pub fn apply_rectangle_once(
    f: &Expr,
    matrix: &KernelMatrix,
    rect: &Rectangle,
    name: &Literal,
) -> Result<(Expr, Expr), SynthesisError> {
    let definition: Expr = rect.cols().iter().map(|&j| matrix.col(j).clone()).collect();

    let mut covered = Vec::with_capacity(rect.area());
    for &i in rect.rows() {
        for product in definition.multiply_by_cube(matrix.row(i)) {
            if !f.contains(&product) {
                return Err(SynthesisError::RectangleNotRealized { cube: product });
            }
            covered.push(product);
        }
    }

    let mut rewritten = f.clone();
    for cube in &covered {
        rewritten.remove(cube);
    }
    for &i in rect.rows() {
        rewritten.insert(matrix.row(i).with_literal(name.clone()));
    }
    Ok((rewritten, definition))
}

/// Search for the best single-row extraction of `f`
///
/// For each literal contained in two or more cubes, the divisor is the
/// intersection of those cubes (the co-kernel the literal induces). The
/// candidate factors the quotient `f / divisor` into a new node, replacing
/// the covered cubes by the single cube `divisor * name`. With `k` covered
/// cubes the literal savings are `|divisor| * (k - 1) - 1`; candidates with
/// negative savings are discarded, and a zero-savings candidate is still
/// worthwhile because it exposes further structure to later passes.
/// Selection maximises profit, then the divisor size, then the number of
/// covered cubes, then the lexicographically greatest divisor.
pub fn single_row_step(f: &Expr) -> Option<Step> {
    let mut best: Option<(i64, usize, usize, Cube)> = None;
    for lit in f.literals() {
        let covered: Vec<&Cube> = f.cubes_containing(&lit).collect();
        if covered.len() < 2 {
            continue;
        }
        let divisor = covered[1..]
            .iter()
            .fold(covered[0].clone(), |acc, c| acc.intersection(c));
        let profit = divisor.len() as i64 * (covered.len() as i64 - 1) - 1;
        if profit < 0 {
            continue;
        }
        let candidate = (profit, divisor.len(), covered.len(), divisor);
        if best.as_ref().is_none_or(|b| candidate > *b) {
            best = Some(candidate);
        }
    }
    best.map(|(profit, _, _, divisor)| Step::SingleRow { divisor, profit })
}

/// Apply one single-row extraction
///
/// The definition body is the quotient `f / divisor`; the cubes divisible
/// by the divisor are replaced by the single cube `divisor * name`.
pub fn apply_single_row_once(f: &Expr, divisor: &Cube, name: &Literal) -> (Expr, Expr) {
    let definition = f.divide_by_cube(divisor);
    let mut rewritten = f.remainder(divisor);
    rewritten.insert(divisor.with_literal(name.clone()));
    (rewritten, definition)
}
