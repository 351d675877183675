//! Kernel and co-kernel enumeration
//!
//! A kernel of an expression `F` is a cube-free quotient `F / d` for some
//! cube `d`, the co-kernel. Kernels are where multi-cube common divisors
//! hide: two co-kernels producing overlapping kernels signal a shared
//! sub-expression that the rectangle covering step can extract.
//!
//! Enumeration is the classical recursive scheme. For each literal that
//! occurs in at least two cubes, the co-kernel candidate is the intersection
//! of the cubes containing it; a candidate whose intersection contains an
//! earlier literal is skipped, since the same kernel is reached on the
//! earlier literal's path, and the recursion only descends into later
//! literals. Together the two rules discover each (co-kernel, kernel) pair
//! exactly once.

use crate::sop::{Cube, Expr, Literal};
use std::collections::{BTreeMap, BTreeSet};

/// Enumerate every (co-kernel, kernel) pair of `F`
///
/// Pairs are produced in a deterministic traversal order: at each level the
/// expression itself comes first when it is cube-free (its co-kernel is the
/// product of the divisions taken so far), followed by the pairs found under
/// each dividing literal in lexicographic order. The same kernel may appear
/// under several co-kernels; that multiplicity is what the kernel matrix
/// records. Expressions with fewer than two cubes have no kernels.
pub fn kernel_pairs(f: &Expr) -> Vec<(Cube, Expr)> {
    let mut out = Vec::new();
    collect(f, &Cube::one(), None, &mut out);
    out
}

/// Enumerate the distinct kernels of `F`
///
/// Like [`kernel_pairs`], but deduplicated by kernel value: each kernel is
/// listed once, paired with the first co-kernel found for it in the
/// traversal order.
///
/// # Examples
///
/// ```
/// use factor_logic::kernels;
/// use factor_logic::Expr;
///
/// # fn main() -> std::io::Result<()> {
/// let f = Expr::parse("adf + aef + bd")?;
/// let pairs = kernels(&f);
/// assert_eq!(pairs.len(), 3);
/// // f is cube-free, so it is its own kernel with co-kernel 1
/// assert_eq!(pairs[0].0.to_string(), "1");
/// assert_eq!(pairs[1].0.to_string(), "af");
/// assert_eq!(pairs[1].1.to_string(), "d + e");
/// # Ok(())
/// # }
/// ```
pub fn kernels(f: &Expr) -> Vec<(Cube, Expr)> {
    let mut seen = BTreeSet::new();
    kernel_pairs(f)
        .into_iter()
        .filter(|(_, kernel)| seen.insert(kernel.clone()))
        .collect()
}

fn collect(expr: &Expr, co: &Cube, bound: Option<&Literal>, out: &mut Vec<(Cube, Expr)>) {
    if expr.is_cube_free() {
        out.push((co.clone(), expr.clone()));
    }

    // Literals occurring in at least two cubes, in canonical order
    let mut occurrences: BTreeMap<Literal, usize> = BTreeMap::new();
    for cube in expr.cubes() {
        for lit in cube.literals() {
            *occurrences.entry(lit.clone()).or_insert(0) += 1;
        }
    }

    for (lit, count) in occurrences {
        if count < 2 {
            continue;
        }
        // The recursion only descends into literals later than the one
        // that produced the current quotient.
        if let Some(b) = bound {
            if lit <= *b {
                continue;
            }
        }

        let mut containing = expr.cubes_containing(&lit);
        let first = match containing.next() {
            Some(c) => c.clone(),
            None => continue,
        };
        let divisor = containing.fold(first, |acc, c| acc.intersection(c));

        // Skip when the co-kernel cube holds an earlier literal: the same
        // kernel was already found on that literal's path.
        if divisor.literals().any(|m| *m < lit) {
            continue;
        }

        let quotient = expr.divide_by_cube(&divisor);
        collect(&quotient, &co.union(&divisor), Some(&lit), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(text: &str) -> Expr {
        Expr::parse(text).unwrap()
    }

    fn rendered(pairs: &[(Cube, Expr)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(co, k)| (co.to_string(), k.to_string()))
            .collect()
    }

    #[test]
    fn test_single_common_literal() {
        let f = expr("ab + ac + ad");
        let pairs = kernel_pairs(&f);
        assert_eq!(
            rendered(&pairs),
            vec![("a".to_string(), "b + c + d".to_string())]
        );
    }

    #[test]
    fn test_cube_free_expression_is_its_own_kernel() {
        let f = expr("ab + cd");
        let pairs = kernel_pairs(&f);
        assert_eq!(rendered(&pairs), vec![("1".to_string(), "ab + cd".to_string())]);
    }

    #[test]
    fn test_symmetric_expression_keeps_duplicate_kernels() {
        let f = expr("ab + ac + bd + cd");
        let pairs = kernel_pairs(&f);
        assert_eq!(
            rendered(&pairs),
            vec![
                ("1".to_string(), "ab + ac + bd + cd".to_string()),
                ("a".to_string(), "b + c".to_string()),
                ("b".to_string(), "a + d".to_string()),
                ("c".to_string(), "a + d".to_string()),
                ("d".to_string(), "b + c".to_string()),
            ]
        );
        // The deduplicated listing keeps the first co-kernel per kernel
        assert_eq!(
            rendered(&kernels(&f)),
            vec![
                ("1".to_string(), "ab + ac + bd + cd".to_string()),
                ("a".to_string(), "b + c".to_string()),
                ("b".to_string(), "a + d".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_literal_co_kernel_found_once() {
        // Both a and b lead to the co-kernel ab; only the a path emits it
        let f = expr("abc + abd");
        let pairs = kernel_pairs(&f);
        assert_eq!(rendered(&pairs), vec![("ab".to_string(), "c + d".to_string())]);
    }

    #[test]
    fn test_nested_kernels() {
        let f = expr("adf + aef + bdf + bef + cdf + cef + g");
        let pairs = kernel_pairs(&f);
        let listing = rendered(&pairs);
        // The deepest kernels come from dividing by two-literal co-kernels
        assert!(listing.contains(&("df".to_string(), "a + b + c".to_string())));
        assert!(listing.contains(&("af".to_string(), "d + e".to_string())));
        // The quotient by f alone is a level-1 kernel
        assert!(listing.contains(&("f".to_string(), "ad + ae + bd + be + cd + ce".to_string())));
        // The whole expression is cube-free because of g
        assert!(listing.contains(&("1".to_string(), f.to_string())));
    }

    #[test]
    fn test_every_kernel_is_the_quotient_by_its_co_kernel() {
        let f = expr("h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge");
        for (co, kernel) in kernel_pairs(&f) {
            assert!(kernel.is_cube_free(), "kernel {} is not cube-free", kernel);
            assert_eq!(f.divide_by_cube(&co), kernel, "co-kernel {}", co);
        }
    }

    #[test]
    fn test_no_duplicate_kernel_values_in_listing() {
        let f = expr("h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge");
        let listing = kernels(&f);
        let values: BTreeSet<&Expr> = listing.iter().map(|(_, k)| k).collect();
        assert_eq!(values.len(), listing.len());
    }

    #[test]
    fn test_small_expressions_have_no_kernels() {
        assert!(kernel_pairs(&Expr::zero()).is_empty());
        assert!(kernel_pairs(&expr("abc")).is_empty());
        assert!(kernel_pairs(&expr("1")).is_empty());
    }
}
