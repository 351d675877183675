//! Sum-of-products expression types and the algebraic operations on them
//!
//! This module provides the two value types the synthesiser works with:
//!
//! - [`Cube`] - an unordered set of distinct positive literals, read as their
//!   logical AND. The empty cube is the constant 1.
//! - [`Expr`] - an unordered set of distinct cubes, read as their logical OR.
//!   The empty expression is the constant 0.
//!
//! Both types are canonical: they are backed by ordered sets, so equal values
//! are indistinguishable, can be used as map keys, and always print the same
//! way. All algebraic operations are pure and leave their inputs untouched.
//!
//! # Quick Start
//!
//! ```
//! use factor_logic::{Cube, Expr};
//!
//! # fn main() -> std::io::Result<()> {
//! let f = Expr::parse("adf + aef + bd")?;
//!
//! // Algebraic division by the cube a*f
//! let q = f.divide_by_cube(&Cube::from_literals(["a", "f"]));
//! assert_eq!(q.to_string(), "d + e");
//!
//! // Division, multiplication and remainder reconstruct the original
//! let d = Cube::from_literals(["a", "f"]);
//! let mut rebuilt = f.divide_by_cube(&d).multiply_by_cube(&d);
//! for cube in f.remainder(&d) {
//!     rebuilt.insert(cube);
//! }
//! assert_eq!(rebuilt, f);
//! # Ok(())
//! # }
//! ```

mod display;
mod error;
mod parser;

pub use error::ParseSopError;

use std::collections::BTreeSet;
use std::sync::Arc;

/// A positive Boolean literal, identified by an opaque name
///
/// Literal identifiers are shared `Arc<str>` values so that cubes and
/// expressions can be cloned cheaply. The total order on literals is the
/// lexicographic order on their identifiers; every other ordering in the
/// crate derives from it.
pub type Literal = Arc<str>;

/// A product term: the conjunction of a set of distinct positive literals
///
/// The empty cube represents the constant 1. Cubes compare and hash by
/// value, ordered by their sorted literal sequence.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cube {
    literals: BTreeSet<Literal>,
}

impl Cube {
    /// The empty cube, representing the constant 1
    pub fn one() -> Self {
        Cube::default()
    }

    /// A cube holding a single literal
    pub fn singleton(name: &str) -> Self {
        let mut literals = BTreeSet::new();
        literals.insert(Arc::from(name));
        Cube { literals }
    }

    /// Build a cube from literal names, deduplicating as a set
    ///
    /// ```
    /// use factor_logic::Cube;
    ///
    /// let cube = Cube::from_literals(["b", "a", "b"]);
    /// assert_eq!(cube.to_string(), "ab");
    /// ```
    pub fn from_literals<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Cube {
            literals: names.into_iter().map(|s| Arc::from(s.as_ref())).collect(),
        }
    }

    /// Number of literals in this cube
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True for the empty cube, i.e. the constant 1
    pub fn is_one(&self) -> bool {
        self.literals.is_empty()
    }

    /// True for the empty cube (alias used by collection-style call sites)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check whether this cube contains the given literal
    pub fn contains(&self, name: &str) -> bool {
        self.literals.contains(name)
    }

    /// Check whether every literal of this cube occurs in `other`
    pub fn is_subset_of(&self, other: &Cube) -> bool {
        self.literals.is_subset(&other.literals)
    }

    /// The union of two cubes (the product of the two terms)
    pub fn union(&self, other: &Cube) -> Cube {
        Cube {
            literals: self.literals.union(&other.literals).cloned().collect(),
        }
    }

    /// The literals of this cube that do not occur in `other`
    pub fn difference(&self, other: &Cube) -> Cube {
        Cube {
            literals: self.literals.difference(&other.literals).cloned().collect(),
        }
    }

    /// The literals common to both cubes
    pub fn intersection(&self, other: &Cube) -> Cube {
        Cube {
            literals: self
                .literals
                .intersection(&other.literals)
                .cloned()
                .collect(),
        }
    }

    /// A copy of this cube with one extra literal
    pub fn with_literal(&self, name: Literal) -> Cube {
        let mut literals = self.literals.clone();
        literals.insert(name);
        Cube { literals }
    }

    /// Iterate over the literals in canonical order
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }
}

impl FromIterator<Literal> for Cube {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Cube {
            literals: iter.into_iter().collect(),
        }
    }
}

/// A sum-of-products expression: the disjunction of a set of distinct cubes
///
/// The empty expression represents the constant 0. Duplicate cubes cannot
/// occur by construction; adding an already present cube is a no-op.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expr {
    cubes: BTreeSet<Cube>,
}

impl Expr {
    /// The empty expression, representing the constant 0
    pub fn zero() -> Self {
        Expr::default()
    }

    /// Build an expression from cubes, deduplicating as a set
    pub fn from_cubes<I: IntoIterator<Item = Cube>>(cubes: I) -> Self {
        Expr {
            cubes: cubes.into_iter().collect(),
        }
    }

    /// Number of cubes (terms) in this expression
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// True for the empty expression, i.e. the constant 0
    pub fn is_zero(&self) -> bool {
        self.cubes.is_empty()
    }

    /// True for the empty expression (alias used by collection-style call sites)
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Check whether the expression contains the given cube as a term
    pub fn contains(&self, cube: &Cube) -> bool {
        self.cubes.contains(cube)
    }

    /// Add a term; returns false when the cube was already present
    pub fn insert(&mut self, cube: Cube) -> bool {
        self.cubes.insert(cube)
    }

    /// Remove a term; returns false when the cube was not present
    pub fn remove(&mut self, cube: &Cube) -> bool {
        self.cubes.remove(cube)
    }

    /// Iterate over the cubes in canonical order
    pub fn cubes(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.iter()
    }

    /// All distinct literals that occur anywhere in the expression
    pub fn literals(&self) -> BTreeSet<Literal> {
        self.cubes
            .iter()
            .flat_map(|c| c.literals().cloned())
            .collect()
    }

    /// Iterate over the cubes that contain the given literal
    pub fn cubes_containing<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Cube> + 'a {
        self.cubes.iter().filter(move |c| c.contains(name))
    }

    /// The intersection of the literals of every cube
    ///
    /// The result is the largest cube dividing every term. Empty expressions
    /// yield the empty cube.
    pub fn common_cube(&self) -> Cube {
        let mut cubes = self.cubes.iter();
        let Some(first) = cubes.next() else {
            return Cube::one();
        };
        cubes.fold(first.clone(), |acc, c| acc.intersection(c))
    }

    /// Check whether this expression is cube-free
    ///
    /// An expression is cube-free when it has at least two cubes and no
    /// literal is shared by all of them. A single-cube expression is never
    /// cube-free.
    pub fn is_cube_free(&self) -> bool {
        self.len() >= 2 && self.common_cube().is_one()
    }

    /// The algebraic quotient of this expression by a cube
    ///
    /// Keeps the cubes divisible by `divisor` and strips the divisor from
    /// each. Dividing by the empty cube is the identity.
    ///
    /// ```
    /// use factor_logic::{Cube, Expr};
    ///
    /// # fn main() -> std::io::Result<()> {
    /// let f = Expr::parse("ab + ac + d")?;
    /// assert_eq!(f.divide_by_cube(&Cube::singleton("a")).to_string(), "b + c");
    /// # Ok(())
    /// # }
    /// ```
    pub fn divide_by_cube(&self, divisor: &Cube) -> Expr {
        if divisor.is_one() {
            return self.clone();
        }
        self.cubes
            .iter()
            .filter(|c| divisor.is_subset_of(c))
            .map(|c| c.difference(divisor))
            .collect()
    }

    /// Distribute a cube over every term, deduplicating the products
    pub fn multiply_by_cube(&self, factor: &Cube) -> Expr {
        self.cubes.iter().map(|c| c.union(factor)).collect()
    }

    /// The cubes of this expression that are not divisible by `divisor`
    ///
    /// Together with [`Expr::divide_by_cube`] and
    /// [`Expr::multiply_by_cube`] this satisfies
    /// `F = divisor * (F / divisor) + remainder(F, divisor)` as a disjoint
    /// union of cubes.
    pub fn remainder(&self, divisor: &Cube) -> Expr {
        self.cubes
            .iter()
            .filter(|c| !divisor.is_subset_of(c))
            .cloned()
            .collect()
    }

    /// Total literal count: the sum of the cube sizes
    ///
    /// Every occurrence of a literal counts once, including literals that
    /// name definitions of a synthesised network.
    pub fn literal_count(&self) -> usize {
        self.cubes.iter().map(Cube::len).sum()
    }
}

impl FromIterator<Cube> for Expr {
    fn from_iter<I: IntoIterator<Item = Cube>>(iter: I) -> Self {
        Expr {
            cubes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Expr {
    type Item = Cube;
    type IntoIter = std::collections::btree_set::IntoIter<Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Expr {
    type Item = &'a Cube;
    type IntoIter = std::collections::btree_set::Iter<'a, Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubes.iter()
    }
}
