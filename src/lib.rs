//! # Factor Logic
//!
//! Algebraic multi-level factorisation of Boolean sum-of-products (SOP)
//! expressions, in the style of the classic kernel-extraction algorithms
//! from multi-level logic synthesis.
//!
//! Given a two-level SOP, the synthesiser produces a functionally
//! equivalent network of definitions (a DAG of SOP nodes) with fewer
//! literals, by discovering common algebraic sub-expressions:
//!
//! 1. enumerate the (co-kernel, kernel) pairs of the expression,
//! 2. build the Boolean matrix of co-kernels against kernel cubes,
//! 3. pick the most profitable all-ones rectangle of that matrix (or a
//!    single-row extraction when no rectangle qualifies),
//! 4. rewrite the expression against the extracted definition and repeat,
//! 5. factor every generated definition the same way.
//!
//! Only positive literals are supported, and the algebra is purely
//! structural: no Boolean identities beyond deduplication are applied, so
//! the result is heuristic rather than minimal. Every accepted step is
//! profitable, which bounds the network's literal count by the input's and
//! guarantees termination.
//!
//! ## Quick Start
//!
//! ```
//! use factor_logic::{synthesize, Expr};
//!
//! # fn main() -> std::io::Result<()> {
//! let f = Expr::parse("ab + ac + ad")?;
//! let result = synthesize(&f);
//!
//! assert_eq!(result.network.to_string(), "F = at1\nt1 = b + c + d");
//!
//! // Substituting the definitions back recovers the input
//! assert_eq!(result.network.expand(), f);
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting the pipeline
//!
//! The intermediate stages are public, so the steps the driver takes can be
//! reproduced by hand:
//!
//! ```
//! use factor_logic::{build_kernel_matrix, best_rectangle, kernel_pairs, Expr};
//! use factor_logic::DEFAULT_RECTANGLE_CAP;
//!
//! # fn main() -> std::io::Result<()> {
//! let f = Expr::parse("ab + ac + bd + cd")?;
//! let matrix = build_kernel_matrix(&kernel_pairs(&f));
//! let (rect, profit) = best_rectangle(&matrix, DEFAULT_RECTANGLE_CAP).unwrap();
//! assert_eq!((rect.num_rows(), rect.num_cols(), profit), (2, 2, 2));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod kernel;
pub mod matrix;
pub mod rectangle;
pub mod sop;
pub mod synth;

pub use error::SynthesisError;
pub use extract::{apply_rectangle_once, apply_single_row_once, apply_step, single_row_step, Step};
pub use kernel::{kernel_pairs, kernels};
pub use matrix::{build_kernel_matrix, KernelMatrix};
pub use rectangle::{
    best_rectangle, enumerate_closed_rectangles, ranked_rectangles, rectangle_profit, Enumeration,
    Rectangle, DEFAULT_RECTANGLE_CAP,
};
pub use sop::{Cube, Expr, Literal, ParseSopError};
pub use synth::{
    synthesize, synthesize_with, HistoryEvent, NameSupply, Network, SynthesisConfig,
    SynthesisResult,
};
