//! The synthesis driver
//!
//! Takes a two-level sum-of-products expression and produces a multi-level
//! network of definitions with the same function and fewer (never more)
//! literals. One node at a time, the driver runs kernel extraction, builds
//! the kernel matrix, picks the best rectangle (falling back to a
//! single-row extraction when no rectangle qualifies) and rewrites the
//! node, repeating until no step helps. Every generated definition is then
//! queued and factored the same way.
//!
//! Each accepted step strictly reduces the literal count of the node under
//! factoring, and definition bodies are strictly smaller than the node they
//! came from, so the whole process terminates.

use crate::error::SynthesisError;
use crate::extract::{apply_step, single_row_step, Step};
use crate::kernel::kernel_pairs;
use crate::matrix::build_kernel_matrix;
use crate::rectangle::{ranked_rectangles, DEFAULT_RECTANGLE_CAP};
use crate::sop::{Cube, Expr, Literal};
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// Name under which the root expression appears in history entries
const ROOT_NAME: &str = "F";

/// Configuration for the synthesis driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Cap on the number of rectangles enumerated per iteration
    pub max_rectangles: usize,
    /// Prefix for generated node names
    pub node_prefix: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            max_rectangles: DEFAULT_RECTANGLE_CAP,
            node_prefix: "t".to_string(),
        }
    }
}

impl SynthesisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Supply of fresh node names `t1, t2, ...`
///
/// Names are issued in monotonic order, skipping identifiers already taken
/// by input literals or earlier definitions. The driver owns one supply per
/// synthesis call; there is no global state.
#[derive(Debug, Clone)]
pub struct NameSupply {
    prefix: String,
    next: usize,
    used: BTreeSet<Literal>,
    last: Option<(usize, Literal)>,
}

impl NameSupply {
    /// Create a supply that avoids the given identifiers
    pub fn new<I: IntoIterator<Item = Literal>>(prefix: &str, used: I) -> Self {
        NameSupply {
            prefix: prefix.to_string(),
            next: 1,
            used: used.into_iter().collect(),
            last: None,
        }
    }

    /// Issue the next unused name
    pub fn fresh(&mut self) -> Literal {
        loop {
            let issued_at = self.next;
            let candidate: Literal = Arc::from(format!("{}{}", self.prefix, self.next).as_str());
            self.next += 1;
            if self.used.insert(candidate.clone()) {
                self.last = Some((issued_at, candidate.clone()));
                return candidate;
            }
        }
    }

    /// Return the most recently issued name to the supply
    ///
    /// Only the name handed out by the last [`NameSupply::fresh`] call can
    /// be returned; anything else is ignored.
    pub fn release(&mut self, name: &Literal) {
        if let Some((issued_at, last)) = self.last.take() {
            if last == *name {
                self.used.remove(name);
                self.next = issued_at;
            } else {
                self.last = Some((issued_at, last));
            }
        }
    }
}

/// One entry of the synthesis history log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A rectangle extraction was applied to `target`, producing `node`
    Rectangle {
        /// Node that was being factored
        target: Literal,
        /// Name of the extracted definition
        node: Literal,
        /// Rows of the applied rectangle
        rows: usize,
        /// Columns of the applied rectangle
        cols: usize,
        /// Number of product cubes replaced
        covered: usize,
        /// Literal savings
        profit: i64,
    },
    /// A single-row extraction was applied to `target`, producing `node`
    SingleRow {
        /// Node that was being factored
        target: Literal,
        /// Name of the extracted definition
        node: Literal,
        /// The co-kernel cube that was divided out
        divisor: Cube,
        /// Number of cubes replaced
        covered: usize,
        /// Literal savings
        profit: i64,
    },
    /// Rectangle enumeration hit the configured cap
    EnumerationCapped {
        /// Node that was being factored
        target: Literal,
        /// The cap that was reached
        emitted: usize,
    },
    /// A selected rectangle did not describe the expression and was skipped
    RectangleSkipped {
        /// Node that was being factored
        target: Literal,
        /// The product cube that was missing
        missing: Cube,
    },
}

impl HistoryEvent {
    /// The definition this event created, if any
    pub fn node(&self) -> Option<&Literal> {
        match self {
            HistoryEvent::Rectangle { node, .. } | HistoryEvent::SingleRow { node, .. } => {
                Some(node)
            }
            _ => None,
        }
    }

    /// The literal savings of this event, if it applied a step
    pub fn profit(&self) -> Option<i64> {
        match self {
            HistoryEvent::Rectangle { profit, .. } | HistoryEvent::SingleRow { profit, .. } => {
                Some(*profit)
            }
            _ => None,
        }
    }
}

impl fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryEvent::Rectangle {
                target,
                node,
                rows,
                cols,
                covered,
                profit,
            } => write!(
                f,
                "{}: extracted {} by {}x{} rectangle covering {} cubes (profit {})",
                target, node, rows, cols, covered, profit
            ),
            HistoryEvent::SingleRow {
                target,
                node,
                divisor,
                covered,
                profit,
            } => write!(
                f,
                "{}: extracted {} with co-kernel {} covering {} cubes (profit {})",
                target, node, divisor, covered, profit
            ),
            HistoryEvent::EnumerationCapped { target, emitted } => write!(
                f,
                "{}: rectangle enumeration capped after {} rectangles",
                target, emitted
            ),
            HistoryEvent::RectangleSkipped { target, missing } => write!(
                f,
                "{}: skipped rectangle, product cube {} not present",
                target, missing
            ),
        }
    }
}

/// A multi-level network: a root expression plus named definitions
///
/// Definitions are kept in the order their names were generated. Names
/// occupy the same namespace as input literals and appear as literals in
/// other expressions of the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    /// The rewritten root expression
    pub root: Expr,
    /// Definition bodies by name, in generation order
    pub defs: IndexMap<Literal, Expr>,
}

impl Network {
    /// Substitute every definition into the root, transitively
    ///
    /// The result is the two-level expression the network computes; for a
    /// network produced by [`synthesize`] it equals the input as a set of
    /// cubes. Definitions are assumed acyclic, which
    /// [`Network::check_acyclic`] verifies.
    pub fn expand(&self) -> Expr {
        let mut memo: BTreeMap<Literal, Expr> = BTreeMap::new();
        self.expand_expr(&self.root, &mut memo)
    }

    fn expand_expr(&self, expr: &Expr, memo: &mut BTreeMap<Literal, Expr>) -> Expr {
        let mut out = Expr::zero();
        for cube in expr.cubes() {
            for expanded in self.expand_cube(cube, memo) {
                out.insert(expanded);
            }
        }
        out
    }

    fn expand_cube(&self, cube: &Cube, memo: &mut BTreeMap<Literal, Expr>) -> Expr {
        let mut plain = Cube::one();
        let mut parts: Vec<Expr> = Vec::new();
        for lit in cube.literals() {
            if self.defs.contains_key(lit.as_ref()) {
                parts.push(self.expanded_definition(lit, memo));
            } else {
                plain = plain.with_literal(lit.clone());
            }
        }
        let mut result = Expr::from_cubes([plain]);
        for part in &parts {
            result = multiply_exprs(&result, part);
        }
        result
    }

    fn expanded_definition(&self, name: &Literal, memo: &mut BTreeMap<Literal, Expr>) -> Expr {
        if let Some(done) = memo.get(name) {
            return done.clone();
        }
        let body = self.defs.get(name.as_ref()).cloned().unwrap_or_default();
        let expanded = self.expand_expr(&body, memo);
        memo.insert(name.clone(), expanded.clone());
        expanded
    }

    /// Total literal count of the network: root plus all definition bodies
    pub fn total_literals(&self) -> usize {
        self.root.literal_count() + self.defs.values().map(Expr::literal_count).sum::<usize>()
    }

    /// Verify that the definition references form a DAG
    ///
    /// Acyclicity holds by construction, because definitions are only ever
    /// introduced for sub-expressions of the node under factoring; this
    /// validator checks it anyway.
    pub fn check_acyclic(&self) -> Result<(), SynthesisError> {
        let mut visiting = BTreeSet::new();
        let mut done = BTreeSet::new();
        for name in self.defs.keys() {
            self.visit(name, &mut visiting, &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        name: &Literal,
        visiting: &mut BTreeSet<Literal>,
        done: &mut BTreeSet<Literal>,
    ) -> Result<(), SynthesisError> {
        if done.contains(name) {
            return Ok(());
        }
        if !visiting.insert(name.clone()) {
            return Err(SynthesisError::CyclicDefinitions { name: name.clone() });
        }
        if let Some(body) = self.defs.get(name.as_ref()) {
            for lit in body.literals() {
                if self.defs.contains_key(lit.as_ref()) {
                    self.visit(&lit, visiting, done)?;
                }
            }
        }
        visiting.remove(name);
        done.insert(name.clone());
        Ok(())
    }
}

/// Prints the root as `F = expr`, then one `name = expr` line per
/// definition in generation order.
impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", ROOT_NAME, self.root)?;
        for (name, body) in &self.defs {
            write!(f, "\n{} = {}", name, body)?;
        }
        Ok(())
    }
}

fn multiply_exprs(a: &Expr, b: &Expr) -> Expr {
    a.cubes().flat_map(|c| b.multiply_by_cube(c)).collect()
}

/// The outcome of a synthesis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// The factored network
    pub network: Network,
    /// Log of every step the driver took, in order
    pub history: Vec<HistoryEvent>,
}

/// Factor an expression into a multi-level network with default settings
///
/// # Examples
///
/// ```
/// use factor_logic::{synthesize, Expr};
///
/// # fn main() -> std::io::Result<()> {
/// let f = Expr::parse("ab + ac + bd + cd")?;
/// let result = synthesize(&f);
/// assert_eq!(result.network.to_string(), "F = t1t2\nt1 = b + c\nt2 = a + d");
/// assert_eq!(result.network.expand(), f);
/// # Ok(())
/// # }
/// ```
pub fn synthesize(f: &Expr) -> SynthesisResult {
    synthesize_with(f, &SynthesisConfig::default())
}

/// Factor an expression into a multi-level network
///
/// The returned network computes the same function as `f` (checkable with
/// [`Network::expand`]) and never has more literals. When no extraction is
/// profitable the root equals the input and no definitions are produced;
/// that is a normal outcome, not an error.
pub fn synthesize_with(f: &Expr, config: &SynthesisConfig) -> SynthesisResult {
    let root_target: Literal = Arc::from(ROOT_NAME);
    let mut names = NameSupply::new(&config.node_prefix, f.literals());
    let mut defs: IndexMap<Literal, Expr> = IndexMap::new();
    let mut pending: VecDeque<Literal> = VecDeque::new();
    let mut history = Vec::new();

    let root = factor_to_fixed_point(
        &root_target,
        f.clone(),
        config,
        &mut names,
        &mut defs,
        &mut pending,
        &mut history,
    );

    // Definitions are factored recursively, in creation order
    while let Some(name) = pending.pop_front() {
        if let Some(body) = defs.get(&name).cloned() {
            let body = factor_to_fixed_point(
                &name,
                body,
                config,
                &mut names,
                &mut defs,
                &mut pending,
                &mut history,
            );
            defs.insert(name, body);
        }
    }

    SynthesisResult {
        network: Network { root, defs },
        history,
    }
}

/// Repeatedly extract from one node until no step qualifies
fn factor_to_fixed_point(
    target: &Literal,
    mut expr: Expr,
    config: &SynthesisConfig,
    names: &mut NameSupply,
    defs: &mut IndexMap<Literal, Expr>,
    pending: &mut VecDeque<Literal>,
    history: &mut Vec<HistoryEvent>,
) -> Expr {
    loop {
        let pairs = kernel_pairs(&expr);
        if pairs.is_empty() {
            break;
        }
        let matrix = build_kernel_matrix(&pairs);
        let (ranked, capped) = ranked_rectangles(&matrix, config.max_rectangles);
        debug!(
            "{}: {} cubes, {} kernel pairs, {}x{} matrix, {} profitable rectangles",
            target,
            expr.len(),
            pairs.len(),
            matrix.num_rows(),
            matrix.num_cols(),
            ranked.len()
        );
        if capped {
            debug!(
                "{}: rectangle enumeration capped at {}",
                target, config.max_rectangles
            );
            history.push(HistoryEvent::EnumerationCapped {
                target: target.clone(),
                emitted: config.max_rectangles,
            });
        }

        let mut stepped = false;
        for (rect, profit) in &ranked {
            let step = Step::Rectangle {
                rect: rect.clone(),
                profit: *profit,
            };
            let name = names.fresh();
            match apply_step(&expr, &matrix, &step, &name) {
                Ok((rewritten, body)) => {
                    debug!(
                        "{}: extracted {} = {} (profit {})",
                        target, name, body, profit
                    );
                    history.push(HistoryEvent::Rectangle {
                        target: target.clone(),
                        node: name.clone(),
                        rows: rect.num_rows(),
                        cols: rect.num_cols(),
                        covered: rect.area(),
                        profit: *profit,
                    });
                    defs.insert(name.clone(), body);
                    pending.push_back(name);
                    expr = rewritten;
                    stepped = true;
                    break;
                }
                Err(err) => {
                    names.release(&name);
                    warn!("{}: skipping rectangle: {}", target, err);
                    if let SynthesisError::RectangleNotRealized { cube } = err {
                        history.push(HistoryEvent::RectangleSkipped {
                            target: target.clone(),
                            missing: cube,
                        });
                    }
                }
            }
        }

        if !stepped {
            if let Some(Step::SingleRow { divisor, profit }) = single_row_step(&expr) {
                let name = names.fresh();
                let step = Step::SingleRow {
                    divisor: divisor.clone(),
                    profit,
                };
                if let Ok((rewritten, body)) = apply_step(&expr, &matrix, &step, &name) {
                    debug!(
                        "{}: extracted {} = {} by co-kernel {} (profit {})",
                        target, name, body, divisor, profit
                    );
                    history.push(HistoryEvent::SingleRow {
                        target: target.clone(),
                        node: name.clone(),
                        divisor,
                        covered: body.len(),
                        profit,
                    });
                    defs.insert(name.clone(), body);
                    pending.push_back(name);
                    expr = rewritten;
                    stepped = true;
                }
            }
        }

        if !stepped {
            break;
        }
    }
    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(text: &str) -> Expr {
        Expr::parse(text).unwrap()
    }

    #[test]
    fn test_name_supply_skips_used_identifiers() {
        let taken = expr("dt1 + et1").literals();
        let mut names = NameSupply::new("t", taken);
        assert_eq!(names.fresh().as_ref(), "t2");
        assert_eq!(names.fresh().as_ref(), "t3");
    }

    #[test]
    fn test_name_supply_release_reissues_last_name() {
        let mut names = NameSupply::new("t", []);
        let first = names.fresh();
        assert_eq!(first.as_ref(), "t1");
        names.release(&first);
        assert_eq!(names.fresh().as_ref(), "t1");
        // Releasing anything but the latest name is ignored
        let second = names.fresh();
        names.release(&Arc::from("t1"));
        assert_eq!(second.as_ref(), "t2");
        assert_eq!(names.fresh().as_ref(), "t3");
    }

    #[test]
    fn test_config_defaults() {
        let config = SynthesisConfig::new();
        assert_eq!(config.max_rectangles, DEFAULT_RECTANGLE_CAP);
        assert_eq!(config.node_prefix, "t");
    }

    #[test]
    fn test_network_display_lists_definitions_in_order() {
        let result = synthesize(&expr("ab + ac + bd + cd"));
        assert_eq!(
            result.network.to_string(),
            "F = t1t2\nt1 = b + c\nt2 = a + d"
        );
    }

    #[test]
    fn test_expand_substitutes_transitively() {
        let mut defs: IndexMap<Literal, Expr> = IndexMap::new();
        defs.insert(Arc::from("t1"), expr("g + ft2"));
        defs.insert(Arc::from("t2"), expr("a + b"));
        let network = Network {
            root: expr("h + dt1"),
            defs,
        };
        assert_eq!(network.expand(), expr("h + dg + dfa + dfb"));
        assert_eq!(network.total_literals(), 3 + 3 + 2);
        assert!(network.check_acyclic().is_ok());
    }

    #[test]
    fn test_check_acyclic_detects_cycles() {
        let mut defs: IndexMap<Literal, Expr> = IndexMap::new();
        defs.insert(Arc::from("t1"), expr("a + t2"));
        defs.insert(Arc::from("t2"), expr("b + t1"));
        let network = Network {
            root: expr("t1"),
            defs,
        };
        let err = network.check_acyclic().unwrap_err();
        assert!(matches!(err, SynthesisError::CyclicDefinitions { .. }));
    }

    #[test]
    fn test_history_events_render() {
        let result = synthesize(&expr("ab + ac + ad"));
        assert_eq!(result.history.len(), 1);
        assert_eq!(
            result.history[0].to_string(),
            "F: extracted t1 with co-kernel a covering 3 cubes (profit 1)"
        );
        assert_eq!(result.history[0].node().map(|n| n.as_ref()), Some("t1"));
        assert_eq!(result.history[0].profit(), Some(1));
    }
}
