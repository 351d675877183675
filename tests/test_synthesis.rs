//! End-to-end tests for the synthesis driver
//!
//! These drive the whole pipeline on concrete expressions and check the
//! produced networks, the history log and the invariants the driver
//! guarantees: functional equivalence under expansion, never more literals
//! than the input, acyclic definitions, profitable steps.

use factor_logic::{synthesize, synthesize_with, Cube, Expr, HistoryEvent, SynthesisConfig};

fn expr(text: &str) -> Expr {
    Expr::parse(text).unwrap()
}

fn cube(text: &str) -> Cube {
    let parsed = expr(text);
    let cube = parsed.cubes().next().unwrap().clone();
    cube
}

/// Names of the generated definitions, in generation order
fn def_names(result: &factor_logic::SynthesisResult) -> Vec<String> {
    result
        .network
        .defs
        .keys()
        .map(|name| name.to_string())
        .collect()
}

#[test]
fn test_single_co_kernel_factoring() {
    // ab + ac + ad  ->  F = a*t1, t1 = b + c + d
    let f = expr("ab + ac + ad");
    let result = synthesize(&f);

    assert_eq!(result.network.root, expr("at1"));
    assert_eq!(def_names(&result), vec!["t1"]);
    assert_eq!(result.network.defs["t1"], expr("b + c + d"));
    assert_eq!(result.network.expand(), f);
    assert_eq!(result.network.total_literals(), 5);
}

#[test]
fn test_two_stage_factoring_of_ten_cube_expression() {
    // The classic worked example: the d/e rows share the divisor
    // g + f(a + b + c), and the leftover t1 pair collapses to t1*t2
    let f = expr("h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge");
    let result = synthesize(&f);

    assert_eq!(result.network.root, expr("h + bfg + t1t2"));
    assert_eq!(def_names(&result), vec!["t1", "t2", "t3"]);
    assert_eq!(result.network.defs["t1"], expr("g + ft3"));
    assert_eq!(result.network.defs["t2"], expr("d + e"));
    assert_eq!(result.network.defs["t3"], expr("a + b + c"));

    assert_eq!(result.network.expand(), f);
    assert!(result.network.total_literals() <= f.literal_count());
    assert!(result.network.check_acyclic().is_ok());
}

#[test]
fn test_ten_cube_expression_history() {
    let f = expr("h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge");
    let result = synthesize(&f);

    assert_eq!(
        result.history,
        vec![
            HistoryEvent::Rectangle {
                target: "F".into(),
                node: "t1".into(),
                rows: 2,
                cols: 4,
                covered: 8,
                profit: 11,
            },
            HistoryEvent::SingleRow {
                target: "F".into(),
                node: "t2".into(),
                divisor: cube("t1"),
                covered: 2,
                profit: 0,
            },
            HistoryEvent::SingleRow {
                target: "t1".into(),
                node: "t3".into(),
                divisor: cube("f"),
                covered: 3,
                profit: 1,
            },
        ]
    );
}

#[test]
fn test_single_literal_expression_is_left_alone() {
    let f = expr("a");
    let result = synthesize(&f);
    assert_eq!(result.network.root, f);
    assert!(result.network.defs.is_empty());
    assert!(result.history.is_empty());
}

#[test]
fn test_expression_without_common_structure_is_left_alone() {
    let f = expr("ab + cd");
    let result = synthesize(&f);
    assert_eq!(result.network.root, f);
    assert!(result.network.defs.is_empty());
    assert!(result.history.is_empty());
}

#[test]
fn test_constants_are_left_alone() {
    for text in ["0", "1"] {
        let f = expr(text);
        let result = synthesize(&f);
        assert_eq!(result.network.root, f);
        assert!(result.network.defs.is_empty());
    }
}

#[test]
fn test_fresh_names_skip_input_literals() {
    // t1 is an input literal here, so the generated node is t2
    let f = expr("dt1 + et1");
    let result = synthesize(&f);

    assert_eq!(result.network.root, expr("t1t2"));
    assert_eq!(def_names(&result), vec!["t2"]);
    assert_eq!(result.network.defs["t2"], expr("d + e"));
    assert_eq!(result.network.expand(), f);
}

#[test]
fn test_symmetric_expression_splits_into_two_factors() {
    // ab + ac + bd + cd = (a + d)(b + c)
    let f = expr("ab + ac + bd + cd");
    let result = synthesize(&f);

    assert_eq!(result.network.root, expr("t1t2"));
    let bodies: Vec<&Expr> = result.network.defs.values().collect();
    assert_eq!(bodies, vec![&expr("b + c"), &expr("a + d")]);
    assert_eq!(result.network.expand(), f);
    assert_eq!(result.network.total_literals(), 6);
}

#[test]
fn test_factoring_recurses_into_definitions() {
    // The first extraction produces a body that itself factors
    let f = expr("adf + aef + bdf + bef + cdf + cef + g");
    let result = synthesize(&f);

    assert_eq!(result.network.expand(), f);
    assert!(result.network.check_acyclic().is_ok());
    assert!(result.network.total_literals() <= f.literal_count());
    // Every definition body shows up either in the root or in another body
    for name in result.network.defs.keys() {
        let referenced = result.network.root.literals().contains(name)
            || result
                .network
                .defs
                .values()
                .any(|body| body.literals().contains(name));
        assert!(referenced, "definition {} is never referenced", name);
    }
}

#[test]
fn test_profit_thresholds_hold_for_every_step() {
    let inputs = [
        "ab + ac + ad",
        "ab + cd + ef",
        "h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge",
        "ab + ac + bd + cd",
        "adf + aef + bdf + bef + cdf + cef + g",
        "abc + abd + ce + de + fe",
    ];
    for text in inputs {
        let result = synthesize(&expr(text));
        for event in &result.history {
            match event {
                HistoryEvent::Rectangle { profit, .. } => {
                    assert!(*profit >= 1, "{}: {}", text, event)
                }
                HistoryEvent::SingleRow { profit, .. } => {
                    assert!(*profit >= 0, "{}: {}", text, event)
                }
                _ => {}
            }
        }
    }
}

#[test]
fn test_synthesis_is_deterministic() {
    let f = expr("h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge");
    let first = synthesize(&f);
    let second = synthesize(&f);
    assert_eq!(first, second);
}

#[test]
fn test_rectangle_cap_still_produces_a_valid_network() {
    let f = expr("ab + ac + bd + cd");
    let config = SynthesisConfig {
        max_rectangles: 1,
        ..SynthesisConfig::default()
    };
    let result = synthesize_with(&f, &config);

    // The driver proceeds with the best rectangle found before the cap
    assert_eq!(result.network.root, expr("t1t2"));
    assert_eq!(result.network.expand(), f);
    assert!(result
        .history
        .iter()
        .any(|e| matches!(e, HistoryEvent::EnumerationCapped { emitted: 1, .. })));
}

#[test]
fn test_custom_node_prefix() {
    let f = expr("ab + ac + ad");
    let config = SynthesisConfig {
        node_prefix: "n".to_string(),
        ..SynthesisConfig::default()
    };
    let result = synthesize_with(&f, &config);
    assert_eq!(def_names(&result), vec!["n1"]);
    assert_eq!(result.network.root, expr("an1"));
}

#[test]
fn test_printed_network_round_trips_through_the_parser() {
    let f = expr("h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge");
    let result = synthesize(&f);

    for line in result.network.to_string().lines() {
        let (name, body) = line.split_once(" = ").unwrap();
        assert!(!name.is_empty());
        let reparsed = expr(body);
        if name == "F" {
            assert_eq!(reparsed, result.network.root);
        } else {
            assert_eq!(&reparsed, &result.network.defs[name]);
        }
    }
}
