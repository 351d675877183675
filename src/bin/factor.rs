//! Factor Logic - Command Line Interface
//!
//! Reads a sum-of-products expression, factors it into a multi-level
//! network and prints the result.

use clap::Parser;
use factor_logic::{synthesize_with, Expr, HistoryEvent, SynthesisConfig, DEFAULT_RECTANGLE_CAP};
use serde::Serialize;
use std::io::Read;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "factor")]
#[command(about = "Algebraic multi-level factorisation of sum-of-products expressions")]
#[command(version)]
struct Args {
    /// Input expression, e.g. "ab + ac + ad" (reads stdin when omitted)
    #[arg(value_name = "EXPRESSION")]
    expression: Option<String>,

    /// Print the synthesis history after the network
    #[arg(short = 's', long = "history")]
    history: bool,

    /// List the cubes of the input one per line before factoring
    #[arg(short = 'c', long = "cubes")]
    cubes: bool,

    /// Emit the result as JSON
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Cap on enumerated rectangles per iteration
    #[arg(long = "max-rectangles", default_value_t = DEFAULT_RECTANGLE_CAP)]
    max_rectangles: usize,

    /// Prefix for generated node names
    #[arg(long = "prefix", default_value = "t")]
    prefix: String,
}

#[derive(Debug, Serialize)]
struct Report {
    root: String,
    defs: Vec<Definition>,
    literals_before: usize,
    literals_after: usize,
    steps: Vec<StepReport>,
}

#[derive(Debug, Serialize)]
struct Definition {
    name: String,
    expression: String,
}

#[derive(Debug, Serialize)]
struct StepReport {
    kind: &'static str,
    target: String,
    node: Option<String>,
    profit: Option<i64>,
    detail: String,
}

fn step_report(event: &HistoryEvent) -> StepReport {
    let kind = match event {
        HistoryEvent::Rectangle { .. } => "rectangle",
        HistoryEvent::SingleRow { .. } => "single-row",
        HistoryEvent::EnumerationCapped { .. } => "enumeration-capped",
        HistoryEvent::RectangleSkipped { .. } => "rectangle-skipped",
    };
    let target = match event {
        HistoryEvent::Rectangle { target, .. }
        | HistoryEvent::SingleRow { target, .. }
        | HistoryEvent::EnumerationCapped { target, .. }
        | HistoryEvent::RectangleSkipped { target, .. } => target.to_string(),
    };
    StepReport {
        kind,
        target,
        node: event.node().map(|n| n.to_string()),
        profit: event.profit(),
        detail: event.to_string(),
    }
}

fn read_stdin() -> std::io::Result<String> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let input = match args.expression {
        Some(text) => text,
        None => match read_stdin() {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
        },
    };

    let f = match Expr::parse(input.trim()) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if args.cubes {
        println!("Input cubes:");
        println!("{}", f.cube_lines());
        println!();
    }

    let config = SynthesisConfig {
        max_rectangles: args.max_rectangles,
        node_prefix: args.prefix,
    };
    let result = synthesize_with(&f, &config);

    if args.json {
        let report = Report {
            root: result.network.root.to_string(),
            defs: result
                .network
                .defs
                .iter()
                .map(|(name, body)| Definition {
                    name: name.to_string(),
                    expression: body.to_string(),
                })
                .collect(),
            literals_before: f.literal_count(),
            literals_after: result.network.total_literals(),
            steps: result.history.iter().map(step_report).collect(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("{}", result.network);

    if args.history {
        println!();
        if result.history.is_empty() {
            println!("(No factorization found; expression returned unchanged.)");
        } else {
            println!("Steps:");
            for event in &result.history {
                println!("  {}", event);
            }
        }
    }
}
