//! Command-line interface for helium
//! Parses a Helium document and writes its syntax tree as JSON or YAML.
//!
//! Usage:
//!   helium [`<path>`] [--rule `<rule>`] [--format `<format>`] [--output `<path>`]
//!
//! The input is read from `<path>`, or from stdin when no path is given.
//! The tree goes to stdout, or to the file named by `--output`.

use clap::{Arg, Command};
use std::io::Read;

use helium::helium::grammar::{ParseError, SyntaxNode};
use helium::helium::lang;

fn main() {
    let matches = Command::new("helium")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A parser for the Helium data-definition format")
        .arg(
            Arg::new("path")
                .help("Path to the Helium file (stdin when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("rule")
                .long("rule")
                .short('r')
                .help("Start rule to parse with")
                .default_value(lang::START_RULE),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format ('json' or 'yaml')")
                .default_value("json"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file (stdout when omitted)"),
        )
        .get_matches();

    let path = matches.get_one::<String>("path");
    let rule = matches.get_one::<String>("rule").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    let output = matches.get_one::<String>("output");

    let input = read_input(path.map(String::as_str));
    let node = parse_input(&input, rule);
    let rendered = render_tree(&node, format);
    write_output(&rendered, output.map(String::as_str));
}

/// Read the whole input up front; the parser wants one in-memory string.
fn read_input(path: Option<&str>) -> String {
    match path {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input).unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            });
            input
        }
    }
}

/// Parse, reporting the failure kind on error.
///
/// Grammar defects (unknown rules, bad patterns) exit with status 2;
/// input that fails to parse exits with status 1.
fn parse_input(input: &str, rule: &str) -> SyntaxNode {
    match lang::HELIUM.parse_rule(input, rule) {
        Ok(node) => node,
        Err(err) => {
            let kind = match &err {
                ParseError::UnknownRule { .. } => "grammar error",
                ParseError::InvalidPattern { .. } => "grammar error",
                ParseError::NoMatch { .. } => "no match",
                ParseError::Incomplete { .. } => "incomplete",
            };
            eprintln!("Error ({}): {}", kind, err);
            std::process::exit(if err.is_grammar_defect() { 2 } else { 1 });
        }
    }
}

/// Serialize the tree in the requested format.
fn render_tree(node: &SyntaxNode, format: &str) -> String {
    let rendered = match format {
        "json" => serde_json::to_string_pretty(node).map_err(|e| e.to_string()),
        "yaml" => serde_yaml::to_string(node).map_err(|e| e.to_string()),
        other => Err(format!("unknown format '{}'", other)),
    };
    rendered.unwrap_or_else(|e| {
        eprintln!("Error rendering tree: {}", e);
        std::process::exit(1);
    })
}

fn write_output(rendered: &str, output: Option<&str>) {
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, rendered) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
        }
        None => println!("{}", rendered),
    }
}
