//! Command-line interface for json-build
//! Parses JSON files and prints the value tree each one builds.
//!
//! Usage:
//!   json-build `<path>...`                      - Print each document in compact form
//!   json-build --pretty `<path>...`             - Print indented documents
//!   json-build --max-depth `<n>` `<path>...`    - Limit array/object nesting (0 = unlimited,
//!                                                 deep input may then overflow the stack)
//!   json-build --config `<file>` `<path>...`    - Read parse options from a JSON settings file
//!
//! Set `RUST_LOG=debug` (or `trace`) to see what the parser is doing.

use clap::{Arg, ArgAction, Command};
use json_build::{parse_with, ParseOptions};
use std::path::Path;

fn main() {
    env_logger::init();

    let matches = cli().get_matches();

    let mut options = match matches.get_one::<String>("config") {
        Some(path) => load_options(path),
        None => ParseOptions::default(),
    };
    if let Some(&depth) = matches.get_one::<usize>("max-depth") {
        options = options.with_max_depth(depth_limit(depth));
    }
    if options.max_depth.is_none() {
        log::warn!("nesting depth is unlimited; deeply nested input can overflow the stack");
    }
    let pretty = matches.get_flag("pretty");

    let mut failed = false;
    for path in matches.get_many::<String>("paths").into_iter().flatten() {
        if !handle_file(path, &options, pretty) {
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("json-build")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse JSON files into value trees and print them")
        .arg_required_else_help(true)
        .arg(
            Arg::new("paths")
                .help("JSON files to parse")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .short('p')
                .help("Indent the printed documents")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help(
                    "Deepest allowed nesting of arrays and objects \
                     (0 = unlimited, may overflow the stack)",
                )
                .long_help(
                    "Deepest allowed nesting of arrays and objects. 0 removes the limit; \
                     deeply nested input can then overflow the stack and abort the process.",
                )
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON file with parse options, e.g. {\"max_depth\": 64}"),
        )
}

/// `--max-depth` value to limit; 0 means no limit
fn depth_limit(depth: usize) -> Option<usize> {
    if depth == 0 {
        None
    } else {
        Some(depth)
    }
}

/// Load parse options from a settings file, exiting on error
fn load_options(path: &str) -> ParseOptions {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {}", path, e);
        std::process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Invalid config {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Parse and print one file. Returns false if it could not be read or parsed.
fn handle_file(path: &str, options: &ParseOptions, pretty: bool) -> bool {
    let source = match std::fs::read_to_string(Path::new(path)) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file {}: {}", path, e);
            return false;
        }
    };

    match parse_with(&source, options) {
        Ok(value) => {
            if pretty {
                println!("{:#}", value);
            } else {
                println!("{}", value);
            }
            true
        }
        Err(e) => {
            eprintln!("{}:{}: {}", path, e.position(&source), e);
            false
        }
    }
}
