//! Notation Linter: checks a file of notation lines before it is fed to
//! the generator.
//!
//! Usage: notation_linter <notation_file> [--config <file.ron>]

use lang_generator::core::builder::build_with_orphans;
use lang_generator::core::config::GeneratorConfig;
use lang_generator::core::events::fault;
use lang_generator::core::parser::TokenParser;
use lang_generator::core::sentence::{EventKind, Sentence};
use lang_generator::schema::token::ParseToken;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: notation_linter <notation_file> [--config <file.ron>]");
        process::exit(0);
    }

    let input_path = Path::new(&args[1]);
    let mut config_path = None;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            i += 1;
            config_path = Some(args[i].clone());
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => match GeneratorConfig::load_from_ron(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: Failed to load config file: {}", e);
                process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };

    let contents = match std::fs::read_to_string(input_path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("ERROR: Could not read '{}': {}", input_path.display(), e);
            process::exit(1);
        }
    };

    let (errors, warnings, checked) = lint_lines(&contents, &config);

    println!("Checked {} lines", checked);
    println!("\n=== Notation Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

/// Returns (errors, warnings, number of non-blank lines checked).
fn lint_lines(contents: &str, config: &GeneratorConfig) -> (Vec<String>, Vec<String>, usize) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut parser = TokenParser::new();
    let mut checked = 0;

    for (index, line) in contents.lines().enumerate() {
        let number = index + 1;
        // Blank lines and `#` comments are allowed in notation files
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        checked += 1;

        let tokens = match parser.parse(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                errors.push(format!("line {}: {}", number, e));
                continue;
            }
        };

        lint_tokens(number, tokens, config, &mut warnings);
    }

    (errors, warnings, checked)
}

/// Warnings for one parsed line.
fn lint_tokens(
    number: usize,
    tokens: Vec<ParseToken>,
    config: &GeneratorConfig,
    warnings: &mut Vec<String>,
) {
    let output = build_with_orphans(tokens);
    for token in &output.unreachable {
        warnings.push(format!(
            "line {}: token '{}' is not reachable from any root (parent '{}')",
            number,
            token.kind,
            token.parent.as_deref().unwrap_or("?")
        ));
    }

    let forest = &output.forest;
    for &root in forest.roots() {
        let token = forest.token(root);
        let Some(kind) = EventKind::from_token(token) else {
            warnings.push(format!(
                "line {}: root '{}' is not a known event and produces no sentence",
                number, token.kind
            ));
            continue;
        };

        let sentence = Sentence::assemble(forest, root, kind, config.whitelist.for_event(kind));
        for diagnostic in &sentence.diagnostics {
            warnings.push(format!("line {}: {}", number, diagnostic));
        }
        let rendered = sentence.render();
        if fault(&sentence).is_some() {
            warnings.push(format!("line {}: {}", number, rendered));
        } else if rendered.contains("< Error") {
            warnings.push(format!(
                "line {}: incomplete entity in \"{}\"",
                number, rendered
            ));
        }
    }
}
