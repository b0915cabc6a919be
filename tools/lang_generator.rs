//! Lang Generator: reads notation lines from STDIN and prints sentences.
//!
//! Usage: lang_generator [-t|--tree] [--config <file.ron>]
//!
//!   -t, --tree         also print the parse tree of every line
//!   --config <file>    load whitelist and display settings from RON

use lang_generator::core::pipeline::{LanguageGenerator, PipelineError};
use std::io;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut show_tree = false;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            // Case-insensitive, as the flag has always been accepted
            flag if flag.eq_ignore_ascii_case("-t") || flag == "--tree" => {
                show_tree = true;
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = LanguageGenerator::builder();
    if let Some(path) = config_path {
        builder = builder.config_file(path);
    }
    // Only force the flag on; a config file may enable trees by itself
    if show_tree {
        builder = builder.show_tree(true);
    }

    let mut generator = match builder.build() {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    match generator.run_lines(stdin.lock(), stdout.lock(), stderr.lock()) {
        Ok(_) => {}
        Err(PipelineError::Io(_)) => {
            eprintln!("Error: Could not read from STDIN.");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: lang_generator [-t|--tree] [--config <file.ron>]");
    println!();
    println!("Reads one notation line at a time from STDIN, for example:");
    println!("  Buy(a), Item(a,b), Name(b,\"Sword\"), Quantity(b,'2')");
    println!("and prints one sentence per recognized event:");
    println!("  WTB 2 Swords.");
}
