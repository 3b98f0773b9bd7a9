//! Simplf CLI
//!
//! Runs programs stored as JSON syntax trees.

use std::path::Path;

use simplfc::{dump_file, init_tracing, run_file, RunConfig};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let mut config = RunConfig::default();
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                if let Some(depth) = arg.strip_prefix("--max-depth=") {
                    let Ok(depth) = depth.parse::<usize>() else {
                        eprintln!("error: invalid --max-depth value '{depth}'");
                        std::process::exit(1);
                    };
                    config.max_call_depth = Some(depth);
                } else if arg == "--no-depth-limit" {
                    config.max_call_depth = None;
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                } else {
                    eprintln!("error: unexpected argument '{arg}'");
                    std::process::exit(1);
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: simplfc run <program.json> [--max-depth=N] [--no-depth-limit]");
                std::process::exit(1);
            };

            std::process::exit(run_file(Path::new(path), &config));
        }
        "dump" => {
            if args.len() < 3 {
                eprintln!("Usage: simplfc dump <program.json>");
                std::process::exit(1);
            }
            std::process::exit(dump_file(Path::new(&args[2])));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Simplf evaluator");
    println!();
    println!("Usage: simplfc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>     Run a program (JSON syntax tree)");
    println!("  dump <file>    Print the syntax tree of a program");
    println!("  help           Show this message");
    println!();
    println!("Run options:");
    println!("  --max-depth=N      Fail once N calls are nested (default: 256)");
    println!("  --no-depth-limit   Only the host stack bounds recursion");
    println!();
    println!("Environment:");
    println!("  SIMPLF_LOG     Tracing filter, e.g. SIMPLF_LOG=simplf_eval=debug");
}
