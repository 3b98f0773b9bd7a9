//! Simplf driver library.
//!
//! Loads a program file (a JSON-serialized syntax tree), runs it through
//! `simplf_eval`, and turns the outcome into a report and a process exit
//! code. `main.rs` only parses arguments and calls into here.

use std::path::{Path, PathBuf};
use std::sync::Once;

use serde::{Deserialize, Serialize};
use simplf_eval::{stdout_handler, EvalError, InterpreterBuilder, SharedPrintHandler};
use simplf_ir::Stmt;

/// Exit code for a program that ran to completion.
pub const EXIT_OK: i32 = 0;
/// Exit code for a program file that could not be read or decoded.
pub const EXIT_LOAD_ERROR: i32 = 65;
/// Exit code for a program that failed while running.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// Call depth limit used unless the command line overrides it.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Failure to obtain a program from a file.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not a valid program: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk program format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    /// Parse a program from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Render the program as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Read and decode a program file.
pub fn load_program(path: &Path) -> Result<Program, DriverError> {
    let text = std::fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = Program::from_json(&text).map_err(|source| DriverError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        statements = program.statements.len(),
        "loaded program"
    );
    Ok(program)
}

/// Settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// `None` leaves recursion bounded only by the host stack.
    pub max_call_depth: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_call_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Run `program`, sending `print` output to `output`.
pub fn run_program(
    program: &Program,
    config: &RunConfig,
    output: SharedPrintHandler,
) -> Result<(), EvalError> {
    let mut interpreter = InterpreterBuilder::new()
        .print_handler(output)
        .max_call_depth(config.max_call_depth)
        .build();
    interpreter.interpret(&program.statements)
}

/// Render a runtime error the way the driver prints it.
///
/// The first line is `runtime error: ` followed by the error; a backtrace,
/// when present, follows on its own lines.
pub fn format_runtime_error(err: &EvalError) -> String {
    let mut report = format!("runtime error: {err}\n");
    if let Some(backtrace) = &err.backtrace {
        report.push_str(&backtrace.to_string());
    }
    report
}

/// Load and run the program at `path`, reporting to stderr.
///
/// Returns the process exit code.
pub fn run_file(path: &Path, config: &RunConfig) -> i32 {
    let program = match load_program(path) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: {err}");
            return EXIT_LOAD_ERROR;
        }
    };
    match run_program(&program, config, stdout_handler()) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            eprint!("{}", format_runtime_error(&err));
            EXIT_RUNTIME_ERROR
        }
    }
}

/// Load the program at `path` and print its tree to stdout.
pub fn dump_file(path: &Path) -> i32 {
    match load_program(path) {
        Ok(program) => {
            println!("{:#?}", program.statements);
            EXIT_OK
        }
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_LOAD_ERROR
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber if `SIMPLF_LOG` or `RUST_LOG` is set.
///
/// Output is a `tracing-tree` hierarchy on stderr, so instrumented calls
/// nest visually. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let directives = std::env::var("SIMPLF_LOG").or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            tracing_subscriber::registry()
                .with(EnvFilter::new(directives))
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .init();
        }
    });
}
