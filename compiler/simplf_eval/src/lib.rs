//! Simplf Eval - environment model and tree-walking evaluator.
//!
//! # Architecture
//!
//! - `Environment`: persistent association-list scopes chained to an
//!   enclosing environment; `define` extends, `assign` mutates in place;
//!   `Closure` is what a function value captures
//! - `Interpreter`: walks statements against a current environment,
//!   restoring it around blocks and calls with an RAII guard
//! - `evaluate_binary` / `evaluate_unary`: operator semantics on values
//! - `CallStack`: call frames, optional depth limit, backtraces
//! - `PrintHandler`: where `print` output goes
//!
//! Evaluation is single-threaded; values and environments are `Rc`-based.

mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Closure, Environment};
pub use errors::{
    ControlAction, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, ExecResult,
};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandler,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{FunctionValue, Value};

#[cfg(test)]
mod tests;
