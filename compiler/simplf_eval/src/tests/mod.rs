//! Crate-level tests.
//!
//! Operator tests call the operator functions directly; the program tests
//! run whole statement lists through an interpreter with a buffer print
//! handler.


use simplf_ir::Stmt;

use crate::{buffer_handler, EvalError, InterpreterBuilder};

/// Run `program` in a fresh interpreter, returning the outcome and
/// everything printed before it finished.
fn run(program: &[Stmt]) -> (Result<(), EvalError>, String) {
    run_with_depth(program, None)
}

fn run_with_depth(program: &[Stmt], max_depth: Option<usize>) -> (Result<(), EvalError>, String) {
    let mut interpreter = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .max_call_depth(max_depth)
        .build();
    let result = interpreter.interpret(program);
    (result, interpreter.get_print_output())
}

/// Run `program`, which must succeed, and return its output.
#[track_caller]
fn output_of(program: &[Stmt]) -> String {
    let (result, output) = run(program);
    if let Err(err) = result {
        panic!("program failed: {err}\noutput so far:\n{output}");
    }
    output
}

/// Run `program`, which must fail, and return the error.
#[track_caller]
fn error_of(program: &[Stmt]) -> EvalError {
    match run(program) {
        (Err(err), _) => err,
        (Ok(()), output) => panic!("program succeeded with output:\n{output}"),
    }
}
