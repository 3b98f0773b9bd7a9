//! Runtime error types and control-flow signals.
//!
//! `EvalErrorKind` carries the structured category; `EvalError` adds the
//! source location and, for errors raised inside calls, a backtrace.
//! Factory functions (e.g. `division_by_zero()`) are the public way to
//! build errors; spans are attached by the interpreter at the node that
//! knows its token.

use std::fmt;

use simplf_ir::{BinaryOp, Name, Span, UnaryOp};

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Result of executing a statement.
pub type ExecResult = Result<(), ControlAction>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("operator `{op}` expects {expected}, got {got}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("can only call functions, got {type_name}")]
    NotCallable { type_name: &'static str },

    #[error("expected {expected} {}, got {got}", arguments_word(.expected))]
    ArityMismatch { expected: usize, got: usize },

    #[error("maximum recursion depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    #[error("cannot return from top-level code")]
    ReturnOutsideFunction,
}

fn arguments_word(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name.
    pub name: String,
    /// Location of the call site.
    pub span: Option<Span>,
}

/// Snapshot of the call stack where an error escaped a function body.
///
/// Frames are ordered most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Location of the token that caused the error.
    pub span: Option<Span>,
    /// Active calls when the error left the innermost function body.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a source location, replacing any existing one.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a source location unless one is already set.
    ///
    /// Errors bubble outward through every enclosing node; the innermost
    /// location is the useful one.
    #[must_use]
    pub fn with_span_if_missing(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Attach a backtrace unless one is already set.
    #[must_use]
    pub fn with_backtrace_if_missing(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    /// Human-readable message without location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "[{span}] {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Why statement execution stopped early.
///
/// `Return` is a signal, not a failure: it unwinds to the nearest call and
/// becomes that call's result. Errors unwind all the way to `interpret`.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Return(Value),
    Error(EvalError),
}

impl ControlAction {
    /// Convert to an error at a boundary that cannot absorb a return.
    pub fn into_eval_error(self) -> EvalError {
        match self {
            ControlAction::Error(e) => e,
            ControlAction::Return(_) => return_outside_function(),
        }
    }
}

impl From<EvalError> for ControlAction {
    fn from(e: EvalError) -> Self {
        ControlAction::Error(e)
    }
}

// Factory functions

pub fn undefined_variable(name: &Name) -> EvalError {
    EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    }
    .into()
}

/// Both operands of a binary operator had unsupported kinds.
pub fn binary_type_mismatch(
    op: BinaryOp,
    expected: &'static str,
    left: &Value,
    right: &Value,
) -> EvalError {
    EvalErrorKind::TypeMismatch {
        op: op.as_symbol(),
        expected,
        got: format!("{} and {}", left.type_name(), right.type_name()),
    }
    .into()
}

pub fn unary_type_mismatch(op: UnaryOp, expected: &'static str, operand: &Value) -> EvalError {
    EvalErrorKind::TypeMismatch {
        op: op.as_symbol(),
        expected,
        got: operand.type_name().to_string(),
    }
    .into()
}

pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalErrorKind::NotCallable { type_name }.into()
}

pub fn arity_mismatch(expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch { expected, got }.into()
}

pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalErrorKind::StackOverflow { depth }.into()
}

pub fn return_outside_function() -> EvalError {
    EvalErrorKind::ReturnOutsideFunction.into()
}
