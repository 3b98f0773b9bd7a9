//! Unary operator implementations for the evaluator.

use simplf_ir::UnaryOp;

use crate::errors::unary_type_mismatch;
use crate::{EvalResult, Value};

/// Evaluate a unary operation on an already evaluated operand.
///
/// `-` requires a number; `!` negates truthiness and accepts anything.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(unary_type_mismatch(op, "a number", operand)),
        },
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
    }
}
