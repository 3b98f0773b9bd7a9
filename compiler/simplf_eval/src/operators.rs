//! Binary operator implementations for the evaluator.
//!
//! Both operands are already evaluated (left before right). Short-circuit
//! operators never reach this module; see `Interpreter::eval_logical`.

use simplf_ir::BinaryOp;

use crate::errors::{binary_type_mismatch, division_by_zero, EvalError};
use crate::{EvalResult, Value};

/// Evaluate a binary operation.
#[allow(
    clippy::needless_pass_by_value,
    reason = "`,` hands back the right operand; callers own both already"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => eval_add(&left, &right),
        BinaryOp::Sub => numbers(op, &left, &right).map(|(a, b)| Value::Number(a - b)),
        BinaryOp::Mul => numbers(op, &left, &right).map(|(a, b)| Value::Number(a * b)),
        BinaryOp::Div => {
            let (a, b) = numbers(op, &left, &right)?;
            checked_div(a, b)
        }
        BinaryOp::Greater => numbers(op, &left, &right).map(|(a, b)| Value::Bool(a > b)),
        BinaryOp::GreaterEqual => numbers(op, &left, &right).map(|(a, b)| Value::Bool(a >= b)),
        BinaryOp::Less => numbers(op, &left, &right).map(|(a, b)| Value::Bool(a < b)),
        BinaryOp::LessEqual => numbers(op, &left, &right).map(|(a, b)| Value::Bool(a <= b)),
        BinaryOp::Equal => Ok(Value::Bool(left == right)),
        BinaryOp::NotEqual => Ok(Value::Bool(left != right)),
        BinaryOp::Comma => Ok(right),
    }
}

/// `+` adds numbers; if either side is a string both sides are rendered
/// and concatenated.
fn eval_add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::string(format!("{left}{right}"))),
        _ => Err(binary_type_mismatch(
            BinaryOp::Add,
            "two numbers or a string",
            left,
            right,
        )),
    }
}

/// Both operands as numbers, or a type mismatch naming the operator.
#[inline]
fn numbers(op: BinaryOp, left: &Value, right: &Value) -> Result<(f64, f64), EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(binary_type_mismatch(op, "numbers", left, right)),
    }
}

/// Division with an exact-zero guard (`-0` counts as zero).
#[allow(clippy::float_cmp, reason = "only an exact zero divisor is rejected")]
fn checked_div(a: f64, b: f64) -> EvalResult {
    if b == 0.0 {
        Err(division_by_zero())
    } else {
        Ok(Value::Number(a / b))
    }
}
