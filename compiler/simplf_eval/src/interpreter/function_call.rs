//! Function call evaluation for the Interpreter.

use simplf_ir::Span;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::{arity_mismatch, not_callable, ControlAction};
use crate::{EvalResult, Value};

impl Interpreter {
    /// Call `callee` with already evaluated arguments.
    ///
    /// The body runs in a new environment chained to the function's closure,
    /// not to the caller's environment. The caller's environment is current
    /// again when this returns, whether the body returned, fell off the end
    /// (result `nil`) or failed.
    #[tracing::instrument(level = "debug", skip_all, fields(args = args.len()))]
    pub fn eval_call(&mut self, callee: &Value, args: &[Value], paren: Span) -> EvalResult {
        let Value::Function(function) = callee else {
            return Err(not_callable(callee.type_name()).with_span(paren));
        };
        if args.len() != function.arity() {
            return Err(arity_mismatch(function.arity(), args.len()).with_span(paren));
        }

        self.call_stack
            .push(CallFrame {
                name: function.name().clone(),
                call_span: Some(paren),
            })
            .map_err(|e| e.with_span(paren))?;
        tracing::debug!(function = %function.name(), depth = self.call_stack.depth(), "call");

        let call_env = function.bind_arguments(args);
        let outcome = self.with_env(call_env, |scoped| {
            scoped.execute_all(&function.declaration().body)
        });

        let result = match outcome {
            Ok(()) => Ok(Value::Nil),
            Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Error(err)) => Err(self.call_stack.attach_backtrace(err)),
        };
        self.call_stack.pop();
        result
    }
}
