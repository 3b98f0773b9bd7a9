//! Tree-walking interpreter for Simplf.
//!
//! The interpreter holds the *current environment*. Statements either
//! leave it alone, replace it with an extended view (`var`, `fun`), or run
//! against a temporary one that is restored afterwards (blocks, `for`,
//! calls; see `scope_guard`).
//!
//! # Evaluation results
//!
//! - expressions return `EvalResult` (`Result<Value, EvalError>`)
//! - statements return `ExecResult` (`Result<(), ControlAction>`), where a
//!   `return` travels as `ControlAction::Return` up to the nearest call
//!
//! Errors get the span of the innermost node that knows its token, then
//! propagate unchanged.

mod builder;
mod function_call;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use simplf_ir::{Expr, FunctionDecl, Ident, LogicalOp, Name, Span, Stmt};

use crate::diagnostics::CallStack;
use crate::errors::{return_outside_function, ControlAction, EvalError, ExecResult};
use crate::print_handler::SharedPrintHandler;
use crate::{evaluate_binary, evaluate_unary, Closure, Environment, EvalResult, Value};

/// One evaluation session.
pub struct Interpreter {
    /// Current environment.
    pub(crate) env: Environment,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    /// Interpreter with stdout output, an empty global environment and no
    /// call depth limit.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Execute top-level statements in order.
    ///
    /// Stops at the first failure and returns it; later statements do not
    /// run. Bindings made by statements that completed stay in the
    /// environment, so a session can be continued with another call.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), EvalError> {
        for stmt in statements {
            if let Err(action) = self.execute(stmt) {
                let err = action.into_eval_error();
                tracing::debug!(error = %err, "evaluation aborted");
                return Err(err);
            }
        }
        Ok(())
    }

    /// The current environment.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Look up a variable in the current environment.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.env.get(&Name::new(name)).ok()
    }

    /// Number of function calls currently in progress.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Output captured by a buffer print handler.
    pub fn get_print_output(&self) -> String {
        self.print_handler.output()
    }

    pub fn clear_print_output(&self) {
        self.print_handler.clear();
    }

    // Statements

    /// Execute one statement.
    pub fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression(expr) => {
                self.eval(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.eval(expr)?;
                self.print_handler.println(&value.to_string());
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.eval(init)?,
                    None => Value::Nil,
                };
                self.declare(name, value);
                Ok(())
            }
            Stmt::Block(statements) => {
                self.with_child_scope(|scoped| scoped.execute_all(statements))
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { cond, body } => {
                while self.eval(cond)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::For {
                initializer,
                cond,
                increment,
                body,
            } => self.exec_for(initializer.as_deref(), cond.as_ref(), increment.as_ref(), body),
            Stmt::Function(decl) => self.declare_function(decl),
            Stmt::Return { keyword, value } => {
                if self.call_stack.is_empty() {
                    return Err(return_outside_function().with_span(*keyword).into());
                }
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Err(ControlAction::Return(value))
            }
        }
    }

    /// Execute statements in order against the current environment.
    ///
    /// Declarations among them extend the environment for the statements
    /// that follow.
    pub fn execute_all(&mut self, statements: &[Stmt]) -> ExecResult {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    /// Bind `name` in the current scope; later statements see it.
    fn declare(&mut self, name: &Ident, value: Value) {
        tracing::trace!(name = %name.name, "declare");
        self.env = self.env.define(name.name.clone(), value);
    }

    /// Declare a function that can see its own name.
    ///
    /// The name is bound to a placeholder first, the function captures the
    /// extended environment, then the placeholder slot is overwritten with
    /// the function itself. The capture holds that binding weakly, so the
    /// function and its slot do not keep each other alive.
    fn declare_function(&mut self, decl: &Rc<FunctionDecl>) -> ExecResult {
        let name = &decl.name;
        let env = self.env.define(name.name.clone(), Value::Nil);
        let function = Value::function(Rc::clone(decl), Closure::recursive(&env));
        env.assign(&name.name, function)
            .map_err(|e| e.with_span_if_missing(name.span))?;
        tracing::trace!(name = %name.name, arity = decl.arity(), "declare function");
        self.env = env;
        Ok(())
    }

    /// `for` runs as a block: the initializer binds in a fresh scope, then
    /// the body and increment repeat while the condition holds (forever if
    /// there is none).
    fn exec_for(
        &mut self,
        initializer: Option<&Stmt>,
        cond: Option<&Expr>,
        increment: Option<&Expr>,
        body: &Stmt,
    ) -> ExecResult {
        self.with_child_scope(|scoped| -> ExecResult {
            if let Some(init) = initializer {
                scoped.execute(init)?;
            }
            loop {
                if let Some(cond) = cond {
                    if !scoped.eval(cond)?.is_truthy() {
                        break;
                    }
                }
                scoped.execute(body)?;
                if let Some(increment) = increment {
                    scoped.eval(increment)?;
                }
            }
            Ok(())
        })
    }

    // Expressions

    /// Evaluate one expression.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(Value::from_literal(literal)),
            Expr::Grouping(inner) => self.eval(inner),
            Expr::Variable(ident) => self
                .env
                .get(&ident.name)
                .map_err(|e| e.with_span_if_missing(ident.span)),
            Expr::Assign { target, value } => {
                let value = self.eval(value)?;
                self.env
                    .assign(&target.name, value.clone())
                    .map_err(|e| e.with_span_if_missing(target.span))?;
                Ok(value)
            }
            Expr::Logical {
                left, op, right, ..
            } => self.eval_logical(left, *op, right),
            Expr::Binary {
                left,
                op,
                span,
                right,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary(left, right, *op).map_err(|e| e.with_span_if_missing(*span))
            }
            Expr::Unary { op, span, operand } => {
                let operand = self.eval(operand)?;
                evaluate_unary(&operand, *op).map_err(|e| e.with_span_if_missing(*span))
            }
            Expr::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            Expr::Call {
                callee,
                paren,
                args,
            } => self.eval_call_expr(callee, *paren, args),
        }
    }

    /// `or` yields the left operand if truthy, `and` if falsy; only
    /// otherwise is the right operand evaluated.
    fn eval_logical(&mut self, left: &Expr, op: LogicalOp, right: &Expr) -> EvalResult {
        let left = self.eval(left)?;
        let short_circuit = match op {
            LogicalOp::Or => left.is_truthy(),
            LogicalOp::And => !left.is_truthy(),
        };
        if short_circuit {
            Ok(left)
        } else {
            self.eval(right)
        }
    }

    fn eval_call_expr(&mut self, callee: &Expr, paren: Span, args: &[Expr]) -> EvalResult {
        let callee = self.eval(callee)?;
        let args = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>, _>>()?;
        self.eval_call(&callee, &args, paren)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
