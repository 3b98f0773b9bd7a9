//! Shorthand constructors for syntax trees.
//!
//! Tests and embedders that do not go through a parser build programs with
//! these. Every node gets `Span::DUMMY`; build the node directly when a test
//! needs a real location.
//!
//! ```text
//! // var x = 1; print x + 2;
//! let program = vec![
//!     var_decl("x", Some(num(1.0))),
//!     print(binary(var("x"), BinaryOp::Add, num(2.0))),
//! ];
//! ```

use std::rc::Rc;

use crate::{BinaryOp, Expr, FunctionDecl, Ident, Literal, LogicalOp, Span, Stmt, UnaryOp};

pub fn ident(name: &str) -> Ident {
    Ident::new(name, Span::DUMMY)
}

// Expressions

pub fn nil() -> Expr {
    Expr::Literal(Literal::Nil)
}

pub fn boolean(value: bool) -> Expr {
    Expr::Literal(Literal::Bool(value))
}

pub fn num(value: f64) -> Expr {
    Expr::Literal(Literal::Number(value))
}

pub fn string(value: &str) -> Expr {
    Expr::Literal(Literal::Str(Rc::from(value)))
}

pub fn var(name: &str) -> Expr {
    Expr::Variable(ident(name))
}

pub fn group(inner: Expr) -> Expr {
    Expr::Grouping(Box::new(inner))
}

pub fn assign(name: &str, value: Expr) -> Expr {
    Expr::Assign {
        target: ident(name),
        value: Box::new(value),
    }
}

pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        span: Span::DUMMY,
        right: Box::new(right),
    }
}

pub fn logical(left: Expr, op: LogicalOp, right: Expr) -> Expr {
    Expr::Logical {
        left: Box::new(left),
        op,
        span: Span::DUMMY,
        right: Box::new(right),
    }
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary {
        op,
        span: Span::DUMMY,
        operand: Box::new(operand),
    }
}

pub fn ternary(cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::Conditional {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    }
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(callee),
        paren: Span::DUMMY,
        args,
    }
}

// Statements

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expression(expr)
}

pub fn print(expr: Expr) -> Stmt {
    Stmt::Print(expr)
}

pub fn var_decl(name: &str, initializer: Option<Expr>) -> Stmt {
    Stmt::Var {
        name: ident(name),
        initializer,
    }
}

pub fn block(statements: Vec<Stmt>) -> Stmt {
    Stmt::Block(statements)
}

pub fn if_stmt(cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
    Stmt::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    }
}

pub fn while_stmt(cond: Expr, body: Stmt) -> Stmt {
    Stmt::While {
        cond,
        body: Box::new(body),
    }
}

pub fn for_stmt(
    initializer: Option<Stmt>,
    cond: Option<Expr>,
    increment: Option<Expr>,
    body: Stmt,
) -> Stmt {
    Stmt::For {
        initializer: initializer.map(Box::new),
        cond,
        increment,
        body: Box::new(body),
    }
}

pub fn fun(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::Function(Rc::new(FunctionDecl {
        name: ident(name),
        params: params.iter().map(|p| ident(p)).collect(),
        body,
    }))
}

pub fn ret(value: Option<Expr>) -> Stmt {
    Stmt::Return {
        keyword: Span::DUMMY,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fun_builds_shared_declaration() {
        let Stmt::Function(decl) = fun("add", &["a", "b"], vec![ret(Some(var("a")))]) else {
            panic!("expected a function declaration");
        };
        assert_eq!(decl.name.name.as_str(), "add");
        assert_eq!(decl.arity(), 2);
        assert_eq!(decl.params[1], ident("b"));
        assert_eq!(decl.body, vec![ret(Some(var("a")))]);
    }

    #[test]
    fn if_without_else() {
        let stmt = if_stmt(boolean(true), print(num(1.0)), None);
        assert_eq!(
            stmt,
            Stmt::If {
                cond: boolean(true),
                then_branch: Box::new(print(num(1.0))),
                else_branch: None,
            }
        );
    }
}
