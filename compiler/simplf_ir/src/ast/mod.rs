//! Syntax tree node definitions.
//!
//! Trees are owned and boxed. Function declarations sit behind `Rc` because
//! every function value created from a declaration keeps a handle to it.

mod operators;

use std::rc::Rc;

use crate::{Name, Span};

pub use operators::{BinaryOp, LogicalOp, UnaryOp};

/// An identifier occurrence: the name plus where it was written.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<Name>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

/// Constant embedded in the tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
}

/// Expression nodes. Each evaluates to exactly one value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Literal(Literal),
    Grouping(Box<Expr>),
    Variable(Ident),
    Assign {
        target: Ident,
        value: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        span: Span,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        span: Span,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        span: Span,
        operand: Box<Expr>,
    },
    /// `cond ? then_branch : else_branch`
    Conditional {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// Location of the closing parenthesis, reported for call errors.
        paren: Span,
        args: Vec<Expr>,
    },
}

/// A function declaration: `fun name(params) { body }`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Statement nodes. Statements produce effects, not values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    Expression(Expr),
    Print(Expr),
    Var {
        name: Ident,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// `for (initializer; cond; increment) body`. Every clause is optional.
    For {
        initializer: Option<Box<Stmt>>,
        cond: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    Function(Rc<FunctionDecl>),
    Return {
        keyword: Span,
        value: Option<Expr>,
    },
}
