//! Runtime values.
//!
//! The value set is closed: nil, booleans, numbers, strings and functions.
//! Values are cheap to clone; strings and functions are reference counted.

use std::fmt;
use std::rc::Rc;

use simplf_ir::{FunctionDecl, Literal, Name};

use crate::{Closure, Environment};

/// A dynamically typed runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Function(Rc<FunctionValue>),
}

impl Value {
    /// Create a string value.
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    /// Create a function value closing over `closure`.
    pub fn function(declaration: Rc<FunctionDecl>, closure: Closure) -> Self {
        Value::Function(Rc::new(FunctionValue {
            declaration,
            closure,
        }))
    }

    /// The value of a literal node.
    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::Str(s) => Value::Str(Rc::clone(s)),
        }
    }

    /// Truthiness: `nil` and `false` are falsy, everything else is truthy.
    ///
    /// `0` and the empty string are truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
        }
    }
}

/// Equality never fails across kinds: values of different kinds are unequal,
/// functions compare by identity.
///
/// Numbers compare by value, not IEEE `==`: every `NaN` equals every other
/// `NaN`, and `0` differs from `-0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => same_number(*a, *b),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[inline]
fn same_number(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

/// The text `print` writes for a value.
///
/// Integral numbers print without a fractional part (`3`, not `3.0`);
/// infinities print as `Infinity` and `-Infinity`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if n.is_sign_positive() { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// A user-defined function together with its lexical closure.
pub struct FunctionValue {
    declaration: Rc<FunctionDecl>,
    closure: Closure,
}

impl FunctionValue {
    pub fn name(&self) -> &Name {
        &self.declaration.name.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.declaration.arity()
    }

    pub fn declaration(&self) -> &FunctionDecl {
        &self.declaration
    }

    /// The environment that was current where the function was declared.
    pub fn closure(self: &Rc<Self>) -> Environment {
        self.closure
            .environment(self.name(), || Value::Function(Rc::clone(self)))
    }

    /// Build the environment a call runs in.
    ///
    /// A fresh scope enclosed by the closure (not the caller), extended with
    /// one binding per parameter in declaration order. The caller has
    /// already checked the argument count.
    pub fn bind_arguments(self: &Rc<Self>, args: &[Value]) -> Environment {
        self.declaration
            .params
            .iter()
            .zip(args)
            .fold(self.closure().child(), |env, (param, arg)| {
                env.define(param.name.clone(), arg.clone())
            })
    }
}

// The closure usually contains this function, so the derived impl would
// recurse forever.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", self.name())
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}
