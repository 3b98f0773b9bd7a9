//! Simplf IR - syntax tree types for the Simplf evaluator.
//!
//! This crate contains the data the parser hands to the evaluator:
//! - Spans for source locations (line/column)
//! - Names for identifiers
//! - Expression and statement trees
//! - Construction helpers for writing trees by hand (`build`)
//!
//! The crate has no behavior of its own. Scanning and parsing live outside
//! this workspace; their output is a `Vec<Stmt>` built from these types.
//!
//! # Serialization
//!
//! With the `serde` feature every node derives `Serialize`/`Deserialize`
//! (externally tagged enums), which is the program format read by `simplfc`.

pub mod ast;
pub mod build;
mod name;
mod span;

pub use ast::{BinaryOp, Expr, FunctionDecl, Ident, Literal, LogicalOp, Stmt, UnaryOp};
pub use name::Name;
pub use span::Span;
