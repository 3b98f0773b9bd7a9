//! Source location spans.
//!
//! A span records where the token that produced a node starts. Runtime
//! errors carry one so the driver can point at the offending line.

use std::fmt;

/// Source location of a token.
///
/// Lines and columns are 1-based. `Span::DUMMY` (all zeros) marks nodes
/// that were synthesized rather than parsed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Span for generated code.
    pub const DUMMY: Span = Span { line: 0, column: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Span { line, column }
    }

    /// Check if this is the dummy span.
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
