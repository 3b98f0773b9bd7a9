//! RAII guard for swapping the interpreter's current environment.
//!
//! Blocks, `for` loops and function calls run against a different
//! environment than their surroundings. [`ScopedInterpreter`] installs that
//! environment and puts the previous one back when dropped, so the restore
//! happens on normal completion, on `?` early returns, and during unwinding.
//!
//! ```text
//! interpreter.with_child_scope(|scoped| scoped.execute_all(statements))
//! // current environment is the pre-block one again, whatever happened
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::Environment;

/// Guard holding the interpreter while a swapped-in environment is current.
///
/// Derefs to [`Interpreter`], so evaluation goes through the guard.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved: Environment,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env = std::mem::take(&mut self.saved);
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Make `env` current until the returned guard is dropped.
    pub fn scoped(&mut self, env: Environment) -> ScopedInterpreter<'_> {
        let saved = std::mem::replace(&mut self.env, env);
        ScopedInterpreter {
            interpreter: self,
            saved,
        }
    }

    /// Run `f` with `env` as the current environment, then restore.
    pub fn with_env<T, F>(&mut self, env: Environment, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(env);
        f(&mut scoped)
    }

    /// Run `f` inside a fresh empty scope enclosed by the current one.
    pub fn with_child_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let child = self.env.child();
        tracing::trace!(depth = child.depth(), "enter scope");
        self.with_env(child, f)
    }
}
