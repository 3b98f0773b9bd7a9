//! Environment for variable scoping in the interpreter.
//!
//! Scopes are persistent association lists. `define` never mutates: it
//! allocates a new list node pointing at the old head and returns a new
//! `Environment` view. Every view created earlier keeps seeing its own,
//! shorter list. Only a binding's value slot is mutable, so `assign`
//! through one view is visible through every view that shares the binding.
//!
//! ```text
//! E1 = global.define(x, 1)       E1:  [x=1]
//! E2 = E1.define(y, 2)           E2:  [y=2] -> [x=1]   (tail shared with E1)
//! E2.assign(x, 5)                E1 and E2 both see x=5
//! E3 = E1.define(x, 9)           E3:  [x=9] -> [x=1]   (E2 still sees x=5)
//! ```
//!
//! Environments, scopes and bindings are `Rc`-shared and single-threaded.

use std::cell::RefCell;
use std::fmt;
use std::iter;
use std::rc::{Rc, Weak};

use simplf_ir::Name;

use crate::errors::{undefined_variable, EvalError};
use crate::{EvalResult, Value};

/// One association-list node: a name, its value slot, and the rest of the
/// list (older bindings).
struct Binding {
    name: Name,
    slot: RefCell<Value>,
    next: Option<Rc<Binding>>,
}

/// An ordered list of bindings, newest first.
///
/// Cloning a scope shares all of its nodes.
#[derive(Clone, Default)]
struct Scope {
    head: Option<Rc<Binding>>,
}

impl Scope {
    /// Create an empty scope.
    fn new() -> Self {
        Scope { head: None }
    }

    /// A new scope with `name` prepended. The receiver is unchanged.
    #[must_use]
    fn prepend(&self, name: Name, value: Value) -> Scope {
        Scope {
            head: Some(Rc::new(Binding {
                name,
                slot: RefCell::new(value),
                next: self.head.clone(),
            })),
        }
    }

    fn bindings(&self) -> impl Iterator<Item = &Binding> {
        iter::successors(self.head.as_deref(), |b| b.next.as_deref())
    }

    /// The most recent binding of `name` in this scope only.
    fn find(&self, name: &Name) -> Option<&Binding> {
        self.bindings().find(|b| b.name == *name)
    }

    /// Look up `name` in this scope only.
    fn lookup(&self, name: &Name) -> Option<Value> {
        self.find(name).map(|b| b.slot.borrow().clone())
    }

    /// Names bound in this scope, newest first. Shadowed names repeat.
    fn names(&self) -> Vec<Name> {
        self.bindings().map(|b| b.name.clone()).collect()
    }

}

/// A scope plus a link to the enclosing environment.
///
/// `Environment` is an immutable view and cheap to clone. The root
/// (no enclosing link) is the global environment.
#[derive(Clone, Default)]
pub struct Environment {
    scope: Scope,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    /// An empty global environment.
    pub fn global() -> Self {
        Environment::default()
    }

    /// A fresh empty scope enclosed by `self`.
    ///
    /// Used for block entry and function calls.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment {
            scope: Scope::new(),
            enclosing: Some(Rc::new(self.clone())),
        }
    }

    /// Extend the nearest scope with a new binding.
    ///
    /// Returns a new view with the same enclosing parent. The receiver, and
    /// every environment cloned from it, never sees the new binding.
    #[must_use]
    pub fn define(&self, name: Name, value: Value) -> Self {
        Environment {
            scope: self.scope.prepend(name, value),
            enclosing: self.enclosing.clone(),
        }
    }

    /// Look up a variable, nearest scope first.
    pub fn get(&self, name: &Name) -> EvalResult {
        self.frames()
            .find_map(|env| env.scope.lookup(name))
            .ok_or_else(|| undefined_variable(name))
    }

    /// Overwrite the nearest binding of `name` in place.
    ///
    /// Never creates a binding. Fails with `UndefinedVariable` when no scope
    /// in the chain binds `name`.
    pub fn assign(&self, name: &Name, value: Value) -> Result<(), EvalError> {
        let binding = self
            .frames()
            .find_map(|env| env.scope.find(name))
            .ok_or_else(|| undefined_variable(name))?;
        *binding.slot.borrow_mut() = value;
        Ok(())
    }

    /// Whether any scope in the chain binds `name`.
    pub fn contains(&self, name: &Name) -> bool {
        self.frames().any(|env| env.scope.find(name).is_some())
    }

    /// The enclosing environment, or `None` at the root.
    pub fn enclosing(&self) -> Option<&Environment> {
        self.enclosing.as_deref()
    }

    pub fn is_global(&self) -> bool {
        self.enclosing.is_none()
    }

    /// Number of enclosing links between this view and the root.
    pub fn depth(&self) -> usize {
        self.frames().count() - 1
    }

    /// Names in the nearest scope, newest first.
    pub fn local_names(&self) -> Vec<Name> {
        self.scope.names()
    }

    /// This environment followed by each enclosing one, outward.
    fn frames(&self) -> impl Iterator<Item = &Environment> {
        iter::successors(Some(self), |env| env.enclosing.as_deref())
    }
}

/// The environment a function closes over.
///
/// A declared function's own binding is the newest node of the scope it
/// captures, and that binding's slot holds the function. The node is held
/// weakly so a function does not keep itself alive; the rest of the chain
/// is held strongly.
pub struct Closure {
    rest: Environment,
    own_binding: Option<Weak<Binding>>,
}

impl Closure {
    /// Capture `env` as it is.
    pub fn new(env: Environment) -> Self {
        Closure {
            rest: env,
            own_binding: None,
        }
    }

    /// Capture `env`, whose newest binding is about to hold the function
    /// being created.
    pub fn recursive(env: &Environment) -> Self {
        let Some(head) = &env.scope.head else {
            return Closure::new(env.clone());
        };
        Closure {
            rest: Environment {
                scope: Scope {
                    head: head.next.clone(),
                },
                enclosing: env.enclosing.clone(),
            },
            own_binding: Some(Rc::downgrade(head)),
        }
    }

    /// The captured environment.
    ///
    /// While the declaring scope is alive this shares its binding of the
    /// function's name. Once that scope is gone no other environment can
    /// reach the binding, so a fresh one bound to `this()` replaces it.
    pub fn environment(&self, name: &Name, this: impl FnOnce() -> Value) -> Environment {
        let Some(own_binding) = &self.own_binding else {
            return self.rest.clone();
        };
        match own_binding.upgrade() {
            Some(head) => Environment {
                scope: Scope { head: Some(head) },
                enclosing: self.rest.enclosing.clone(),
            },
            None => self.rest.define(name.clone(), this()),
        }
    }
}

// Bindings may hold closures that point back at this environment, so only
// names are printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("locals", &self.scope.names())
            .field("depth", &self.depth())
            .finish()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests;
