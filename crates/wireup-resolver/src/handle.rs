//! Deferred Handles - cycle-breaking indirection
//!
//! When resolution detects that a token currently under construction is
//! requested again, it cannot recurse. It hands back a [`DeferredHandle`]
//! instead. The handle stores the deferred action ("resolve this token
//! again") and runs it at most once, on the first [`get`](DeferredHandle::get),
//! caching the realized instance for the rest of its lifetime. Every
//! subsequent `get` returns the same instance.
//!
//! ## Pattern
//!
//! ```text
//! make(A) → provider(A) → make(B) → provider(B) → make(A)   ← in flight
//!                                                     │
//!                                                     ▼
//!                                             DeferredHandle(A)
//!                                                     │
//!                         (after both constructions)  ▼
//!                                  handle.get() → make(A) → cached A
//! ```
//!
//! Rust offers no interception of arbitrary operations on a value, so this
//! is the explicit-indirection rendition of a forwarding placeholder:
//! consumers route every use through `get()` (or [`get_as`](DeferredHandle::get_as)),
//! and transparent field access or mutation through the handle is
//! unsupported. `get()` returns the realized instance itself, so methods
//! invoked on it observe the real instance's identity, never the handle's.
//!
//! ## Limitation
//!
//! A constructor that synchronously dereferences its own handle before the
//! original cycle finishes cannot be helped: the deferred action runs while
//! the token is still in flight and yields yet another unrealized handle.
//! Re-entering `get()` on the *same* handle during its own realization is
//! reported as [`Error::UnbreakableCycle`]. Both are application-level
//! misuse of a circular dependency, not engine failures.

use std::cell::RefCell;
use std::rc::Rc;

use wireup_domain::{Error, Injectable, Instance, Result, Token};

type DeferredAction = Rc<dyn Fn() -> Result<Instance>>;

enum HandleState {
    Deferred(DeferredAction),
    Realizing,
    Realized(Instance),
}

/// Deferred, forwarding stand-in for the eventual result of a resolution.
///
/// Produced by the resolution engine to break synchronous dependency
/// cycles; can also be constructed directly for manual lazy wiring.
pub struct DeferredHandle {
    token: Token,
    state: RefCell<HandleState>,
}

impl DeferredHandle {
    /// Create a handle that defers `action` until the first `get`
    pub fn new<F>(token: impl Into<Token>, action: F) -> Self
    where
        F: Fn() -> Result<Instance> + 'static,
    {
        Self {
            token: token.into(),
            state: RefCell::new(HandleState::Deferred(Rc::new(action))),
        }
    }

    /// The token this handle defers
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Realize the deferred instance, running the action on first call.
    ///
    /// On success the realized instance is cached and returned from every
    /// later call without re-running the action. On failure the handle
    /// restores its deferred state and propagates the error, so a later
    /// `get` retries.
    pub fn get(&self) -> Result<Instance> {
        let action = {
            let state = self.state.borrow();
            match &*state {
                HandleState::Realized(instance) => return Ok(Rc::clone(instance)),
                HandleState::Realizing => return Err(Error::unbreakable_cycle(&self.token)),
                HandleState::Deferred(action) => Rc::clone(action),
            }
        };
        // The action re-enters the scope and may reach this handle again;
        // no state borrow may be live while it runs.
        *self.state.borrow_mut() = HandleState::Realizing;
        match action() {
            Ok(instance) => {
                *self.state.borrow_mut() = HandleState::Realized(Rc::clone(&instance));
                Ok(instance)
            }
            Err(err) => {
                *self.state.borrow_mut() = HandleState::Deferred(action);
                Err(err)
            }
        }
    }

    /// Typed variant of [`get`](Self::get)
    pub fn get_as<T: Injectable>(&self) -> Result<Rc<T>> {
        self.get()?
            .downcast_rc::<T>()
            .map_err(|_| Error::instance_type(&self.token))
    }

    /// Whether the deferred action has already run successfully
    pub fn is_realized(&self) -> bool {
        matches!(&*self.state.borrow(), HandleState::Realized(_))
    }

    /// Whether an instance is a deferred handle.
    ///
    /// Used by the resolution engine to keep handles out of instance pools.
    pub fn is_deferred(instance: &Instance) -> bool {
        instance.is::<DeferredHandle>()
    }
}

impl std::fmt::Debug for DeferredHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredHandle")
            .field("token", &self.token)
            .field("realized", &self.is_realized())
            .finish()
    }
}
