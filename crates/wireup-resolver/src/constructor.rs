//! Constructor hints
//!
//! When the external analysis stage knows a resolution target is a concrete
//! class, it passes the core a reference to that class's constructor along
//! with the statically-known tokens of its parameters. The core treats both
//! as opaque: it stores them, falls back to the registered hint when a call
//! site supplied none, and hands them to providers unchanged. It never
//! performs type introspection itself.

use std::fmt;
use std::rc::Rc;

use wireup_domain::{Instance, Result, Token};

use crate::scope::Scope;

/// Opaque reference to a concrete constructor plus its parameter tokens.
///
/// Cheap to clone; the build closure and parameter list are shared.
#[derive(Clone)]
pub struct Constructor {
    params: Rc<[Token]>,
    build: Rc<dyn Fn(&Scope) -> Result<Instance>>,
}

impl Constructor {
    /// Create a constructor hint from its parameter tokens and build closure
    pub fn new<I, T, F>(params: I, build: F) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
        F: Fn(&Scope) -> Result<Instance> + 'static,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            build: Rc::new(build),
        }
    }

    /// Statically-known tokens of the constructor's parameters
    pub fn params(&self) -> &[Token] {
        &self.params
    }

    /// Invoke the underlying constructor against a scope
    pub fn construct(&self, scope: &Scope) -> Result<Instance> {
        (self.build)(scope)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
