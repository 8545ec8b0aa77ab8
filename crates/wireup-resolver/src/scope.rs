//! Scope Hierarchy & Resolution Engine
//!
//! A [`Scope`] owns a token registry, an instance cache and the in-flight
//! resolution stack. Child scopes delegate provider and alias lookups to
//! their parent but never mutate it, and never inherit its cache state.
//!
//! ## Control flow
//!
//! ```text
//! make(token)
//!     │
//!     ▼
//! ┌──────────────────────────────┐
//! │ 1. local policy lookup        │  pool full → recycle, done
//! ├──────────────────────────────┤
//! │ 2. resolve                    │
//! │    a. alias? → make(target)   │  re-applies step 1 for the target
//! │    b. in flight? → deferred   │  DeferredHandle, no recursion
//! │    c. push; provider | parent │  pop on every exit path
//! ├──────────────────────────────┤
//! │ 3. admit into pool            │  unless deferred handle
//! └──────────────────────────────┘
//! ```
//!
//! Everything here is single-threaded and synchronous: a provider is an
//! ordinary function, and reentrancy happens only through synchronous
//! recursion back into [`Scope::make`]. Registry, cache and stacks are
//! owned exclusively by their scope; borrows are never held across a
//! provider call.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};
use wireup_domain::{CachePolicy, Error, Injectable, Instance, Result, Token};

use crate::cache::InstanceCache;
use crate::constructor::Constructor;
use crate::handle::DeferredHandle;
use crate::registry::{Provider, TokenRegistry};

/// One level of the scope hierarchy: registry, cache and resolution state.
///
/// Scopes are only handed out behind `Rc`; a root is created with
/// [`Scope::create`] and children with [`Scope::inner`]. The parent link is
/// fixed at creation and never reassigned.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use wireup_resolver::Scope;
/// use wireup_domain::{CachePolicy, Instance};
///
/// struct Clock;
///
/// let scope = Scope::create();
/// scope.provide(
///     "Clock",
///     |_, _| Ok(Rc::new(Clock) as Instance),
///     Some(CachePolicy::Singleton),
/// );
/// let a = scope.make("Clock").unwrap();
/// let b = scope.make("Clock").unwrap();
/// assert!(Rc::ptr_eq(&a, &b));
/// ```
pub struct Scope {
    parent: Option<Rc<Scope>>,
    self_ref: Weak<Scope>,
    registry: RefCell<TokenRegistry>,
    cache: RefCell<InstanceCache>,
    in_flight: RefCell<Vec<Token>>,
    alias_walk: RefCell<Vec<Token>>,
}

impl Scope {
    /// Create a new root scope with no parent
    pub fn create() -> Rc<Scope> {
        Self::new_scope(None)
    }

    /// Create a child scope delegating to this scope.
    ///
    /// The child starts with an empty registry and cache: it falls back to
    /// this scope for provider and alias lookups, but must register its own
    /// policy on a token to get a cache distinct from this scope's.
    pub fn inner(&self) -> Rc<Scope> {
        let parent = self
            .self_ref
            .upgrade()
            .expect("scopes are only handed out behind Rc");
        Self::new_scope(Some(parent))
    }

    fn new_scope(parent: Option<Rc<Scope>>) -> Rc<Scope> {
        Rc::new_cyclic(|self_ref| Scope {
            parent,
            self_ref: Weak::clone(self_ref),
            registry: RefCell::new(TokenRegistry::default()),
            cache: RefCell::new(InstanceCache::default()),
            in_flight: RefCell::new(Vec::new()),
            alias_walk: RefCell::new(Vec::new()),
        })
    }

    /// The parent scope, if this is not a root
    pub fn parent(&self) -> Option<Rc<Scope>> {
        self.parent.clone()
    }

    /// Register or overwrite the provider for a token.
    ///
    /// The previous provider, if any, is gone without trace. The cache
    /// policy is replaced as well: passing `None` clears a prior policy.
    pub fn provide<F>(&self, token: impl Into<Token>, provider: F, policy: Option<CachePolicy>)
    where
        F: Fn(&Scope, Option<&Constructor>) -> Result<Instance> + 'static,
    {
        let token = token.into();
        debug!(token = %token, policy = ?policy, "registered provider");
        self.registry
            .borrow_mut()
            .set_provider(token, Rc::new(provider), policy);
    }

    /// Alias a token to another, optionally attaching policy and hint.
    ///
    /// When the tokens differ, `concrete_token` becomes the alias target of
    /// `abstract_token`. A hint attaches to the concrete token, a policy to
    /// the abstract one. With equal tokens no alias is recorded: the call
    /// just attaches metadata to the token's own identity.
    pub fn bind(
        &self,
        policy: Option<CachePolicy>,
        abstract_token: impl Into<Token>,
        concrete_token: impl Into<Token>,
        hint: Option<Constructor>,
    ) {
        let abstract_token = abstract_token.into();
        let concrete_token = concrete_token.into();
        let mut registry = self.registry.borrow_mut();
        if abstract_token != concrete_token {
            debug!(token = %abstract_token, target = %concrete_token, "aliased token");
            registry.set_alias(abstract_token.clone(), concrete_token.clone());
        }
        if let Some(hint) = hint {
            registry.set_hint(concrete_token, hint);
        }
        if let Some(policy) = policy {
            registry.set_policy(abstract_token, policy);
        }
    }

    /// Resolve an instance for a token.
    ///
    /// Consults this scope's instance cache first, then resolves fresh:
    /// following alias indirection, breaking in-flight cycles with a
    /// [`DeferredHandle`], delegating to the parent when the token is not
    /// registered locally. Cache policy lookup and the cache itself are
    /// strictly local to this scope; only provider and alias lookup walk
    /// the ancestor chain.
    pub fn make(&self, token: impl Into<Token>) -> Result<Instance> {
        self.make_with(token.into(), None)
    }

    /// [`make`](Self::make) with an explicit constructor hint.
    ///
    /// The hint is supplied by call sites whose target is statically known
    /// to be a concrete class; it reaches the provider unchanged, falling
    /// back to the hint registered for the token when none is passed.
    pub fn make_with(&self, token: Token, hint: Option<Constructor>) -> Result<Instance> {
        let policy = self.registry.borrow().policy(&token);
        if let Some(policy) = policy {
            let recycled = self.cache.borrow_mut().recycle(&token, policy.capacity());
            if let Some(instance) = recycled {
                trace!(token = %token, "recycled pooled instance");
                return Ok(instance);
            }
        }
        let instance = self.resolve(&token, hint)?;
        if let Some(policy) = policy {
            if !DeferredHandle::is_deferred(&instance) {
                self.cache
                    .borrow_mut()
                    .admit(token, Rc::clone(&instance), policy.capacity());
            }
        }
        Ok(instance)
    }

    /// Typed variant of [`make`](Self::make)
    pub fn make_as<T: Injectable>(&self, token: impl Into<Token>) -> Result<Rc<T>> {
        let token = token.into();
        self.make_with(token.clone(), None)?
            .downcast_rc::<T>()
            .map_err(|_| Error::instance_type(&token))
    }

    /// Internal resolution step: alias redirection, cycle detection,
    /// provider invocation or delegation to the parent.
    fn resolve(&self, token: &Token, hint: Option<Constructor>) -> Result<Instance> {
        let alias = self.registry.borrow().alias_target(token);
        if let Some(target) = alias {
            return self.redirect(token, target, hint);
        }

        if self.in_flight.borrow().contains(token) {
            trace!(token = %token, "token in flight, deferring resolution");
            let scope = Weak::clone(&self.self_ref);
            let deferred = token.clone();
            let handle: Instance = Rc::new(DeferredHandle::new(token.clone(), move || {
                let scope = scope
                    .upgrade()
                    .ok_or_else(|| Error::scope_dropped(&deferred))?;
                scope.make_with(deferred.clone(), hint.clone())
            }));
            return Ok(handle);
        }

        self.in_flight.borrow_mut().push(token.clone());
        let produced = self.invoke_or_delegate(token, hint);
        self.in_flight.borrow_mut().pop();
        produced
    }

    /// Follow an alias by re-entering the public `make` with the target,
    /// which re-applies the target's own policy lookup. Guards against
    /// configurations that alias tokens back to themselves transitively.
    fn redirect(&self, token: &Token, target: Token, hint: Option<Constructor>) -> Result<Instance> {
        if self.alias_walk.borrow().contains(token) {
            return Err(Error::alias_cycle(token));
        }
        trace!(token = %token, target = %target, "following alias");
        self.alias_walk.borrow_mut().push(token.clone());
        let produced = self.make_with(target, hint);
        self.alias_walk.borrow_mut().pop();
        produced
    }

    fn invoke_or_delegate(&self, token: &Token, hint: Option<Constructor>) -> Result<Instance> {
        let provider = self.registry.borrow().provider(token);
        match provider {
            Some(provider) => {
                let hint = hint.or_else(|| self.registry.borrow().hint(token));
                // The alias walk guards uninterrupted alias chains only; a
                // provider re-requesting an aliased token mid-construction
                // is the in-flight stack's case, not an alias cycle.
                let walk = self.alias_walk.take();
                let produced = provider(self, hint.as_ref());
                self.alias_walk.replace(walk);
                produced
            }
            None => match &self.parent {
                Some(parent) => {
                    trace!(token = %token, "delegating to parent scope");
                    parent.resolve(token, hint)
                }
                None => Err(Error::missing_provider(token)),
            },
        }
    }

    /// All tokens registered on this scope, sorted for display
    pub fn registered_tokens(&self) -> Vec<Token> {
        self.registry.borrow().tokens()
    }

    /// Number of instances currently pooled for a token on this scope
    pub fn cached(&self, token: impl Into<Token>) -> usize {
        let token = token.into();
        self.cache.borrow().len(&token)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("root", &self.parent.is_none())
            .field("registered", &self.registry.borrow().len())
            .field("in_flight", &self.in_flight.borrow().len())
            .finish()
    }
}
