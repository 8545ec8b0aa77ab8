//! Token Registry
//!
//! Per-scope table mapping tokens to their binding: an optional provider,
//! an optional cache policy, an optional alias target and an optional
//! constructor hint. Lookups are strictly local; walking the ancestor
//! chain is the resolution engine's job, never the registry's.

use std::collections::HashMap;
use std::rc::Rc;

use wireup_domain::{CachePolicy, Instance, Result, Token};

use crate::constructor::Constructor;
use crate::scope::Scope;

/// Factory registered for a token.
///
/// Receives the scope the resolution step runs against (so it can resolve
/// its own dependencies) and the constructor hint, if any. May call back
/// into [`Scope::make`] synchronously.
pub type Provider = Rc<dyn Fn(&Scope, Option<&Constructor>) -> Result<Instance>>;

/// Everything one scope knows about one token
#[derive(Default, Clone)]
struct Binding {
    provider: Option<Provider>,
    policy: Option<CachePolicy>,
    alias: Option<Token>,
    hint: Option<Constructor>,
}

/// Per-scope map from token to binding
#[derive(Default)]
pub struct TokenRegistry {
    bindings: HashMap<Token, Binding>,
}

impl TokenRegistry {
    /// Register or overwrite the provider for a token.
    ///
    /// The policy is overwritten as well: passing `None` clears any policy a
    /// previous registration attached. No trace of the old provider remains.
    pub fn set_provider(&mut self, token: Token, provider: Provider, policy: Option<CachePolicy>) {
        let binding = self.bindings.entry(token).or_default();
        binding.provider = Some(provider);
        binding.policy = policy;
    }

    /// Record `target` as the alias target of `token`
    pub fn set_alias(&mut self, token: Token, target: Token) {
        self.bindings.entry(token).or_default().alias = Some(target);
    }

    /// Attach a cache policy to a token without touching its provider
    pub fn set_policy(&mut self, token: Token, policy: CachePolicy) {
        self.bindings.entry(token).or_default().policy = Some(policy);
    }

    /// Associate a constructor hint with a token
    pub fn set_hint(&mut self, token: Token, hint: Constructor) {
        self.bindings.entry(token).or_default().hint = Some(hint);
    }

    /// Provider registered for a token, if any
    pub fn provider(&self, token: &Token) -> Option<Provider> {
        self.bindings.get(token).and_then(|b| b.provider.clone())
    }

    /// Cache policy attached to a token, if any
    pub fn policy(&self, token: &Token) -> Option<CachePolicy> {
        self.bindings.get(token).and_then(|b| b.policy)
    }

    /// Alias target of a token, if any
    pub fn alias_target(&self, token: &Token) -> Option<Token> {
        self.bindings.get(token).and_then(|b| b.alias.clone())
    }

    /// Constructor hint associated with a token, if any
    pub fn hint(&self, token: &Token) -> Option<Constructor> {
        self.bindings.get(token).and_then(|b| b.hint.clone())
    }

    /// Number of tokens this registry knows about
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether this registry is empty
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All registered tokens, sorted for stable diagnostic display
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens: Vec<Token> = self.bindings.keys().cloned().collect();
        tokens.sort();
        tokens
    }
}
