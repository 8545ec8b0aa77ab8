//! # wireup
//!
//! A runtime object-graph resolver: given a registry of factories keyed by
//! opaque string tokens, wireup constructs dependent objects on demand,
//! supports singleton and bounded-pool reuse, nests scopes that override or
//! extend an ancestor's registry, and breaks synchronous dependency cycles
//! with deferred forwarding handles instead of recursing forever.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use wireup::{CachePolicy, Instance, Scope};
//!
//! struct Config {
//!     verbose: bool,
//! }
//!
//! struct Reporter {
//!     config: Rc<Config>,
//! }
//!
//! let scope = Scope::create();
//! scope.provide(
//!     "Config",
//!     |_, _| Ok(Rc::new(Config { verbose: true }) as Instance),
//!     Some(CachePolicy::Singleton),
//! );
//! scope.provide(
//!     "Reporter",
//!     |scope, _| {
//!         let config = scope.make_as::<Config>("Config")?;
//!         Ok(Rc::new(Reporter { config }) as Instance)
//!     },
//!     None,
//! );
//!
//! let reporter = scope.make_as::<Reporter>("Reporter").unwrap();
//! assert!(reporter.config.verbose);
//! ```
//!
//! ## Architecture
//!
//! The crate is a thin facade over the layer crates:
//!
//! - `domain` (`wireup-domain`) - tokens, cache policies, errors and the
//!   type-erased instance model
//! - `resolver` (`wireup-resolver`) - scopes, registries, instance pools
//!   and the cycle-breaking deferred handle
//!
//! wireup is a pure in-memory, single-threaded component: no file format,
//! no network protocol, no persisted or global state.

/// Domain layer: tokens, policies, errors, instances
pub use wireup_domain as domain;
/// Resolution engine: scopes, registries, caches, deferred handles
pub use wireup_resolver as resolver;

// Re-export the public API flat for everyday use
pub use wireup_domain::{CachePolicy, Error, Injectable, Instance, Result, Token};
pub use wireup_resolver::{Constructor, DeferredHandle, Provider, Scope};
