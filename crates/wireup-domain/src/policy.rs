//! Cache policy value object
//!
//! A cache policy governs instance reuse for one token: `Singleton` keeps a
//! single instance, `Pool` keeps up to N and recycles them in
//! reverse-of-production order. Absence of a policy means every resolution
//! produces a fresh instance.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Instance reuse discipline attached to a token.
///
/// Serializes in snake_case so policies can be declared in configuration:
/// `"singleton"` or `{ "pool": 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// A single shared instance per scope (effective capacity 1)
    Singleton,
    /// A bounded pool of N instances, recycled in reverse-of-production order
    Pool(NonZeroUsize),
}

impl CachePolicy {
    /// Create a pool policy, rejecting a capacity of zero.
    ///
    /// # Example
    ///
    /// ```
    /// use wireup_domain::CachePolicy;
    ///
    /// assert_eq!(CachePolicy::pool(2).unwrap().capacity(), 2);
    /// assert!(CachePolicy::pool(0).is_err());
    /// ```
    pub fn pool(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(CachePolicy::Pool)
            .ok_or(Error::InvalidCapacity { given: capacity })
    }

    /// Maximum number of instances the policy retains
    pub fn capacity(self) -> usize {
        match self {
            CachePolicy::Singleton => 1,
            CachePolicy::Pool(n) => n.get(),
        }
    }
}
