//! Error handling types

use thiserror::Error;

use crate::token::Token;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the wireup resolver
///
/// Every variant that concerns a token carries the token's human-readable
/// name (any suffix starting at `@` stripped), never the raw form.
#[derive(Error, Debug)]
pub enum Error {
    /// No provider registered for a token anywhere in the ancestor chain
    #[error("no provider registered for '{token}'")]
    MissingProvider {
        /// Human-readable name of the unresolved token
        token: String,
    },

    /// A token was revisited during an uninterrupted alias chain
    #[error("alias cycle detected at '{token}'")]
    AliasCycle {
        /// Human-readable name of the token that closed the cycle
        token: String,
    },

    /// A pool policy was constructed with capacity zero
    #[error("pool capacity must be at least 1, got {given}")]
    InvalidCapacity {
        /// The rejected capacity
        given: usize,
    },

    /// A deferred handle was re-entered while its own realization was running
    #[error("cycle at '{token}' cannot be broken: deferred handle re-entered during realization")]
    UnbreakableCycle {
        /// Human-readable name of the deferred token
        token: String,
    },

    /// A deferred handle outlived the scope it was created on
    #[error("scope for '{token}' was dropped before deferred resolution")]
    ScopeDropped {
        /// Human-readable name of the deferred token
        token: String,
    },

    /// A typed accessor asked for a type the resolved instance does not have
    #[error("instance for '{token}' is not of the requested type")]
    InstanceType {
        /// Human-readable name of the mistyped token
        token: String,
    },

    /// A provider failed while constructing an instance
    #[error("provider for '{token}' failed: {message}")]
    Provider {
        /// Human-readable name of the token under construction
        token: String,
        /// Description of the provider failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a missing-provider error
    pub fn missing_provider(token: &Token) -> Self {
        Self::MissingProvider {
            token: token.name().to_string(),
        }
    }

    /// Create an alias-cycle error
    pub fn alias_cycle(token: &Token) -> Self {
        Self::AliasCycle {
            token: token.name().to_string(),
        }
    }

    /// Create an unbreakable-cycle error
    pub fn unbreakable_cycle(token: &Token) -> Self {
        Self::UnbreakableCycle {
            token: token.name().to_string(),
        }
    }

    /// Create a scope-dropped error
    pub fn scope_dropped(token: &Token) -> Self {
        Self::ScopeDropped {
            token: token.name().to_string(),
        }
    }

    /// Create an instance-type error
    pub fn instance_type(token: &Token) -> Self {
        Self::InstanceType {
            token: token.name().to_string(),
        }
    }

    /// Create a provider error
    pub fn provider<S: Into<String>>(token: &Token, message: S) -> Self {
        Self::Provider {
            token: token.name().to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a provider error with source
    pub fn provider_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        token: &Token,
        message: S,
        source: E,
    ) -> Self {
        Self::Provider {
            token: token.name().to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
