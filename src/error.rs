//! Error types for programmer misuse and configuration problems.
//!
//! Malformed card data never produces one of these. Validation findings are
//! reported through [`Errors`](crate::Errors); the types here cover things
//! like naming a provider that is not in the catalog or installing the
//! process-wide policy twice.

use thiserror::Error;

/// A provider name could not be resolved against the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The name is not one of the twelve catalog providers.
    #[error("unknown card provider '{0}'")]
    Unknown(String),
}

/// Problems building or installing a [`Policy`](crate::Policy).
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A process-wide default policy has already been installed.
    #[error("a default policy is already installed")]
    AlreadyInstalled,

    /// The policy configuration could not be read.
    #[error("failed to read policy configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The policy configuration is not valid JSON for a policy.
    #[cfg(feature = "serde")]
    #[error("invalid policy configuration: {0}")]
    Json(#[from] serde_json::Error),
}
