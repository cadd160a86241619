//! Pool error taxonomy

use thiserror::Error;

/// Errors reported by pool operations
///
/// None of these are fatal: setup errors are contained per configuration
/// record and runtime errors are handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// A configuration record is missing its key or template
    #[error("Invalid pool configuration: {reason}")]
    Configuration {
        /// What was wrong with the record
        reason: String,
    },

    /// A pool is already registered under this key
    #[error("Pool already exists with key: {key}")]
    DuplicateKey {
        /// The key that was registered twice
        key: String,
    },

    /// No pool is registered under this key
    #[error("No pool found for key: {key}")]
    UnknownKey {
        /// The key that was looked up
        key: String,
    },

    /// The pooled template does not declare the requested capability
    #[error("Pool '{key}' does not provide capability {capability}")]
    CapabilityNotFound {
        /// Registry key of the pool that was asked, or the template name for
        /// a pool outside the registry
        key: String,
        /// Name of the requested capability type
        capability: &'static str,
    },

    /// The handle is not a currently active member of the pool
    #[error("Handle {handle} is not checked out from this pool")]
    ForeignHandle {
        /// Debug rendering of the offending handle
        handle: String,
    },
}

impl PoolError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration { reason: reason.into() }
    }

    pub(crate) fn foreign<I: std::fmt::Debug>(handle: I) -> Self {
        Self::ForeignHandle { handle: format!("{handle:?}") }
    }
}
