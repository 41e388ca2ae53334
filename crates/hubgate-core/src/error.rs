// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hubgate gateway.

use thiserror::Error;

/// Boxed error source carried by load-time failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type shared by adapters, the loader, and the registry.
#[derive(Debug, Error)]
pub enum HubgateError {
    /// Configuration errors (missing options, malformed declarations).
    #[error("configuration error: {0}")]
    Config(String),

    /// A builtin declaration named a service the catalog does not know.
    #[error("builtin service not found: {name}")]
    UnknownBuiltinService { name: String },

    /// The shared library for a dynamic service could not be opened.
    #[error("failed to open plugin for service `{name}` at {path}: {source}")]
    PluginOpenFailed {
        name: String,
        path: String,
        source: BoxError,
    },

    /// The shared library does not export the plugin declaration.
    #[error("plugin for service `{name}` does not export `{symbol}`: {source}")]
    SymbolNotFound {
        name: String,
        symbol: String,
        source: BoxError,
    },

    /// The exported declaration exists but was built against another contract.
    #[error("plugin for service `{name}` has an incompatible factory: {detail}")]
    SignatureMismatch { name: String, detail: String },

    /// The adapter factory itself returned a failure.
    #[error("failed to construct service `{name}`: {source}")]
    AdapterConstruction { name: String, source: BoxError },

    /// An adapter failed to handle a request. The message is relayed to clients.
    #[error("{message}")]
    Adapter {
        message: String,
        source: Option<BoxError>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubgateError {
    /// Shorthand for an adapter failure with no underlying source.
    pub fn adapter(message: impl Into<String>) -> Self {
        HubgateError::Adapter {
            message: message.into(),
            source: None,
        }
    }

    /// Adapter failure wrapping an underlying error.
    pub fn adapter_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        HubgateError::Adapter {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns true for errors raised while loading services at startup.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            HubgateError::Config(_)
                | HubgateError::UnknownBuiltinService { .. }
                | HubgateError::PluginOpenFailed { .. }
                | HubgateError::SymbolNotFound { .. }
                | HubgateError::SignatureMismatch { .. }
                | HubgateError::AdapterConstruction { .. }
        )
    }
}
