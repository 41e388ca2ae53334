// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hubgate gateway.
//!
//! Holds the service adapter contract, the shared error type, the declaration
//! and dispatch types, and the binary plugin contract used by dynamically
//! loaded services. Every adapter, builtin or dynamic, implements
//! [`ServiceAdapter`] from this crate.

pub mod error;
pub mod plugin;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BoxError, HubgateError};
pub use plugin::{PluginDeclaration, ServiceFactoryFn};
pub use traits::ServiceAdapter;
pub use types::{DispatchRequest, ServiceDeclaration, ServiceKind, PLUGIN_PATH_OPTION};
