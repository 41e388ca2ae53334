// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service registry, builtin catalog, and adapter loader.
//!
//! At startup the [`ServiceLoader`] turns each configured declaration into a
//! live adapter, either from the compiled-in [`BuiltinCatalog`] or from a
//! shared library on disk, and registers it in the [`ServiceRegistry`]. The
//! gateway then resolves every request through the registry.

pub mod catalog;
pub mod loader;
pub mod registry;

pub use catalog::{BuiltinCatalog, ServiceFactory};
pub use loader::ServiceLoader;
pub use registry::ServiceRegistry;
