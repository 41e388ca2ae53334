// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builtin service adapters.
//!
//! Each adapter translates `(method, sub_path, body)` into calls against one
//! HTTP backend. [`builtin_catalog`] returns the table the loader uses to
//! resolve `kind = "builtin"` declarations.

pub mod echo;
mod http;
pub mod minio;
pub mod repocate;

use hubgate_registry::BuiltinCatalog;

pub use echo::EchoAdapter;
pub use minio::MinioAdapter;
pub use repocate::RepocateAdapter;

/// Add every builtin adapter to `catalog`.
pub fn register_builtins(catalog: &mut BuiltinCatalog) {
    catalog.register(minio::NAME, MinioAdapter::factory);
    catalog.register(repocate::NAME, RepocateAdapter::factory);
    catalog.register(echo::NAME, EchoAdapter::factory);
}

/// A catalog holding every builtin adapter.
pub fn builtin_catalog() -> BuiltinCatalog {
    let mut catalog = BuiltinCatalog::new();
    register_builtins(&mut catalog);
    catalog
}
