// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binary contract between the gateway and dynamically loaded service plugins.
//!
//! A plugin is a `cdylib` that exports exactly one static,
//! [`HUBGATE_PLUGIN_DECLARATION`](DECLARATION_SYMBOL), usually via the
//! [`export_service!`](crate::export_service) macro:
//!
//! ```ignore
//! use hubgate_core::{HubgateError, ServiceAdapter};
//!
//! fn create(endpoint: &str) -> Result<Box<dyn ServiceAdapter>, HubgateError> {
//!     Ok(Box::new(MyAdapter::new(endpoint)))
//! }
//!
//! hubgate_core::export_service!(create);
//! ```
//!
//! Trait objects have no stable ABI, so the declaration carries the ABI
//! revision and the `hubgate-core` version the plugin was compiled against.
//! The loader refuses any plugin whose values do not match before it touches
//! the factory pointer.

use semver::{Version, VersionReq};

use crate::error::HubgateError;
use crate::traits::ServiceAdapter;

/// Revision of the [`PluginDeclaration`] layout. Bump on any change to it.
pub const ABI_VERSION: u32 = 1;

/// Version of `hubgate-core` baked into every exported declaration.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Null-terminated name of the exported declaration static.
pub const DECLARATION_SYMBOL: &[u8] = b"HUBGATE_PLUGIN_DECLARATION\0";

/// Signature of the factory a plugin exports.
pub type ServiceFactoryFn = fn(endpoint: &str) -> Result<Box<dyn ServiceAdapter>, HubgateError>;

/// The static a plugin exports under [`DECLARATION_SYMBOL`].
///
/// `abi_version` is the first field so it can be read safely from a plugin
/// built against any later layout.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PluginDeclaration {
    pub abi_version: u32,
    pub core_version: &'static str,
    pub create: ServiceFactoryFn,
}

impl std::fmt::Debug for PluginDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDeclaration")
            .field("abi_version", &self.abi_version)
            .field("core_version", &self.core_version)
            .field("create", &"<fn>")
            .finish()
    }
}

/// Check that a declaration was built against a compatible contract.
///
/// Returns a human-readable reason on mismatch. `core_version` is only read
/// once the ABI revision matches.
pub fn check_compatibility(declaration: &PluginDeclaration) -> Result<(), String> {
    if declaration.abi_version != ABI_VERSION {
        return Err(format!(
            "plugin ABI version {} does not match gateway ABI version {ABI_VERSION}",
            declaration.abi_version
        ));
    }

    let plugin_version = Version::parse(declaration.core_version).map_err(|e| {
        format!(
            "plugin reports unparseable core version `{}`: {e}",
            declaration.core_version
        )
    })?;

    let req = VersionReq::parse(&format!("^{CORE_VERSION}"))
        .map_err(|e| format!("gateway core version `{CORE_VERSION}` is invalid: {e}"))?;

    if !req.matches(&plugin_version) {
        return Err(format!(
            "plugin was built against hubgate-core {plugin_version}, gateway requires {req}"
        ));
    }

    Ok(())
}

/// Export a service factory from a plugin crate.
///
/// The argument must be a path to a function matching
/// [`ServiceFactoryFn`](crate::plugin::ServiceFactoryFn).
#[macro_export]
macro_rules! export_service {
    ($factory:path) => {
        #[unsafe(no_mangle)]
        pub static HUBGATE_PLUGIN_DECLARATION: $crate::plugin::PluginDeclaration =
            $crate::plugin::PluginDeclaration {
                abi_version: $crate::plugin::ABI_VERSION,
                core_version: $crate::plugin::CORE_VERSION,
                create: $factory,
            };
    };
}
