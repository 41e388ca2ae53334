// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns service declarations into registered adapters.
//!
//! Builtin declarations are resolved through the [`BuiltinCatalog`]. Dynamic
//! declarations open the shared library named by `options.path`, read the
//! exported [`PluginDeclaration`], check it against this build's contract,
//! and call its factory.
//!
//! Loading is fail-fast: [`ServiceLoader::load_all`] instantiates every
//! declaration before registering any of them, so a single failure leaves the
//! registry untouched.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::plugin::{self, PluginDeclaration, DECLARATION_SYMBOL};
use hubgate_core::{HubgateError, ServiceAdapter, ServiceDeclaration, ServiceKind};
use libloading::Library;
use tracing::{debug, info};

use crate::catalog::BuiltinCatalog;
use crate::registry::ServiceRegistry;

/// Adapter created by a plugin, kept together with the library that owns its code.
///
/// Field order matters: the adapter is dropped before the library is unloaded.
struct DynamicAdapter {
    adapter: Box<dyn ServiceAdapter>,
    path: PathBuf,
    _library: Library,
}

#[async_trait]
impl ServiceAdapter for DynamicAdapter {
    fn name(&self) -> &str {
        self.adapter.name()
    }

    async fn handle(
        &self,
        method: &str,
        sub_path: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, HubgateError> {
        self.adapter.handle(method, sub_path, body).await
    }
}

impl Drop for DynamicAdapter {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "unloading plugin library");
    }
}

/// Resolves [`ServiceDeclaration`]s into live adapters.
#[derive(Debug, Default)]
pub struct ServiceLoader {
    catalog: BuiltinCatalog,
}

impl ServiceLoader {
    /// Create a loader backed by the given builtin catalog.
    pub fn new(catalog: BuiltinCatalog) -> Self {
        Self { catalog }
    }

    /// The builtin catalog consulted for `builtin` declarations.
    pub fn catalog(&self) -> &BuiltinCatalog {
        &self.catalog
    }

    /// Build the adapter for one declaration without registering it.
    pub fn instantiate(
        &self,
        decl: &ServiceDeclaration,
    ) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        match decl.kind {
            ServiceKind::Builtin => self.instantiate_builtin(decl),
            ServiceKind::Dynamic => instantiate_dynamic(decl),
        }
    }

    /// Build one declaration and register it under its declared name.
    pub fn load(
        &self,
        registry: &ServiceRegistry,
        decl: &ServiceDeclaration,
    ) -> Result<(), HubgateError> {
        let adapter = self.instantiate(decl)?;
        registry.register(decl.name.clone(), adapter);
        info!(service = %decl.name, kind = %decl.kind, "service loaded");
        Ok(())
    }

    /// Build every declaration, then register them in declaration order.
    ///
    /// Stops at the first failure and returns it; nothing is registered in
    /// that case. Returns the number of services registered.
    pub fn load_all(
        &self,
        registry: &ServiceRegistry,
        decls: &[ServiceDeclaration],
    ) -> Result<usize, HubgateError> {
        let mut built = Vec::with_capacity(decls.len());
        for decl in decls {
            let adapter = self.instantiate(decl)?;
            debug!(service = %decl.name, kind = %decl.kind, "service instantiated");
            built.push((decl, adapter));
        }

        let count = built.len();
        for (decl, adapter) in built {
            registry.register(decl.name.clone(), adapter);
            info!(service = %decl.name, kind = %decl.kind, "service loaded");
        }
        Ok(count)
    }

    fn instantiate_builtin(
        &self,
        decl: &ServiceDeclaration,
    ) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        self.catalog
            .create(&decl.name, &decl.endpoint)
            .map_err(|e| match e {
                HubgateError::UnknownBuiltinService { .. } => e,
                other => HubgateError::AdapterConstruction {
                    name: decl.name.clone(),
                    source: Box::new(other),
                },
            })
    }
}

fn instantiate_dynamic(decl: &ServiceDeclaration) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
    let path = decl.plugin_path().ok_or_else(|| {
        HubgateError::Config(format!(
            "dynamic service `{}` requires options.path",
            decl.name
        ))
    })?;

    info!(service = %decl.name, path, "loading plugin library");

    // SAFETY: opening a library runs its initializers. Plugin paths come from
    // the operator's configuration and are trusted to the same degree as the
    // gateway binary itself.
    let library = unsafe { Library::new(path) }.map_err(|e| HubgateError::PluginOpenFailed {
        name: decl.name.clone(),
        path: path.to_string(),
        source: Box::new(e),
    })?;

    let declaration = read_declaration(&decl.name, &library)?;

    let create = declaration.create;
    let endpoint = decl.endpoint.as_str();
    let adapter = panic::catch_unwind(AssertUnwindSafe(|| create(endpoint)))
        .map_err(|_| HubgateError::AdapterConstruction {
            name: decl.name.clone(),
            source: "plugin factory panicked".into(),
        })?
        .map_err(|e| HubgateError::AdapterConstruction {
            name: decl.name.clone(),
            source: Box::new(e),
        })?;

    Ok(Arc::new(DynamicAdapter {
        adapter,
        path: Path::new(path).to_path_buf(),
        _library: library,
    }))
}

/// Locate and validate the exported plugin declaration.
fn read_declaration(name: &str, library: &Library) -> Result<PluginDeclaration, HubgateError> {
    // SAFETY: the symbol is looked up as the address of a static; nothing is
    // dereferenced here.
    let ptr: *const PluginDeclaration = unsafe {
        let symbol = library
            .get::<*const PluginDeclaration>(DECLARATION_SYMBOL)
            .map_err(|e| HubgateError::SymbolNotFound {
                name: name.to_string(),
                symbol: symbol_name(),
                source: Box::new(e),
            })?;
        *symbol
    };

    // SAFETY: `ptr` is the address the library exports under the declaration
    // symbol, and the library outlives this call.
    unsafe { validate_declaration(name, ptr) }
}

fn symbol_name() -> String {
    String::from_utf8_lossy(&DECLARATION_SYMBOL[..DECLARATION_SYMBOL.len() - 1]).into_owned()
}

/// Check an exported declaration before any of it beyond `abi_version` is trusted.
///
/// # Safety
///
/// `ptr` must be null or point to readable memory holding at least a leading
/// `u32`, and to a whole `PluginDeclaration` when that `u32` equals
/// [`plugin::ABI_VERSION`].
unsafe fn validate_declaration(
    name: &str,
    ptr: *const PluginDeclaration,
) -> Result<PluginDeclaration, HubgateError> {
    if ptr.is_null() {
        return Err(HubgateError::SignatureMismatch {
            name: name.to_string(),
            detail: format!("`{}` resolves to a null address", symbol_name()),
        });
    }

    // SAFETY: `abi_version` is the leading `u32` of a `repr(C)` struct in every
    // ABI revision, so it can be read before the rest of the layout is trusted.
    let abi_version = unsafe { std::ptr::addr_of!((*ptr).abi_version).read() };
    if abi_version != plugin::ABI_VERSION {
        return Err(HubgateError::SignatureMismatch {
            name: name.to_string(),
            detail: format!(
                "plugin ABI version {abi_version} does not match gateway ABI version {}",
                plugin::ABI_VERSION
            ),
        });
    }

    // SAFETY: the ABI revision matches, so the layout is the one this crate defines.
    let declaration = unsafe { ptr.read() };
    plugin::check_compatibility(&declaration).map_err(|detail| HubgateError::SignatureMismatch {
        name: name.to_string(),
        detail,
    })?;

    Ok(declaration)
}
