// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the loader, registry, and gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Option key naming the shared library of a dynamic service.
pub const PLUGIN_PATH_OPTION: &str = "path";

/// How a declared service is turned into a live adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceKind {
    /// Compiled into the gateway and looked up in the builtin catalog.
    Builtin,
    /// Loaded at runtime from a shared library on disk.
    Dynamic,
}

/// Static description of one backend service to load at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDeclaration {
    /// Registry key; also the `{service}` path segment.
    pub name: String,

    /// Builtin or dynamic.
    pub kind: ServiceKind,

    /// Base address or other adapter-specific connection info.
    #[serde(default, alias = "url")]
    pub endpoint: String,

    /// Open configuration bag. Only `path` is read by the loader.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ServiceDeclaration {
    /// Declare a builtin service.
    pub fn builtin(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ServiceKind::Builtin,
            endpoint: endpoint.into(),
            options: BTreeMap::new(),
        }
    }

    /// Declare a dynamic service backed by the shared library at `path`.
    pub fn dynamic(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let mut options = BTreeMap::new();
        options.insert(PLUGIN_PATH_OPTION.to_string(), path.into());
        Self {
            name: name.into(),
            kind: ServiceKind::Dynamic,
            endpoint: endpoint.into(),
            options,
        }
    }

    /// Look up an option by key.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// The plugin path for dynamic services, if declared.
    pub fn plugin_path(&self) -> Option<&str> {
        self.option(PLUGIN_PATH_OPTION)
    }
}

/// One inbound call routed to an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Registry key taken from the first path segment after `/api/`.
    pub service: String,
    /// Remainder of the path with its `/` separators preserved.
    pub sub_path: String,
    /// HTTP method name, forwarded verbatim.
    pub method: String,
    /// Complete request body.
    pub body: Vec<u8>,
}
