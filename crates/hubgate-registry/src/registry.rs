// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrency-safe directory of live service adapters.
//!
//! The `ServiceRegistry` maps a service name to the adapter that serves it.
//! It is the only shared mutable state between request handlers: every
//! request performs a [`get`](ServiceRegistry::get), while writes happen at
//! startup while services load.

use std::collections::HashMap;
use std::sync::Arc;

use hubgate_core::ServiceAdapter;
use parking_lot::RwLock;
use tracing::{debug, warn};

/// Registry of live adapters keyed by service name.
///
/// Readers take a shared lock and never block each other; `register` takes
/// the exclusive lock for the duration of one map insert. No method calls
/// back into the registry while holding the lock.
pub struct ServiceRegistry {
    adapters: RwLock<HashMap<String, Arc<dyn ServiceAdapter>>>,
}

impl ServiceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the adapter registered under `name`.
    ///
    /// Registration is last-write-wins. The displaced adapter, if any, is
    /// returned so the caller can decide what to do with it.
    pub fn register(
        &self,
        name: impl Into<String>,
        adapter: Arc<dyn ServiceAdapter>,
    ) -> Option<Arc<dyn ServiceAdapter>> {
        let name = name.into();
        let previous = self.adapters.write().insert(name.clone(), adapter);
        if previous.is_some() {
            warn!(service = %name, "service re-registered, previous adapter replaced");
        } else {
            debug!(service = %name, "service registered");
        }
        previous
    }

    /// Look up the adapter registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ServiceAdapter>> {
        self.adapters.read().get(name).cloned()
    }

    /// Returns true if a service is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.adapters.read().contains_key(name)
    }

    /// Names of all registered services, sorted.
    ///
    /// Callers must not rely on the ordering.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.adapters.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered services.
    pub fn len(&self) -> usize {
        self.adapters.read().len()
    }

    /// Returns true if no services are registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.read().is_empty()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use hubgate_core::HubgateError;

    struct Tagged(&'static str);

    #[async_trait]
    impl ServiceAdapter for Tagged {
        fn name(&self) -> &str {
            self.0
        }

        async fn handle(
            &self,
            _method: &str,
            _sub_path: &str,
            _body: &[u8],
        ) -> Result<Vec<u8>, HubgateError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    fn tagged(tag: &'static str) -> Arc<dyn ServiceAdapter> {
        Arc::new(Tagged(tag))
    }

    #[test]
    fn register_and_get_roundtrip() {
        let registry = ServiceRegistry::new();
        let adapter = tagged("minio");
        registry.register("minio", adapter.clone());

        let found = registry.get("minio").unwrap();
        assert!(Arc::ptr_eq(&found, &adapter));
    }

    #[test]
    fn get_unknown_is_none() {
        let registry = ServiceRegistry::new();
        assert!(registry.get("missing").is_none());
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn second_registration_wins() {
        let registry = ServiceRegistry::new();
        let first = tagged("first");
        let second = tagged("second");

        assert!(registry.register("svc", first.clone()).is_none());
        let displaced = registry.register("svc", second.clone()).unwrap();

        assert!(Arc::ptr_eq(&displaced, &first));
        assert!(Arc::ptr_eq(&registry.get("svc").unwrap(), &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_key_need_not_match_self_reported_name() {
        let registry = ServiceRegistry::new();
        registry.register("storage", tagged("minio"));

        let adapter = registry.get("storage").unwrap();
        assert_eq!(adapter.name(), "minio");
        assert!(registry.get("minio").is_none());
    }

    #[test]
    fn list_returns_sorted_names() {
        let registry = ServiceRegistry::new();
        registry.register("zebra", tagged("z"));
        registry.register("alpha", tagged("a"));
        registry.register("middle", tagged("m"));

        assert_eq!(registry.list(), vec!["alpha", "middle", "zebra"]);
    }

    #[test]
    fn len_and_is_empty() {
        let registry = ServiceRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);

        registry.register("test", tagged("test"));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn debug_lists_service_names() {
        let registry = ServiceRegistry::new();
        registry.register("echo", tagged("echo"));
        assert!(format!("{registry:?}").contains("echo"));
    }
}
