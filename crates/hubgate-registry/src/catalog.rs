// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builtin service catalog.
//!
//! Maps the name of a compiled-in service to the factory that builds it.
//! The table is filled by explicit construction at startup; a declaration of
//! kind `builtin` can only produce an adapter listed here.

use std::collections::HashMap;
use std::sync::Arc;

use hubgate_core::{HubgateError, ServiceAdapter};

/// Factory trait for creating builtin adapter instances.
///
/// Implemented for any `Fn(&str) -> Result<Arc<dyn ServiceAdapter>, _>`, so
/// most callers register a closure or a constructor function directly.
pub trait ServiceFactory: Send + Sync {
    /// Create a new adapter talking to `endpoint`.
    fn create(&self, endpoint: &str) -> Result<Arc<dyn ServiceAdapter>, HubgateError>;
}

impl<F> ServiceFactory for F
where
    F: Fn(&str) -> Result<Arc<dyn ServiceAdapter>, HubgateError> + Send + Sync,
{
    fn create(&self, endpoint: &str) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        self(endpoint)
    }
}

/// Table of builtin service factories keyed by service name.
#[derive(Default)]
pub struct BuiltinCatalog {
    factories: HashMap<String, Box<dyn ServiceFactory>>,
}

impl BuiltinCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factory under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, factory: impl ServiceFactory + 'static) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, factory: impl ServiceFactory + 'static) -> Self {
        self.register(name, factory);
        self
    }

    /// Instantiate the builtin service `name` against `endpoint`.
    pub fn create(
        &self,
        name: &str,
        endpoint: &str,
    ) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| HubgateError::UnknownBuiltinService {
                name: name.to_string(),
            })?;
        factory.create(endpoint)
    }

    /// Returns true if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Names of all builtin services, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of builtin factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if the catalog has no factories.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for BuiltinCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinCatalog")
            .field("services", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    struct Fixed {
        endpoint: String,
    }

    #[async_trait]
    impl ServiceAdapter for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn handle(
            &self,
            _method: &str,
            _sub_path: &str,
            _body: &[u8],
        ) -> Result<Vec<u8>, HubgateError> {
            Ok(self.endpoint.clone().into_bytes())
        }
    }

    fn fixed(endpoint: &str) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        Ok(Arc::new(Fixed {
            endpoint: endpoint.to_string(),
        }))
    }

    #[tokio::test]
    async fn create_passes_endpoint_to_factory() {
        let catalog = BuiltinCatalog::new().with("fixed", fixed);
        let adapter = catalog.create("fixed", "http://backend:9000").unwrap();
        let out = adapter.handle("GET", "", b"").await.unwrap();
        assert_eq!(out, b"http://backend:9000");
    }

    #[test]
    fn create_unknown_name_fails() {
        let catalog = BuiltinCatalog::new().with("fixed", fixed);
        let err = catalog.create("nope", "").err().unwrap();
        assert!(matches!(err, HubgateError::UnknownBuiltinService { ref name } if name == "nope"));
    }

    #[test]
    fn factory_errors_propagate() {
        let catalog = BuiltinCatalog::new().with("broken", |_: &str| {
            Err::<Arc<dyn ServiceAdapter>, _>(HubgateError::Config("no endpoint".into()))
        });
        let err = catalog.create("broken", "").err().unwrap();
        assert!(err.to_string().contains("no endpoint"));
    }

    #[test]
    fn names_are_sorted() {
        let catalog = BuiltinCatalog::new()
            .with("repocate", fixed)
            .with("echo", fixed)
            .with("minio", fixed);
        assert_eq!(catalog.names(), vec!["echo", "minio", "repocate"]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("minio"));
        assert!(!BuiltinCatalog::new().contains("minio"));
        assert!(BuiltinCatalog::new().is_empty());
    }
}
