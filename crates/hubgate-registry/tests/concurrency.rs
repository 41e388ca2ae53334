// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Readers racing a writer must always see whole adapters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hubgate_core::{HubgateError, ServiceAdapter};
use hubgate_registry::ServiceRegistry;

struct Generation(String);

#[async_trait]
impl ServiceAdapter for Generation {
    fn name(&self) -> &str {
        &self.0
    }

    async fn handle(
        &self,
        _method: &str,
        _sub_path: &str,
        _body: &[u8],
    ) -> Result<Vec<u8>, HubgateError> {
        Ok(self.0.clone().into_bytes())
    }
}

fn generation(n: usize) -> Arc<dyn ServiceAdapter> {
    Arc::new(Generation(format!("gen-{n}")))
}

#[test]
fn readers_never_observe_torn_state_during_registration() {
    let registry = ServiceRegistry::new();
    registry.register("stable", generation(0));
    registry.register("churn", generation(0));

    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    let stable = registry.get("stable").expect("stable is never removed");
                    assert_eq!(stable.name(), "gen-0");

                    let churn = registry.get("churn").expect("churn is only replaced");
                    assert!(churn.name().starts_with("gen-"));

                    let names = registry.list();
                    assert!(names.iter().any(|n| n == "stable"));
                    assert!(names.iter().any(|n| n == "churn"));
                }
            });
        }

        s.spawn(|| {
            for n in 1..=500 {
                registry.register("churn", generation(n));
                registry.register(format!("extra-{n}"), generation(n));
            }
            done.store(true, Ordering::Release);
        });
    });

    assert_eq!(registry.get("churn").unwrap().name(), "gen-500");
    assert_eq!(registry.len(), 502);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_lookups_share_one_adapter() {
    let registry = Arc::new(ServiceRegistry::new());
    let adapter = generation(7);
    registry.register("svc", adapter.clone());

    let mut handles = Vec::new();
    for _ in 0..32 {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            let found = registry.get("svc").unwrap();
            found.handle("GET", "", b"").await.unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), b"gen-7");
    }
    assert!(Arc::ptr_eq(&registry.get("svc").unwrap(), &adapter));
}
