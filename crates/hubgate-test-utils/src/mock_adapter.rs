// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock service adapter for deterministic testing.
//!
//! `MockAdapter` implements `ServiceAdapter` with a configurable behavior and
//! records every call it receives.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hubgate_core::{HubgateError, ServiceAdapter};

/// One call observed by a [`MockAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub sub_path: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
enum Behavior {
    /// Return the request body unchanged.
    Echo,
    /// Pop scripted responses; echo once the queue is empty.
    Scripted,
    /// Always fail with this message.
    Fail(String),
}

/// A scripted adapter that records its calls.
///
/// Clones share the same call log and response queue, so a test can keep a
/// handle after registering the adapter.
#[derive(Debug, Clone)]
pub struct MockAdapter {
    name: String,
    behavior: Behavior,
    delay: Option<Duration>,
    responses: Arc<Mutex<VecDeque<Vec<u8>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAdapter {
    fn with_behavior(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            delay: None,
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An adapter that returns the request body unchanged.
    pub fn echo(name: &str) -> Self {
        Self::with_behavior(name, Behavior::Echo)
    }

    /// An adapter that replies with `responses` in order, then echoes.
    pub fn with_responses(name: &str, responses: Vec<Vec<u8>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Self::with_behavior(name, Behavior::Scripted)
        }
    }

    /// An adapter whose every call fails with `message`.
    pub fn failing(name: &str, message: &str) -> Self {
        Self::with_behavior(name, Behavior::Fail(message.to_string()))
    }

    /// Sleep for `delay` before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Append a scripted response.
    pub async fn add_response(&self, bytes: Vec<u8>) {
        self.responses.lock().await.push_back(bytes);
    }

    /// All calls received so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// The most recent call, if any.
    pub async fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().await.last().cloned()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// This adapter as a registry entry.
    pub fn shared(&self) -> Arc<dyn ServiceAdapter> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl ServiceAdapter for MockAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(
        &self,
        method: &str,
        sub_path: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, HubgateError> {
        self.calls.lock().await.push(RecordedCall {
            method: method.to_string(),
            sub_path: sub_path.to_string(),
            body: body.to_vec(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Echo => Ok(body.to_vec()),
            Behavior::Scripted => Ok(self
                .responses
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| body.to_vec())),
            Behavior::Fail(message) => Err(HubgateError::adapter(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_returns_body_and_records_call() {
        let adapter = MockAdapter::echo("echo");
        let out = adapter.handle("PUT", "foo/bar", b"{\"x\":1}").await.unwrap();
        assert_eq!(out, b"{\"x\":1}");

        let call = adapter.last_call().await.unwrap();
        assert_eq!(call.method, "PUT");
        assert_eq!(call.sub_path, "foo/bar");
    }

    #[tokio::test]
    async fn scripted_responses_pop_in_order_then_echo() {
        let adapter = MockAdapter::with_responses("svc", vec![b"1".to_vec(), b"2".to_vec()]);
        assert_eq!(adapter.handle("GET", "", b"x").await.unwrap(), b"1");
        assert_eq!(adapter.handle("GET", "", b"x").await.unwrap(), b"2");
        assert_eq!(adapter.handle("GET", "", b"x").await.unwrap(), b"x");

        adapter.add_response(b"3".to_vec()).await;
        assert_eq!(adapter.handle("GET", "", b"x").await.unwrap(), b"3");
        assert_eq!(adapter.call_count().await, 4);
    }

    #[tokio::test]
    async fn failing_adapter_reports_message() {
        let adapter = MockAdapter::failing("broken", "backend down");
        let err = adapter.handle("GET", "", b"").await.unwrap_err();
        assert_eq!(err.to_string(), "backend down");
        assert_eq!(adapter.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn clones_share_call_log() {
        let adapter = MockAdapter::echo("echo");
        let registered = adapter.shared();
        registered.handle("GET", "a", b"").await.unwrap();
        assert_eq!(adapter.call_count().await, 1);
        assert_eq!(registered.name(), "echo");
    }
}
