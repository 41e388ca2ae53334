// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability contract every backend service adapter must satisfy.

use async_trait::async_trait;

use crate::error::HubgateError;

/// A live handle to one backend integration.
///
/// The gateway only ever calls [`handle`](ServiceAdapter::handle). Method and
/// sub-path interpretation is entirely up to the adapter; unsupported
/// combinations must come back as `Err`, never as a panic. Every error is
/// relayed to the client as an internal error, so adapters that want to signal
/// "not found" have to say so in the message.
///
/// Calls into one adapter are not serialized by the gateway.
#[async_trait]
pub trait ServiceAdapter: Send + Sync + 'static {
    /// Self-reported identifier, used for diagnostics only.
    ///
    /// The registry key of record is the name the adapter was registered
    /// under, which need not match.
    fn name(&self) -> &str;

    /// Handle one request and return the raw response bytes.
    async fn handle(
        &self,
        method: &str,
        sub_path: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, HubgateError>;
}
