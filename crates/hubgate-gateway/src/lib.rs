// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Hubgate.
//!
//! Every request under `/api/{service}` is resolved against the
//! [`ServiceRegistry`](hubgate_registry::ServiceRegistry), its body is read in
//! full, and the adapter's reply is written back verbatim as JSON. Unknown
//! services map to 404, adapter failures to 500 and an expired adapter
//! timeout to 504.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use dispatch::dispatch;
pub use error::{ErrorResponse, GatewayError};
pub use server::{build_router, serve, start_server, GatewayState, ServerConfig};
