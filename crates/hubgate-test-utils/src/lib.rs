// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Hubgate integration tests.
//!
//! Provides mock adapters and an in-process gateway harness for fast,
//! deterministic tests without backend services.
//!
//! # Components
//!
//! - [`MockAdapter`] - Scripted adapter that records every call
//! - [`TestGateway`] - Registry plus router driven through `tower::ServiceExt`

pub mod harness;
pub mod mock_adapter;

pub use harness::{TestGateway, TestResponse};
pub use mock_adapter::{MockAdapter, RecordedCall};
