// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object storage adapter.
//!
//! Exposes bucket listing and creation plus object get/put against an
//! HTTP front of a MinIO deployment:
//!
//! | Method | Sub-path | Backend call |
//! |---|---|---|
//! | GET | `buckets` | `GET {endpoint}/buckets` (JSON) |
//! | POST | `buckets` | `POST {endpoint}/buckets` (JSON) |
//! | GET | `buckets/{bucket}/{object...}` | `GET {endpoint}/buckets/{bucket}/{object}` (raw) |
//! | PUT | `buckets/{bucket}/{object...}` | `PUT {endpoint}/buckets/{bucket}/{object}` (JSON) |

use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::{HubgateError, ServiceAdapter};
use reqwest::header::CONTENT_TYPE;

use crate::http::{base_url, build_client, ensure_json, send};

/// Builtin name.
pub const NAME: &str = "minio";

/// Adapter for the object storage backend.
#[derive(Debug, Clone)]
pub struct MinioAdapter {
    client: reqwest::Client,
    base_url: String,
}

/// A parsed `buckets/{bucket}/{object...}` sub-path.
#[derive(Debug, PartialEq, Eq)]
struct ObjectPath<'a> {
    bucket: &'a str,
    object: &'a str,
}

fn parse_object_path(sub_path: &str) -> Result<ObjectPath<'_>, HubgateError> {
    let mut parts = sub_path.splitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("buckets"), Some(bucket), Some(object)) => Ok(ObjectPath { bucket, object }),
        _ => Err(HubgateError::adapter(format!("invalid path: {sub_path}"))),
    }
}

impl MinioAdapter {
    /// Create an adapter talking to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self, HubgateError> {
        Ok(Self {
            client: build_client(NAME)?,
            base_url: base_url(NAME, endpoint)?,
        })
    }

    /// Catalog factory.
    pub fn factory(endpoint: &str) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        Ok(Arc::new(Self::new(endpoint)?))
    }

    async fn list_buckets(&self) -> Result<Vec<u8>, HubgateError> {
        let context = "failed to list buckets";
        let body = send(self.client.get(format!("{}/buckets", self.base_url)), context).await?;
        ensure_json(body, context)
    }

    async fn create_bucket(&self, payload: &[u8]) -> Result<Vec<u8>, HubgateError> {
        let context = "failed to create bucket";
        let request = self
            .client
            .post(format!("{}/buckets", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_vec());
        ensure_json(send(request, context).await?, context)
    }

    async fn get_object(&self, path: ObjectPath<'_>) -> Result<Vec<u8>, HubgateError> {
        let url = format!("{}/buckets/{}/{}", self.base_url, path.bucket, path.object);
        send(self.client.get(url), "failed to get object").await
    }

    async fn put_object(&self, path: ObjectPath<'_>, payload: &[u8]) -> Result<Vec<u8>, HubgateError> {
        let context = "failed to put object";
        let url = format!("{}/buckets/{}/{}", self.base_url, path.bucket, path.object);
        let body = send(self.client.put(url).body(payload.to_vec()), context).await?;
        ensure_json(body, context)
    }
}

#[async_trait]
impl ServiceAdapter for MinioAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn handle(
        &self,
        method: &str,
        sub_path: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, HubgateError> {
        match (method, sub_path) {
            ("GET", "buckets") => self.list_buckets().await,
            ("POST", "buckets") => self.create_bucket(body).await,
            ("GET", p) if p.starts_with("buckets/") => {
                self.get_object(parse_object_path(p)?).await
            }
            ("PUT", p) if p.starts_with("buckets/") => {
                self.put_object(parse_object_path(p)?, body).await
            }
            _ => Err(HubgateError::adapter(format!(
                "unknown endpoint: {method} {sub_path}"
            ))),
        }
    }
}
