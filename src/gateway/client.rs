//! Shard Client
//!
//! Single-attempt HTTP calls from the gateway to shards. Every call has fixed
//! connect and total timeouts; a refused, failed or timed-out call becomes
//! `Unavailable` and is never retried.

use crate::error::NamespaceError;
use crate::namespace::types::{EntryKind, kind_from_stat_line};
use crate::shard::protocol::{ENDPOINT_DUMP, ENDPOINT_STAT, PARAM_PATH};

use axum::http::StatusCode;
use reqwest::Method;
use std::time::Duration;

/// A shard's answer, relayed to the gateway's caller as-is.
#[derive(Debug, Clone)]
pub struct ShardReply {
    pub status: StatusCode,
    pub body: String,
}

impl ShardReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[derive(Clone)]
pub struct ShardClient {
    http_client: reqwest::Client,
}

impl ShardClient {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .build()?;
        Ok(Self { http_client })
    }

    pub async fn call(
        &self,
        shard: &str,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<ShardReply, NamespaceError> {
        let url = format!("{}{}", shard, endpoint);
        let unavailable = |e: reqwest::Error| {
            tracing::warn!(backend = %shard, endpoint, "Backend error: {}", e);
            NamespaceError::Unavailable(shard.to_string())
        };

        let response = self
            .http_client
            .request(method, url)
            .query(query)
            .send()
            .await
            .map_err(unavailable)?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response.text().await.map_err(unavailable)?;

        Ok(ShardReply { status, body })
    }

    /// Kind of `path` on `shard`, or `None` if the shard does not hold it.
    /// Unreachable shards count as "not held".
    pub async fn stat_kind(&self, shard: &str, path: &str) -> Option<EntryKind> {
        let reply = self
            .call(shard, Method::GET, ENDPOINT_STAT, &[(PARAM_PATH, path)])
            .await
            .ok()?;
        if !reply.is_success() {
            return None;
        }
        kind_from_stat_line(path, &reply.body)
    }

    /// The shard's full dump. A non-success status is reported as unavailable.
    pub async fn dump(&self, shard: &str) -> Result<String, NamespaceError> {
        let reply = self.call(shard, Method::GET, ENDPOINT_DUMP, &[]).await?;
        if !reply.is_success() {
            tracing::warn!(backend = %shard, status = %reply.status, "Dump failed");
            return Err(NamespaceError::Unavailable(shard.to_string()));
        }
        Ok(reply.body)
    }
}
