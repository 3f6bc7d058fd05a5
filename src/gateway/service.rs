//! Routing Gateway
//!
//! Stateless front door of the cluster. Holds only the ordered shard list and
//! an HTTP client; every answer is derived per request.

use super::aggregator::GlobalTree;
use super::client::{ShardClient, ShardReply};
use super::protocol::Operation;
use super::router::ShardRouter;
use crate::error::NamespaceError;
use crate::namespace::path::{self, ROOT};
use crate::namespace::types::EntryKind;
use crate::shard::protocol::{PARAM_PARENT_VERIFIED, PARAM_PATH};

use futures::future::join_all;

pub struct Gateway {
    router: ShardRouter,
    client: ShardClient,
    listen_addr: String,
}

impl Gateway {
    pub fn new(router: ShardRouter, client: ShardClient, listen_addr: impl Into<String>) -> Self {
        Self {
            router,
            client,
            listen_addr: listen_addr.into(),
        }
    }

    pub fn router(&self) -> &ShardRouter {
        &self.router
    }

    /// Normalizes `raw_path`, routes it, and relays the owning shard's reply.
    ///
    /// Writes are rejected with `ParentMissing` unless the parent is the root
    /// or at least one shard confirms it, and creates under a file parent with
    /// `NotADirectory`. The check and the forwarded write are not atomic.
    pub async fn forward(
        &self,
        op: Operation,
        raw_path: &str,
    ) -> Result<ShardReply, NamespaceError> {
        let path = path::normalize(raw_path);
        path::validate(&path)?;
        let shard = self.router.select_shard(&path);

        let mut parent_verified = false;
        if op.is_write()
            && let Some(parent) = path::parent_path(&path)
            && parent != ROOT
        {
            match self.find_parent(&parent).await {
                None => {
                    tracing::info!(path = %path, parent = %parent, "Rejecting write, parent not found on any shard");
                    return Err(NamespaceError::ParentMissing(parent));
                }
                Some(EntryKind::File) if op.is_create() => {
                    tracing::info!(path = %path, parent = %parent, "Rejecting create, parent is a file");
                    return Err(NamespaceError::NotADirectory(parent));
                }
                Some(_) => parent_verified = true,
            }
        }

        tracing::debug!(
            op = ?op,
            path = %path,
            backend = %shard,
            index = self.router.shard_index(&path),
            "Forwarding"
        );

        let mut query = vec![(PARAM_PATH, path.as_str())];
        if parent_verified && op.is_create() {
            query.push((PARAM_PARENT_VERIFIED, "true"));
        }

        self.client
            .call(shard, op.method(), op.endpoint(), &query)
            .await
    }

    /// Federated parent lookup: `stat` on every shard concurrently.
    ///
    /// `Directory` if any shard holds the parent as a directory, otherwise the
    /// kind of whatever copy was found, or `None` when no shard confirms it.
    pub async fn find_parent(&self, parent: &str) -> Option<EntryKind> {
        let checks = self
            .router
            .shards()
            .iter()
            .map(|shard| self.client.stat_kind(shard, parent));
        let kinds: Vec<EntryKind> = join_all(checks).await.into_iter().flatten().collect();

        if kinds.contains(&EntryKind::Directory) {
            Some(EntryKind::Directory)
        } else {
            kinds.first().copied()
        }
    }

    /// Every shard's dump, in shard order. Unreachable shards yield an error slot.
    pub async fn collect_dumps(&self) -> Vec<(&str, Result<String, NamespaceError>)> {
        let dumps = self.router.shards().iter().map(|shard| async move {
            (shard.as_str(), self.client.dump(shard).await)
        });
        join_all(dumps).await
    }

    /// Builds the merged view from whatever shards answered.
    pub async fn global_tree(&self) -> GlobalTree {
        let dumps = self.collect_dumps().await;
        let available = dumps.iter().filter_map(|(shard, dump)| match dump {
            Ok(text) => Some(text.as_str()),
            Err(e) => {
                tracing::warn!(backend = %shard, "Skipping shard in global tree: {}", e);
                None
            }
        });
        GlobalTree::from_dumps(available)
    }

    /// Cluster-wide tree rooted at `raw_path` (the root when absent).
    pub async fn render_global_tree(
        &self,
        raw_path: Option<&str>,
        absolute: bool,
    ) -> Result<String, NamespaceError> {
        let root = match raw_path {
            None => ROOT.to_string(),
            raw => path::resolve(raw)?,
        };
        let tree = self.global_tree().await;
        tracing::debug!(root = %root, entries = tree.len(), absolute, "Rendering global tree");
        tree.render(&root, absolute)
    }

    /// `chkdist`: each shard's raw dump under a label.
    pub async fn distribution(&self) -> String {
        let mut out = String::from("=== Cluster Metadata Distribution ===\n\n");
        for (i, (shard, dump)) in self.collect_dumps().await.into_iter().enumerate() {
            out.push_str(&format!("--- Server {} ({}) ---\n", i + 1, shard));
            match dump {
                Ok(text) => {
                    out.push_str(&text);
                    out.push('\n');
                }
                Err(e) => out.push_str(&format!("(unreachable or error: {})\n\n", e)),
            }
        }
        out
    }

    /// `cluster`: router address, per-shard reachability and the routing strategy.
    pub async fn cluster_status(&self) -> String {
        let mut out = String::from("=== Cluster Status ===\n\n");
        out.push_str(&format!("Router: {}\n", self.listen_addr));
        out.push_str("Backend servers:\n");
        for (i, (shard, dump)) in self.collect_dumps().await.into_iter().enumerate() {
            match dump {
                Ok(_) => out.push_str(&format!("  Server {}: {} Alive\n", i + 1, shard)),
                Err(e) => out.push_str(&format!(
                    "  Server {}: {} Unreachable ({})\n",
                    i + 1,
                    shard,
                    e
                )),
            }
        }
        out.push('\n');
        out.push_str(&self.router.describe());
        out
    }
}
