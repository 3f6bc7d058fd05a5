//! Helpers for tests that need live shards on loopback sockets.

use crate::shard::handlers;
use crate::shard::store::ShardStore;

use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestShard {
    pub url: String,
    pub store: Arc<ShardStore>,
    _dir: TempDir,
}

/// Starts a shard with a fresh checkpoint directory on `127.0.0.1:0`.
pub async fn spawn_shard(shard_id: &str) -> TestShard {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(ShardStore::open(shard_id, dir.path().join("meta.txt")));
    let url = serve(handlers::router(store.clone())).await;
    TestShard {
        url,
        store,
        _dir: dir,
    }
}

/// Serves `app` in the background and returns its base URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// An address nothing listens on.
pub async fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
