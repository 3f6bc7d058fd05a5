use super::protocol::*;
use super::store::{ParentCheck, ShardStore};
use crate::error::{NamespaceError, method_not_allowed};
use crate::namespace::path;
use crate::namespace::types::{EntryKind, NamespaceEntry};

use axum::{
    Extension, Router,
    extract::Query,
    routing::{get, post},
};
use std::sync::Arc;

/// Builds the shard's HTTP surface.
pub fn router(store: Arc<ShardStore>) -> Router {
    Router::new()
        .route(ENDPOINT_MKDIR, post(handle_mkdir).fallback(method_not_allowed))
        .route(ENDPOINT_TOUCH, post(handle_touch).fallback(method_not_allowed))
        .route(ENDPOINT_RM, post(handle_rm).fallback(method_not_allowed))
        .route(ENDPOINT_READDIR, get(handle_readdir).fallback(method_not_allowed))
        .route(ENDPOINT_STAT, get(handle_stat).fallback(method_not_allowed))
        .route(ENDPOINT_DUMP, get(handle_dump).fallback(method_not_allowed))
        .route(ENDPOINT_TREE, get(handle_tree).fallback(method_not_allowed))
        .route(ENDPOINT_FULLTREE, get(handle_fulltree).fallback(method_not_allowed))
        .layer(Extension(store))
}

pub async fn handle_mkdir(
    Extension(store): Extension<Arc<ShardStore>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    let entry = create(store, query, EntryKind::Directory).await?;
    Ok(format!("Directory created: {}", entry.path))
}

pub async fn handle_touch(
    Extension(store): Extension<Arc<ShardStore>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    let entry = create(store, query, EntryKind::File).await?;
    Ok(format!("File created: {}", entry.path))
}

pub async fn handle_rm(
    Extension(store): Extension<Arc<ShardStore>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    let path = path::resolve(query.path.as_deref())?;
    let removed = blocking(move || store.remove(&path)).await?;
    Ok(format!("Removed: {}", removed.path))
}

pub async fn handle_readdir(
    Extension(store): Extension<Arc<ShardStore>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    let path = path::resolve(query.path.as_deref())?;
    let children = store.list_children(&path)?;
    tracing::debug!(shard = %store.shard_id(), path = %path, "Listed directory");

    if children.is_empty() {
        Ok(EMPTY_DIRECTORY.to_string())
    } else {
        Ok(children.join(", "))
    }
}

pub async fn handle_stat(
    Extension(store): Extension<Arc<ShardStore>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    let path = path::resolve(query.path.as_deref())?;
    let entry = store.stat(&path)?;
    tracing::debug!(shard = %store.shard_id(), path = %path, "Stat");
    Ok(entry.stat_line())
}

pub async fn handle_dump(Extension(store): Extension<Arc<ShardStore>>) -> String {
    tracing::debug!(shard = %store.shard_id(), "Dump requested");
    store.dump()
}

pub async fn handle_tree(
    Extension(store): Extension<Arc<ShardStore>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    tree(store, query, false)
}

pub async fn handle_fulltree(
    Extension(store): Extension<Arc<ShardStore>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    tree(store, query, true)
}

async fn create(
    store: Arc<ShardStore>,
    query: PathQuery,
    kind: EntryKind,
) -> Result<NamespaceEntry, NamespaceError> {
    let path = path::resolve(query.path.as_deref())?;
    let parent_check = if query.parent_verified {
        ParentCheck::Verified
    } else {
        ParentCheck::Local
    };
    blocking(move || store.create(&path, kind, parent_check)).await
}

/// `tree` and `fulltree` default to the root when no `path` is given.
fn tree(store: Arc<ShardStore>, query: PathQuery, absolute: bool) -> Result<String, NamespaceError> {
    let path = match query.path {
        None => path::ROOT.to_string(),
        raw => path::resolve(raw.as_deref())?,
    };
    let rendered = store.render_tree(&path, absolute)?;
    tracing::debug!(shard = %store.shard_id(), path = %path, absolute, "Tree");
    Ok(rendered)
}

/// Mutations rewrite the checkpoint file; keep that off the async workers.
async fn blocking<T, F>(op: F) -> Result<T, NamespaceError>
where
    F: FnOnce() -> Result<T, NamespaceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| NamespaceError::Internal(e.to_string()))?
}
