use super::client::ShardReply;
use super::protocol::*;
use super::service::Gateway;
use crate::error::{NamespaceError, method_not_allowed};
use crate::shard::protocol::{
    ENDPOINT_FULLTREE, ENDPOINT_MKDIR, ENDPOINT_READDIR, ENDPOINT_RM, ENDPOINT_STAT,
    ENDPOINT_TOUCH, ENDPOINT_TREE, PathQuery,
};

use axum::{
    Extension, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

/// Builds the gateway's HTTP surface.
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route(ENDPOINT_MKDIR, post(handle_mkdir).fallback(method_not_allowed))
        .route(ENDPOINT_TOUCH, post(handle_touch).fallback(method_not_allowed))
        .route(ENDPOINT_RM, post(handle_rm).fallback(method_not_allowed))
        .route(ENDPOINT_READDIR, get(handle_readdir).fallback(method_not_allowed))
        .route(ENDPOINT_STAT, get(handle_stat).fallback(method_not_allowed))
        .route(ENDPOINT_TREE, get(handle_tree).fallback(method_not_allowed))
        .route(ENDPOINT_FULLTREE, get(handle_fulltree).fallback(method_not_allowed))
        .route(ENDPOINT_CHKDIST, get(handle_chkdist).fallback(method_not_allowed))
        .route(ENDPOINT_CLUSTER, get(handle_cluster).fallback(method_not_allowed))
        .route(ENDPOINT_HEALTH, get(handle_health).fallback(method_not_allowed))
        .layer(Extension(gateway))
}

type Relayed = Result<(StatusCode, String), NamespaceError>;

pub async fn handle_mkdir(
    Extension(gateway): Extension<Arc<Gateway>>,
    Query(query): Query<PathQuery>,
) -> Relayed {
    forward(&gateway, Operation::Mkdir, query).await
}

pub async fn handle_touch(
    Extension(gateway): Extension<Arc<Gateway>>,
    Query(query): Query<PathQuery>,
) -> Relayed {
    forward(&gateway, Operation::Touch, query).await
}

pub async fn handle_rm(
    Extension(gateway): Extension<Arc<Gateway>>,
    Query(query): Query<PathQuery>,
) -> Relayed {
    forward(&gateway, Operation::Remove, query).await
}

pub async fn handle_readdir(
    Extension(gateway): Extension<Arc<Gateway>>,
    Query(query): Query<PathQuery>,
) -> Relayed {
    forward(&gateway, Operation::Readdir, query).await
}

pub async fn handle_stat(
    Extension(gateway): Extension<Arc<Gateway>>,
    Query(query): Query<PathQuery>,
) -> Relayed {
    forward(&gateway, Operation::Stat, query).await
}

pub async fn handle_tree(
    Extension(gateway): Extension<Arc<Gateway>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    gateway.render_global_tree(query.path.as_deref(), false).await
}

pub async fn handle_fulltree(
    Extension(gateway): Extension<Arc<Gateway>>,
    Query(query): Query<PathQuery>,
) -> Result<String, NamespaceError> {
    gateway.render_global_tree(query.path.as_deref(), true).await
}

pub async fn handle_chkdist(Extension(gateway): Extension<Arc<Gateway>>) -> String {
    gateway.distribution().await
}

pub async fn handle_cluster(Extension(gateway): Extension<Arc<Gateway>>) -> String {
    gateway.cluster_status().await
}

pub async fn handle_health() -> &'static str {
    "ok"
}

async fn forward(gateway: &Gateway, op: Operation, query: PathQuery) -> Relayed {
    let raw = query
        .path
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(NamespaceError::missing_path)?;
    let ShardReply { status, body } = gateway.forward(op, &raw).await?;
    Ok((status, body))
}
