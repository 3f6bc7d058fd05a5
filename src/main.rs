use axum::Router;
use clap::Parser;
use namespace_cluster::config::{Cli, GatewayArgs, Role, ShardArgs};
use namespace_cluster::gateway::client::ShardClient;
use namespace_cluster::gateway::router::ShardRouter;
use namespace_cluster::gateway::service::Gateway;
use namespace_cluster::gateway::handlers as gateway_handlers;
use namespace_cluster::shard::handlers as shard_handlers;
use namespace_cluster::shard::store::ShardStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.role {
        Role::Shard(args) => run_shard(args).await,
        Role::Gateway(args) => run_gateway(args).await,
    }
}

async fn run_shard(args: ShardArgs) -> anyhow::Result<()> {
    let bind_addr = args.listen.bind_addr()?;

    tracing::info!("Starting shard {} on {}", args.server_id, bind_addr);
    tracing::info!("Checkpoint file: {}", args.data_file.display());

    // 1. Store, recovered from the checkpoint:
    let store = Arc::new(ShardStore::open(args.server_id, args.data_file));
    tracing::info!("Loaded {} entries", store.len());

    // 2. HTTP:
    let app = shard_handlers::router(store);
    serve(&bind_addr, app).await
}

async fn run_gateway(args: GatewayArgs) -> anyhow::Result<()> {
    let bind_addr = args.listen.bind_addr()?;
    let shards = args.shard_urls()?;

    tracing::info!("Starting gateway on {}", bind_addr);
    for (i, shard) in shards.iter().enumerate() {
        tracing::info!("  - shard {}: {}", i + 1, shard);
    }

    // 1. Routing and backend client:
    let router = ShardRouter::new(shards)?;
    let client = ShardClient::new(args.connect_timeout(), args.read_timeout())?;
    let gateway = Arc::new(Gateway::new(router, client, bind_addr.clone()));

    // 2. HTTP:
    let app = gateway_handlers::router(gateway);
    serve(&bind_addr, app).await
}

async fn serve(bind_addr: &str, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
