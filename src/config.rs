//! Command-line and environment configuration for both process roles.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Sharded namespace metadata cluster
#[derive(Parser, Debug)]
#[command(name = "namespace-cluster", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub role: Role,
}

#[derive(Subcommand, Debug)]
pub enum Role {
    /// Run one metadata shard
    Shard(ShardArgs),
    /// Run the routing gateway in front of the shards
    Gateway(GatewayArgs),
}

/// Where to listen. `--bind` wins over `--port`.
#[derive(Args, Debug, Clone)]
pub struct ListenArgs {
    /// Full listen address, e.g. 127.0.0.1:9001
    #[arg(long, env = "BIND")]
    pub bind: Option<String>,

    /// Listen on 0.0.0.0 at this port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

impl ListenArgs {
    pub fn bind_addr(&self) -> anyhow::Result<String> {
        match (&self.bind, self.port) {
            (Some(bind), _) if !bind.trim().is_empty() => Ok(bind.trim().to_string()),
            (_, Some(0)) => anyhow::bail!("PORT must be a positive integer"),
            (_, Some(port)) => Ok(format!("0.0.0.0:{}", port)),
            _ => anyhow::bail!("a listen address is required (--bind or --port)"),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ShardArgs {
    #[command(flatten)]
    pub listen: ListenArgs,

    /// Identifier shown in dump headers
    #[arg(long, env = "SERVER_ID")]
    pub server_id: String,

    /// Checkpoint file, rewritten on every mutation
    #[arg(long, env = "DATA_FILE", default_value = "/data/meta.txt")]
    pub data_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct GatewayArgs {
    #[command(flatten)]
    pub listen: ListenArgs,

    /// Comma-separated shard addresses; order determines routing
    #[arg(long, env = "SERVERS")]
    pub servers: String,

    #[arg(long, env = "CONNECT_TIMEOUT_MS", default_value_t = 3000)]
    pub connect_timeout_ms: u64,

    #[arg(long, env = "READ_TIMEOUT_MS", default_value_t = 5000)]
    pub read_timeout_ms: u64,
}

impl GatewayArgs {
    pub fn shard_urls(&self) -> anyhow::Result<Vec<String>> {
        parse_shard_list(&self.servers)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Splits a comma-separated list into base URLs without trailing slashes.
///
/// Shards speak plain HTTP; a missing scheme becomes `http://` and any other
/// scheme is rejected.
pub fn parse_shard_list(raw: &str) -> anyhow::Result<Vec<String>> {
    let mut urls = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let url = match item.split_once("://") {
            None => format!("http://{}", item),
            Some(("http", _)) => item.to_string(),
            Some((scheme, _)) => {
                anyhow::bail!("unsupported scheme '{}' in shard address {}", scheme, item)
            }
        };
        urls.push(url.trim_end_matches('/').to_string());
    }

    if urls.is_empty() {
        anyhow::bail!("no shard addresses configured (--servers / SERVERS)");
    }
    Ok(urls)
}
