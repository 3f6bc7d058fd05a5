//! Shard HTTP Protocol
//!
//! Endpoints every shard serves and the query parameters they accept. The
//! gateway calls the same endpoints when forwarding, so these constants are
//! the contract between the two roles. All bodies are `text/plain; UTF-8`.

use serde::Deserialize;

/// `POST`: create a directory.
pub const ENDPOINT_MKDIR: &str = "/mkdir";
/// `POST`: create a file.
pub const ENDPOINT_TOUCH: &str = "/touch";
/// `POST`: remove a file or an empty directory.
pub const ENDPOINT_RM: &str = "/rm";
/// `GET`: comma-space-joined sorted children, or `(empty)`.
pub const ENDPOINT_READDIR: &str = "/readdir";
/// `GET`: one-line entry description.
pub const ENDPOINT_STAT: &str = "/stat";
/// `GET`: every entry in the dump format.
pub const ENDPOINT_DUMP: &str = "/dump";
/// `GET`: tree with relative child labels.
pub const ENDPOINT_TREE: &str = "/tree";
/// `GET`: tree with absolute child labels.
pub const ENDPOINT_FULLTREE: &str = "/fulltree";

pub const PARAM_PATH: &str = "path";
/// Set by the gateway on creates whose parent it confirmed across the cluster.
pub const PARAM_PARENT_VERIFIED: &str = "parent_verified";

pub const EMPTY_DIRECTORY: &str = "(empty)";

/// Query string of every path-bearing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PathQuery {
    pub path: Option<String>,
    #[serde(default)]
    pub parent_verified: bool,
}
