//! Gateway HTTP Protocol
//!
//! The gateway serves the shard endpoints it forwards (see `shard::protocol`)
//! plus its own cluster-wide endpoints below.

use crate::shard::protocol::{
    ENDPOINT_MKDIR, ENDPOINT_READDIR, ENDPOINT_RM, ENDPOINT_STAT, ENDPOINT_TOUCH,
};
use reqwest::Method;

/// `GET`: raw dump of every shard, labelled.
pub const ENDPOINT_CHKDIST: &str = "/chkdist";
/// `GET`: router address, shard reachability and routing strategy.
pub const ENDPOINT_CLUSTER: &str = "/cluster";
/// `GET`: liveness, always `ok`.
pub const ENDPOINT_HEALTH: &str = "/health";

/// A path-bearing operation forwarded to exactly one shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Mkdir,
    Touch,
    Remove,
    Readdir,
    Stat,
}

impl Operation {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Mkdir => ENDPOINT_MKDIR,
            Operation::Touch => ENDPOINT_TOUCH,
            Operation::Remove => ENDPOINT_RM,
            Operation::Readdir => ENDPOINT_READDIR,
            Operation::Stat => ENDPOINT_STAT,
        }
    }

    pub fn method(&self) -> Method {
        if self.is_write() { Method::POST } else { Method::GET }
    }

    /// Writes get the federated parent check before forwarding.
    pub fn is_write(&self) -> bool {
        matches!(self, Operation::Mkdir | Operation::Touch | Operation::Remove)
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Operation::Mkdir | Operation::Touch)
    }
}
