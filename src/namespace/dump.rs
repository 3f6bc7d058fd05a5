//! Dump Wire Format (version 1)
//!
//! The dump is both human-readable and the pull-based state-transfer protocol
//! between shards and the gateway. Grammar:
//!
//! ```text
//! dump   := header LF ( entry LF )+
//!         | header LF empty LF
//! header := "[Server " shard-id "]"
//! entry  := "  " path " -> {type=" kind ", parent=" ( path | "root" ) ", ts=" digits "}"
//! kind   := "dir" | "file"
//! empty  := "  (no entries)"
//! ```
//!
//! Entries are sorted by path. Parsers skip every line that is not an `entry`,
//! which covers the header, the empty sentinel and any blank lines.

use super::types::{EntryKind, NamespaceEntry};
use regex::Regex;
use std::sync::LazyLock;

pub const EMPTY_SENTINEL: &str = "  (no entries)";

static ENTRY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<path>/.*) -> \{type=(?P<kind>dir|file), parent=(?P<parent>.+), ts=(?P<ts>\d+)\}\s*$")
        .expect("dump entry pattern is valid")
});

pub fn header(shard_id: &str) -> String {
    format!("[Server {}]", shard_id)
}

pub fn render_entry(entry: &NamespaceEntry) -> String {
    format!(
        "  {} -> {{type={}, parent={}, ts={}}}",
        entry.path,
        entry.kind,
        entry.parent_label(),
        entry.created_at_ms
    )
}

/// Renders a full dump. The input order does not matter.
pub fn render(shard_id: &str, entries: &[NamespaceEntry]) -> String {
    let mut sorted: Vec<&NamespaceEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut out = header(shard_id);
    out.push('\n');
    for entry in &sorted {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    if sorted.is_empty() {
        out.push_str(EMPTY_SENTINEL);
        out.push('\n');
    }
    out
}

/// Parses one `entry` line; `None` for anything else.
pub fn parse_entry(line: &str) -> Option<NamespaceEntry> {
    let caps = ENTRY_LINE.captures(line)?;
    let kind: EntryKind = caps["kind"].parse().ok()?;
    let parent = match &caps["parent"] {
        "root" => None,
        parent => Some(parent.to_string()),
    };
    let created_at_ms = caps["ts"].parse().ok()?;

    Some(NamespaceEntry {
        path: caps["path"].to_string(),
        kind,
        parent,
        created_at_ms,
    })
}

/// Parses every entry line of a dump, in order of appearance.
pub fn parse(dump: &str) -> Vec<NamespaceEntry> {
    dump.lines().filter_map(parse_entry).collect()
}
