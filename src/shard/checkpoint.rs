//! Durable Checkpoint
//!
//! One record per line, pipe-delimited, exactly four fields:
//! `path|type|parent|timestampMillis`, with `null` for an absent parent.
//!
//! The whole file is rewritten after every mutation. The write truncates in
//! place and is not fsynced, so a crash mid-write can leave a truncated file;
//! loading such a file keeps every well-formed line and skips the rest.

use crate::namespace::types::{EntryKind, NamespaceEntry};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const NULL_PARENT: &str = "null";

pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every well-formed record. A missing or unreadable file is an empty store.
    pub fn load(&self) -> Vec<NamespaceEntry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(file = %self.path.display(), "No checkpoint found, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(file = %self.path.display(), "Error loading checkpoint: {}", e);
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match decode_line(line) {
                Some(entry) => entries.push(entry),
                None => tracing::warn!(
                    file = %self.path.display(),
                    line = line_no + 1,
                    "Skipping malformed checkpoint record"
                ),
            }
        }
        entries
    }

    /// Rewrites the file with `entries`, creating the parent directory if needed.
    pub fn save(&self, entries: &[NamespaceEntry]) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating checkpoint directory {}", dir.display()))?;
        }

        let mut content = String::new();
        for entry in entries {
            content.push_str(&encode_line(entry));
            content.push('\n');
        }

        std::fs::write(&self.path, content)
            .with_context(|| format!("writing checkpoint {}", self.path.display()))
    }
}

pub fn encode_line(entry: &NamespaceEntry) -> String {
    format!(
        "{}|{}|{}|{}",
        entry.path,
        entry.kind,
        entry.parent.as_deref().unwrap_or(NULL_PARENT),
        entry.created_at_ms
    )
}

/// Parses one record; `None` on a wrong field count or an unparsable field.
pub fn decode_line(line: &str) -> Option<NamespaceEntry> {
    let fields: Vec<&str> = line.split('|').collect();
    let [path, kind, parent, ts] = fields.as_slice() else {
        return None;
    };
    if path.is_empty() {
        return None;
    }

    let kind: EntryKind = kind.parse().ok()?;
    let parent = match *parent {
        NULL_PARENT => None,
        parent => Some(parent.to_string()),
    };

    Some(NamespaceEntry {
        path: path.to_string(),
        kind,
        parent,
        created_at_ms: ts.parse().ok()?,
    })
}
