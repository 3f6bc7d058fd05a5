use super::path::{ROOT, parent_path};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Whether an entry is a directory or a file.
///
/// Written as `dir` / `file` in the checkpoint, the dump and `stat` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Directory => "dir",
            EntryKind::File => "file",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dir" => Ok(EntryKind::Directory),
            "file" => Ok(EntryKind::File),
            other => Err(format!("unknown entry kind: {}", other)),
        }
    }
}

/// One path's metadata record.
///
/// `path` is always normalized. `parent` is `None` only for the root, otherwise
/// it is the path with its last segment removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub path: String,
    pub kind: EntryKind,
    pub parent: Option<String>,
    pub created_at_ms: u64,
}

impl NamespaceEntry {
    /// Builds an entry stamped with the current time. `path` must already be normalized.
    pub fn new(path: &str, kind: EntryKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
            parent: parent_path(path),
            created_at_ms: now_ms(),
        }
    }

    /// Stand-in for `/` when no shard holds an explicit root entry.
    pub fn virtual_root() -> Self {
        Self {
            path: ROOT.to_string(),
            kind: EntryKind::Directory,
            parent: None,
            created_at_ms: 0,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Parent as shown to humans: the parent path, or `root` when absent.
    pub fn parent_label(&self) -> &str {
        self.parent.as_deref().unwrap_or("root")
    }

    /// The `stat` response line.
    pub fn stat_line(&self) -> String {
        format!(
            "Path: {}, Type: {}, Parent: {}, Timestamp: {}",
            self.path,
            self.kind,
            self.parent_label(),
            self.created_at_ms
        )
    }
}

/// Reads the `Type` field back out of a `stat` reply for `path`.
///
/// Matches on the known path prefix, so a path that itself contains
/// `, Type: ` is still read correctly.
pub fn kind_from_stat_line(path: &str, line: &str) -> Option<EntryKind> {
    let rest = line.strip_prefix("Path: ")?.strip_prefix(path)?;
    let rest = rest.strip_prefix(", Type: ")?;
    let (kind, _) = rest.split_once(',')?;
    kind.parse().ok()
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
