use crate::error::NamespaceError;

pub const ROOT: &str = "/";

/// Collapses repeated separators, forces a leading `/` and strips a trailing
/// `/` unless the result is the root. Blank input yields the root.
///
/// Idempotent: `normalize(&normalize(p)) == normalize(p)`.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return ROOT.to_string();
    }

    let mut normalized = String::with_capacity(raw.len() + 1);
    for segment in raw.split('/').filter(|segment| !segment.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }

    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// `normalize` for an optional parameter; `None` is the root.
pub fn normalize_opt(raw: Option<&str>) -> String {
    normalize(raw.unwrap_or_default())
}

/// Rejects paths the line-oriented checkpoint and dump formats cannot carry.
pub fn validate(path: &str) -> Result<(), NamespaceError> {
    if path.contains('|') {
        return Err(NamespaceError::BadRequest(format!(
            "Invalid path '{}': '|' is not allowed",
            path
        )));
    }
    if path.chars().any(char::is_control) {
        return Err(NamespaceError::BadRequest(
            "Invalid path: control characters are not allowed".to_string(),
        ));
    }
    if path.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(NamespaceError::BadRequest(format!(
            "Invalid path '{}': '.' and '..' segments are not allowed",
            path
        )));
    }
    Ok(())
}

/// Turns a raw request parameter into a normalized, validated path.
///
/// Unlike `normalize`, an absent or blank parameter is an error here.
pub fn resolve(raw: Option<&str>) -> Result<String, NamespaceError> {
    let raw = raw
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(NamespaceError::missing_path)?;
    let path = normalize(raw);
    validate(&path)?;
    Ok(path)
}

/// `/home/maria` -> `/home`, `/home` -> `/`, `/` -> `None`.
pub fn parent_path(path: &str) -> Option<String> {
    if path == ROOT {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(ROOT.to_string()),
        Some(idx) => Some(path[..idx].to_string()),
        None => None,
    }
}

/// Final path segment; empty for the root.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
