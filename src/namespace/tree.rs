//! Tree rendering shared by the shard-local `tree` endpoints and the gateway's
//! global tree.
//!
//! Traversal is an explicit depth-first walk. The set of paths on the current
//! descent is carried alongside the stack, and a directory already in that set
//! is printed but never descended into, so parent-pointer cycles terminate.

use super::path::file_name;
use super::types::NamespaceEntry;
use std::collections::HashSet;

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const INDENT: &str = "    ";

/// Anything that can list the direct children of a path, in render order.
pub trait ChildSource {
    fn children_of(&self, path: &str) -> Vec<NamespaceEntry>;
}

struct Frame {
    path: String,
    children: Vec<NamespaceEntry>,
    next: usize,
}

/// Renders `root` and everything below it.
///
/// The first line is `root` itself. Children are labelled with their full path
/// when `absolute`, otherwise with their final segment.
pub fn render<S: ChildSource + ?Sized>(source: &S, root: &str, absolute: bool) -> String {
    let mut out = String::new();
    out.push_str(root);
    out.push('\n');

    let mut on_path: HashSet<String> = HashSet::new();
    on_path.insert(root.to_string());
    let mut stack = vec![Frame {
        path: root.to_string(),
        children: source.children_of(root),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.children.get(frame.next).cloned() else {
            if let Some(done) = stack.pop() {
                on_path.remove(&done.path);
            }
            continue;
        };
        frame.next += 1;
        let is_last = frame.next == frame.children.len();
        let depth = stack.len() - 1;

        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        out.push_str(if absolute {
            &child.path
        } else {
            file_name(&child.path)
        });
        out.push('\n');

        if child.is_dir() && on_path.insert(child.path.clone()) {
            let children = source.children_of(&child.path);
            stack.push(Frame {
                path: child.path,
                children,
                next: 0,
            });
        }
    }

    out
}
