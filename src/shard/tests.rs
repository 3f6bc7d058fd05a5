//! Shard Module Tests
//!
//! ## Test Scopes
//! - **Store**: create/remove/stat/list semantics, parent and emptiness guards.
//! - **Checkpoint**: record encoding, malformed-line tolerance, reload after restart.
//! - **HTTP**: status codes and bodies of the plain-text endpoints.

#[cfg(test)]
mod tests {
    use crate::error::NamespaceError;
    use crate::namespace::types::{EntryKind, NamespaceEntry};
    use crate::shard::checkpoint::{Checkpoint, decode_line, encode_line};
    use crate::shard::store::{ParentCheck, ShardStore};
    use crate::test_support::spawn_shard;
    use reqwest::StatusCode;
    use std::sync::Arc;

    fn temp_store(shard_id: &str) -> (tempfile::TempDir, ShardStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ShardStore::open(shard_id, dir.path().join("meta.txt"));
        (dir, store)
    }

    // ============================================================
    // STORE OPERATIONS
    // ============================================================

    #[test]
    fn test_create_stat_remove_roundtrip() {
        let (_dir, store) = temp_store("s0");

        store.create_directory("/a").unwrap();
        let entry = store.stat("/a").unwrap();
        assert_eq!(entry.kind, EntryKind::Directory);
        assert_eq!(entry.parent.as_deref(), Some("/"));

        store.remove("/a").unwrap();
        assert_eq!(store.stat("/a"), Err(NamespaceError::NotFound("/a".to_string())));
    }

    #[test]
    fn test_create_normalizes_path() {
        let (_dir, store) = temp_store("s0");

        let entry = store.create_directory("//a//").unwrap();

        assert_eq!(entry.path, "/a");
        assert!(store.stat("/a").is_ok());
    }

    #[test]
    fn test_create_existing_path_conflicts() {
        let (_dir, store) = temp_store("s0");
        store.create_directory("/a").unwrap();

        let result = store.create_file("/a");

        assert_eq!(result, Err(NamespaceError::AlreadyExists("/a".to_string())));
    }

    #[test]
    fn test_create_requires_local_parent() {
        let (_dir, store) = temp_store("s0");

        assert_eq!(
            store.create_file("/a/b"),
            Err(NamespaceError::ParentMissing("/a".to_string()))
        );

        store.create_directory("/a").unwrap();
        assert!(store.create_file("/a/b").is_ok());
    }

    #[test]
    fn test_verified_parent_skips_local_check() {
        let (_dir, store) = temp_store("s1");

        let entry = store
            .create("/home/maria", EntryKind::Directory, ParentCheck::Verified)
            .unwrap();

        assert_eq!(entry.parent.as_deref(), Some("/home"));
    }

    #[test]
    fn test_create_under_file_rejected() {
        let (_dir, store) = temp_store("s0");
        store.create_file("/f").unwrap();

        assert_eq!(
            store.create_directory("/f/x"),
            Err(NamespaceError::NotADirectory("/f".to_string()))
        );
        assert_eq!(
            store.create("/f/y", EntryKind::File, ParentCheck::Verified),
            Err(NamespaceError::NotADirectory("/f".to_string()))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_root_entry() {
        let (_dir, store) = temp_store("s0");

        let root = store.create_directory("/").unwrap();

        assert_eq!(root.parent, None);
    }

    #[test]
    fn test_remove_non_empty_directory_fails() {
        let (_dir, store) = temp_store("s0");
        store.create_directory("/d").unwrap();
        store.create_file("/d/x").unwrap();

        assert_eq!(
            store.remove("/d"),
            Err(NamespaceError::DirectoryNotEmpty("/d".to_string()))
        );

        store.remove("/d/x").unwrap();
        assert!(store.remove("/d").is_ok());
    }

    #[test]
    fn test_remove_missing_path() {
        let (_dir, store) = temp_store("s0");
        assert!(matches!(store.remove("/nope"), Err(NamespaceError::NotFound(_))));
    }

    #[test]
    fn test_list_children_sorted_and_direct_only() {
        let (_dir, store) = temp_store("s0");
        store.create_directory("/d").unwrap();
        store.create_file("/d/b").unwrap();
        store.create_directory("/d/a").unwrap();
        store.create_file("/d/a/deep").unwrap();

        let children = store.list_children("/d").unwrap();

        assert_eq!(children, vec!["/d/a".to_string(), "/d/b".to_string()]);
    }

    #[test]
    fn test_list_children_errors() {
        let (_dir, store) = temp_store("s0");
        store.create_file("/f").unwrap();

        assert!(matches!(store.list_children("/missing"), Err(NamespaceError::NotFound(_))));
        assert!(matches!(store.list_children("/f"), Err(NamespaceError::NotADirectory(_))));
    }

    #[test]
    fn test_root_listing_without_root_entry() {
        let (_dir, store) = temp_store("s0");
        store.create_directory("/a").unwrap();

        assert_eq!(store.list_children("/").unwrap(), vec!["/a".to_string()]);
        assert_eq!(store.render_tree("/", false).unwrap(), "/\n└── a\n");
    }

    #[test]
    fn test_render_tree_local() {
        let (_dir, store) = temp_store("s0");
        store.create_directory("/home").unwrap();
        store.create_directory("/home/maria").unwrap();
        store.create_file("/home/maria/notes.txt").unwrap();
        store.create_file("/home/readme").unwrap();

        let relative = store.render_tree("/home", false).unwrap();
        assert_eq!(relative, "/home\n├── maria\n    └── notes.txt\n└── readme\n");

        let absolute = store.render_tree("/home", true).unwrap();
        assert_eq!(
            absolute,
            "/home\n├── /home/maria\n    └── /home/maria/notes.txt\n└── /home/readme\n"
        );
    }

    #[test]
    fn test_dump_sorted_with_header() {
        let (_dir, store) = temp_store("node-7");
        store.create_directory("/b").unwrap();
        store.create_directory("/a").unwrap();

        let dump = store.dump();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines[0], "[Server node-7]");
        assert!(lines[1].starts_with("  /a -> {type=dir, parent=/, ts="));
        assert!(lines[2].starts_with("  /b -> {type=dir, parent=/, ts="));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_concurrent_creates_of_same_path_admit_one() {
        let (_dir, store) = temp_store("s0");
        let store = Arc::new(store);

        let successes = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    scope.spawn(move || store.create_directory("/race").is_ok())
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }

    // ============================================================
    // CHECKPOINT
    // ============================================================

    #[test]
    fn test_checkpoint_line_format() {
        let root = NamespaceEntry {
            path: "/".to_string(),
            kind: EntryKind::Directory,
            parent: None,
            created_at_ms: 10,
        };
        let file = NamespaceEntry {
            path: "/a/f".to_string(),
            kind: EntryKind::File,
            parent: Some("/a".to_string()),
            created_at_ms: 20,
        };

        assert_eq!(encode_line(&root), "/|dir|null|10");
        assert_eq!(encode_line(&file), "/a/f|file|/a|20");
        assert_eq!(decode_line("/a/f|file|/a|20"), Some(file));
    }

    #[test]
    fn test_checkpoint_rejects_malformed_records() {
        assert_eq!(decode_line("/a|dir|/"), None);
        assert_eq!(decode_line("/a|dir|/|1|extra"), None);
        assert_eq!(decode_line("/a|dir|/|not-a-number"), None);
        assert_eq!(decode_line("/a|socket|/|1"), None);
    }

    #[test]
    fn test_store_reloads_from_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("meta.txt");

        {
            let store = ShardStore::open("s0", &file);
            store.create_directory("/a").unwrap();
            store.create_file("/a/f").unwrap();
            store.create_directory("/b").unwrap();
            store.remove("/b").unwrap();
        }

        let reopened = ShardStore::open("s0", &file);
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.stat("/a/f").unwrap().kind, EntryKind::File);
        assert!(reopened.stat("/b").is_err());
    }

    #[test]
    fn test_load_skips_malformed_and_truncated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("meta.txt");
        std::fs::write(&file, "/a|dir|/|1\nbroken line\n\n/a/f|file|/a|2\n/a/g|fi").unwrap();

        let entries = Checkpoint::new(&file).load();

        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/a/f"]);
    }

    #[test]
    fn test_missing_checkpoint_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ShardStore::open("s0", dir.path().join("nested").join("meta.txt"));
        assert!(store.is_empty());

        // The first write creates the missing directory.
        store.create_directory("/a").unwrap();
        assert!(dir.path().join("nested").join("meta.txt").exists());
    }

    #[test]
    fn test_checkpoint_failure_keeps_in_memory_change() {
        let dir = tempfile::tempdir().unwrap();
        // The checkpoint path is a directory, so every save fails.
        let store = ShardStore::open("s0", dir.path());

        store.create_directory("/a").unwrap();

        assert!(store.stat("/a").is_ok());
    }

    // ============================================================
    // HTTP ENDPOINTS
    // ============================================================

    #[tokio::test]
    async fn test_http_create_and_query() {
        let shard = spawn_shard("s0").await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{}/mkdir", shard.url))
            .query(&[("path", "/docs")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "Directory created: /docs");

        let resp = client
            .post(format!("{}/touch", shard.url))
            .query(&[("path", "/docs/a.txt")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = client
            .get(format!("{}/readdir", shard.url))
            .query(&[("path", "/docs")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.text().await.unwrap(), "/docs/a.txt");

        let resp = client
            .get(format!("{}/stat", shard.url))
            .query(&[("path", "/docs/a.txt")])
            .send()
            .await
            .unwrap();
        let body = resp.text().await.unwrap();
        assert!(body.starts_with("Path: /docs/a.txt, Type: file, Parent: /docs, Timestamp: "));
    }

    #[tokio::test]
    async fn test_http_status_codes() {
        let shard = spawn_shard("s0").await;
        let client = reqwest::Client::new();
        shard.store.create_directory("/d").unwrap();
        shard.store.create_file("/d/f").unwrap();

        let status = |resp: reqwest::Response| resp.status();

        let conflict = client
            .post(format!("{}/mkdir?path=/d", shard.url))
            .send()
            .await
            .unwrap();
        assert_eq!(status(conflict), StatusCode::CONFLICT);

        let parent_missing = client
            .post(format!("{}/touch?path=/x/y", shard.url))
            .send()
            .await
            .unwrap();
        assert_eq!(status(parent_missing), StatusCode::NOT_FOUND);

        let not_empty = client
            .post(format!("{}/rm?path=/d", shard.url))
            .send()
            .await
            .unwrap();
        assert_eq!(status(not_empty), StatusCode::BAD_REQUEST);

        let not_dir = client
            .get(format!("{}/readdir?path=/d/f", shard.url))
            .send()
            .await
            .unwrap();
        assert_eq!(status(not_dir), StatusCode::BAD_REQUEST);

        let missing_param = client
            .get(format!("{}/stat", shard.url))
            .send()
            .await
            .unwrap();
        assert_eq!(missing_param.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            missing_param.text().await.unwrap(),
            "Missing or invalid 'path' parameter"
        );

        let wrong_method = client
            .get(format!("{}/mkdir?path=/z", shard.url))
            .send()
            .await
            .unwrap();
        assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(wrong_method.text().await.unwrap(), "Method not allowed");
    }

    #[tokio::test]
    async fn test_http_parent_verified_flag() {
        let shard = spawn_shard("s1").await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{}/mkdir", shard.url))
            .query(&[("path", "/home/maria"), ("parent_verified", "true")])
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_http_empty_readdir_and_default_tree() {
        let shard = spawn_shard("s0").await;
        let client = reqwest::Client::new();
        shard.store.create_directory("/e").unwrap();

        let resp = client
            .get(format!("{}/readdir?path=/e", shard.url))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.text().await.unwrap(), "(empty)");

        let resp = client.get(format!("{}/tree", shard.url)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "/\n└── e\n");

        let resp = client
            .get(format!("{}/dump", shard.url))
            .send()
            .await
            .unwrap();
        let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        assert!(resp.text().await.unwrap().starts_with("[Server s0]\n"));
    }
}
