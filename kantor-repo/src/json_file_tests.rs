//! History store integration tests.

#[cfg(test)]
mod tests {
    use kantor_types::{CalcResult, History, HistoryEntry, HistoryStore, RepoError};
    use tempfile::tempdir;

    use crate::{InMemoryStore, JsonFileStore, Repo, build_repo};

    fn entry(i: usize) -> HistoryEntry {
        HistoryEntry::new(
            format!("{i} + 1"),
            CalcResult::Value((i + 1) as f64),
            format!("2025-10-25 12:00:{i:02}"),
        )
    }

    #[tokio::test]
    async fn test_open_creates_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = JsonFileStore::open(&path).await.unwrap();

        assert!(path.exists());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"history":[]}"#);
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("history.json");

        JsonFileStore::open(&path).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("history.json"))
            .await
            .unwrap();

        let history: History = (1..=3).map(entry).collect();
        store.write(&history).await.unwrap();

        assert_eq!(store.read().await.unwrap(), history);
    }

    #[tokio::test]
    async fn test_history_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        let mut history = store.read().await.unwrap();
        history.push(entry(5));
        store.write(&history).await.unwrap();
        store.close().await.unwrap();

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let loaded = reopened.read().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0], entry(5));
    }

    #[tokio::test]
    async fn test_write_is_pretty_json_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        store.write(&(1..=2).map(entry).collect::<History>()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["history"].as_array().unwrap().len(), 2);
        assert_eq!(value["history"][0]["expression"], "2 + 1");
    }

    #[tokio::test]
    async fn test_existing_file_is_not_truncated_on_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"{"history": [{"expression": "5 + 3", "result": 8, "timestamp": "2025-10-25 12:00:00"}]}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        let history = store.read().await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].result, CalcResult::Value(8.0));
    }

    #[tokio::test]
    async fn test_oversized_file_reads_newest_ten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let entries: Vec<_> = (1..=12).rev().map(entry).collect();
        std::fs::write(
            &path,
            serde_json::to_string(&serde_json::json!({ "history": entries })).unwrap(),
        )
        .unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        let history = store.read().await.unwrap();

        assert_eq!(history.len(), 10);
        assert_eq!(history.entries()[0], entry(12));
    }

    #[tokio::test]
    async fn test_empty_or_corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        for contents in ["", "   ", "{not json", "[1, 2, 3]"] {
            std::fs::write(&path, contents).unwrap();
            let store = JsonFileStore::open(&path).await.unwrap();
            assert!(
                store.read().await.unwrap().is_empty(),
                "{contents:?} should read as empty"
            );
        }
    }

    #[tokio::test]
    async fn test_closed_store_rejects_operations() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("history.json"))
            .await
            .unwrap();

        store.close().await.unwrap();

        assert!(matches!(store.read().await, Err(RepoError::Io(_))));
        assert!(matches!(
            store.write(&History::new()).await,
            Err(RepoError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert!(store.read().await.unwrap().is_empty());

        let history: History = (1..=2).map(entry).collect();
        store.write(&history).await.unwrap();

        assert_eq!(store.read().await.unwrap(), history);
    }

    #[tokio::test]
    async fn test_build_repo_selects_adapter() {
        let memory = build_repo(":memory:").await.unwrap();
        assert!(matches!(memory, Repo::Memory(_)));

        let dir = tempdir().unwrap();
        let location = dir.path().join("history.json");
        let file = build_repo(location.to_str().unwrap()).await.unwrap();
        assert!(matches!(file, Repo::File(_)));

        file.write(&(1..=1).map(entry).collect::<History>()).await.unwrap();
        assert_eq!(file.read().await.unwrap().len(), 1);
    }
}
