//! On-disk JSON document holding the whole collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::Result;
use crate::record::Serie;

/// Persistent store backed by a single JSON array file.
///
/// Every save rewrites the full document in place. There is no temp file and
/// rename, so a crash in the middle of [`JsonStore::save_all`] can leave a
/// truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for the document at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the document as an empty array if it does not exist yet.
    ///
    /// An existing file is left alone and its content is not checked.
    pub async fn ensure_exists(&self) -> Result<()> {
        match fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&self.path, b"[]").await?;
                tracing::info!(path = %self.path.display(), "created empty series document");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read and parse the full collection.
    pub async fn load_all(&self) -> Result<Vec<Serie>> {
        let data = fs::read(&self.path).await?;
        let records: Vec<Serie> = serde_json::from_slice(&data)?;
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "loaded series document"
        );
        Ok(records)
    }

    /// Overwrite the document with `records`.
    pub async fn save_all(&self, records: &[Serie]) -> Result<()> {
        let data = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, data).await?;
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "saved series document"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn sample() -> Vec<Serie> {
        vec![
            Serie::new("1", "Dark", "Drama", 3),
            Serie::new("2", "Friends", "Comedy", json!({ "count": 10 })),
        ]
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("database.json"));

        store.ensure_exists().await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "[]");
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_exists_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonStore::new(&path);
        store.ensure_exists().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }

    #[tokio::test]
    async fn test_ensure_exists_fails_without_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("missing").join("database.json"));

        assert!(matches!(store.ensure_exists().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("database.json"));

        assert!(matches!(store.load_all().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_load_malformed_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        let store = JsonStore::new(&path);

        std::fs::write(&path, "{ broken").unwrap();
        assert!(matches!(store.load_all().await, Err(Error::Parse(_))));

        std::fs::write(&path, r#"{"id": "1"}"#).unwrap();
        assert!(matches!(store.load_all().await, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_save_then_load_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("database.json"));

        store.save_all(&sample()).await.unwrap();
        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, sample());

        store.save_all(&loaded).await.unwrap();
        assert_eq!(store.load_all().await.unwrap(), loaded);
    }

    #[tokio::test]
    async fn test_save_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("database.json"));

        store.save_all(&sample()[..1]).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\": \"1\""));
    }
}
