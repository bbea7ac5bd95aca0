//! In-memory mirror of the series document.

use parking_lot::{RwLock, RwLockWriteGuard};

use crate::error::Result;
use crate::record::Serie;
use crate::store::JsonStore;

/// Ordered in-memory copy of the collection.
///
/// The cache is never the source of truth: it is rebuilt wholesale from the
/// [`JsonStore`] and used to serve reads and stage writes. The lock only
/// protects the vector itself and is never held across I/O.
#[derive(Debug, Default)]
pub struct SeriesCache {
    records: RwLock<Vec<Serie>>,
}

impl SeriesCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache preloaded with `records`.
    pub fn with_records(records: Vec<Serie>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Replace the whole content with the document on disk.
    ///
    /// On failure the current content is kept and the error is returned.
    pub async fn refresh(&self, store: &JsonStore) -> Result<usize> {
        let records = store.load_all().await?;
        let count = records.len();
        *self.records.write() = records;
        Ok(count)
    }

    /// Snapshot of the current sequence.
    pub fn list(&self) -> Vec<Serie> {
        self.records.read().clone()
    }

    /// Number of cached records.
    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    /// Linear scan by id.
    pub fn find_by_id(&self, id: &str) -> Option<Serie> {
        self.records
            .read()
            .iter()
            .find(|s| s.id() == Some(id))
            .cloned()
    }

    /// All records whose genre equals `gender`, ignoring case, in stored order.
    pub fn filter_by_gender(&self, gender: &str) -> Vec<Serie> {
        self.records
            .read()
            .iter()
            .filter(|s| s.has_gender(gender))
            .cloned()
            .collect()
    }

    /// Lock the cache for a lookup followed by a mutation.
    pub fn write(&self) -> CacheWriter<'_> {
        CacheWriter {
            records: self.records.write(),
        }
    }
}

/// Exclusive access to the cache content.
///
/// Index lookups and the mutations using them must go through the same writer
/// so a concurrent request cannot shift positions in between.
pub struct CacheWriter<'a> {
    records: RwLockWriteGuard<'a, Vec<Serie>>,
}

impl CacheWriter<'_> {
    /// Index of the record with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|s| s.id() == Some(id))
    }

    /// Index and record with `id`.
    pub fn find(&self, id: &str) -> Option<(usize, &Serie)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, s)| s.id() == Some(id))
    }

    pub fn append(&mut self, record: Serie) {
        self.records.push(record);
    }

    /// Replace the record at `index`, returning the previous one.
    pub fn replace_at(&mut self, index: usize, record: Serie) -> Option<Serie> {
        self.records
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Remove the record at `index`, shifting later records down.
    pub fn remove_at(&mut self, index: usize) -> Option<Serie> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Copy of the content, taken before the lock is released for a persist.
    pub fn snapshot(&self) -> Vec<Serie> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn records() -> Vec<Serie> {
        vec![
            Serie::new("1", "Dark", "Drama", 3),
            Serie::new("2", "Friends", "Comedy", 10),
            Serie::new("3", "Succession", "drama", 4),
        ]
    }

    #[test]
    fn test_find_by_id() {
        let cache = SeriesCache::with_records(records());

        assert_eq!(cache.find_by_id("2").unwrap().name(), Some(&json!("Friends")));
        assert!(cache.find_by_id("42").is_none());
    }

    #[test]
    fn test_filter_by_gender_keeps_order() {
        let cache = SeriesCache::with_records(records());

        let ids: Vec<_> = cache
            .filter_by_gender("DRAMA")
            .into_iter()
            .filter_map(|s| s.id().map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(cache.filter_by_gender("Drama"), cache.filter_by_gender("drama"));
        assert!(cache.filter_by_gender("Horror").is_empty());
    }

    #[test]
    fn test_writer_mutations() {
        let cache = SeriesCache::with_records(records());

        {
            let mut writer = cache.write();
            writer.append(Serie::new("4", "Lost", "Mystery", 6));

            let (index, current) = writer.find("2").unwrap();
            let liked = current.merged(&json!({ "liked": true }).as_object().unwrap().clone());
            let old = writer.replace_at(index, liked).unwrap();
            assert!(!old.liked());
            assert_eq!(writer.position("2"), Some(index));
            assert!(writer.find("42").is_none());

            let removed = writer.remove_at(0).unwrap();
            assert_eq!(removed.id(), Some("1"));
            assert!(writer.remove_at(10).is_none());
            assert!(writer.replace_at(10, removed).is_none());
        }

        let ids: Vec<_> = cache
            .list()
            .into_iter()
            .filter_map(|s| s.id().map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
        assert!(cache.find_by_id("2").unwrap().liked());
    }

    #[tokio::test]
    async fn test_refresh_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("database.json"));
        store.save_all(&records()[..1]).await.unwrap();

        let cache = SeriesCache::with_records(records());
        assert_eq!(cache.refresh(&store).await.unwrap(), 1);
        assert_eq!(cache.count(), 1);
        assert_eq!(cache.list()[0].id(), Some("1"));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "[{").unwrap();
        let store = JsonStore::new(&path);

        let cache = SeriesCache::with_records(records());
        assert!(matches!(cache.refresh(&store).await, Err(Error::Parse(_))));
        assert_eq!(cache.list(), records());
    }
}
