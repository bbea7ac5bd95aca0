//! CRUD operations over the cached collection.
//!
//! Every mutation follows the same shape: change the cache, take a snapshot,
//! write the snapshot to disk. A failed write is reported as
//! [`Error::Persist`] but the cache change is **not** undone, so the cache can
//! run ahead of the document until the next successful write or refresh.
//!
//! Mutations are not serialized against each other. The cache lock is released
//! before the write starts, so concurrent writes race on the file and the last
//! one to finish decides what is on disk.

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cache::SeriesCache;
use crate::error::{Error, Result};
use crate::record::{NewSerie, Patch, Serie};
use crate::store::JsonStore;

/// Series service coordinating the cache and the JSON document.
#[derive(Debug)]
pub struct SeriesService {
    store: JsonStore,
    cache: SeriesCache,
}

impl SeriesService {
    /// Create a service over `store`, serving reads from `cache`.
    pub fn new(store: JsonStore, cache: SeriesCache) -> Self {
        Self { store, cache }
    }

    /// Open a service with an empty cache and run [`SeriesService::warm_up`].
    pub async fn open(store: JsonStore) -> Self {
        let service = Self::new(store, SeriesCache::new());
        service.warm_up().await;
        service
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Make sure the document exists and load it into the cache.
    ///
    /// Failures are logged and swallowed; the cache keeps whatever it held.
    pub async fn warm_up(&self) {
        if let Err(e) = self.store.ensure_exists().await {
            error!(
                path = %self.store.path().display(),
                error = %e,
                "failed to create series document"
            );
            return;
        }

        match self.cache.refresh(&self.store).await {
            Ok(records) => info!(records, "series cache loaded"),
            Err(e) => error!(
                path = %self.store.path().display(),
                error = %e,
                "failed to load series cache"
            ),
        }
    }

    /// All records in stored order.
    pub fn list(&self) -> Vec<Serie> {
        self.cache.list()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Serie> {
        self.cache
            .find_by_id(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Records whose genre matches `gender`, ignoring case.
    pub fn filter_by_gender(&self, gender: &str) -> Result<Vec<Serie>> {
        if gender.is_empty() {
            return Err(Error::InvalidInput("gender not specified".to_string()));
        }

        let series = self.cache.filter_by_gender(gender);
        debug!(gender, matches = series.len(), "filtered series by gender");

        if series.is_empty() {
            return Err(Error::NoMatches(gender.to_string()));
        }
        Ok(series)
    }

    /// Add a new record with a generated id.
    pub async fn create(&self, new: NewSerie) -> Result<Serie> {
        let (name, gender, seasons) = new.validate()?;
        let id = Uuid::new_v4().to_string();
        let serie = Serie::new(id.clone(), name, gender, seasons);

        let snapshot = {
            let mut cache = self.cache.write();
            cache.append(serie.clone());
            cache.snapshot()
        };

        self.persist(&snapshot).await?;
        info!(id = %id, "serie created");
        Ok(serie)
    }

    /// Merge `patch` over the record with `id`.
    ///
    /// Unlike create and delete, update reloads the cache from disk before
    /// touching it, discarding any in-memory change that never reached disk.
    pub async fn update(&self, id: &str, patch: &Patch) -> Result<Serie> {
        self.cache.refresh(&self.store).await?;

        let (updated, snapshot) = {
            let mut cache = self.cache.write();
            let (index, current) = cache
                .find(id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            let updated = current.merged(patch);
            cache.replace_at(index, updated.clone());
            (updated, cache.snapshot())
        };

        self.persist(&snapshot).await?;
        info!(id, new_id = ?updated.id(), "serie updated");
        Ok(updated)
    }

    /// Remove the record with `id`, returning it.
    pub async fn delete(&self, id: &str) -> Result<Serie> {
        let (removed, snapshot) = {
            let mut cache = self.cache.write();
            let removed = cache
                .position(id)
                .and_then(|index| cache.remove_at(index))
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            (removed, cache.snapshot())
        };

        self.persist(&snapshot).await?;
        info!(id, "serie deleted");
        Ok(removed)
    }

    async fn persist(&self, snapshot: &[Serie]) -> Result<()> {
        self.store.save_all(snapshot).await.map_err(|e| {
            warn!(
                path = %self.store.path().display(),
                error = %e,
                "failed to persist series, cache is ahead of disk"
            );
            Error::Persist(Box::new(e))
        })
    }
}
