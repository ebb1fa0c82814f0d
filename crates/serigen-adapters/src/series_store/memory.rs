//! In-memory series store.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serigen_core::{
    application::{ApplicationError, ports::SeriesStore},
    domain::{DomainValidator, SeriesConfig},
    error::{SerigenError, SerigenResult},
};
use tracing::debug;
use uuid::Uuid;

/// Thread-safe in-memory series store.
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct InMemorySeriesStore {
    inner: Arc<RwLock<HashMap<Uuid, SeriesConfig>>>,
}

impl InMemorySeriesStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store seeded with the given series.
    pub fn with_series(series: impl IntoIterator<Item = SeriesConfig>) -> SerigenResult<Self> {
        let store = Self::new();
        for config in series {
            store.insert(config)?;
        }
        Ok(store)
    }

    /// Get the number of series.
    ///
    /// Reports 0 when the lock is poisoned; the fallible methods report
    /// `StoreLockError` instead.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all series.
    pub fn clear(&self) -> SerigenResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> SerigenResult<RwLockReadGuard<'_, HashMap<Uuid, SeriesConfig>>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> SerigenResult<RwLockWriteGuard<'_, HashMap<Uuid, SeriesConfig>>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl Default for InMemorySeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalise and validate a definition on its way in.
fn prepare(config: SeriesConfig) -> SerigenResult<SeriesConfig> {
    let config = config.normalized();
    DomainValidator::validate_config(&config).map_err(SerigenError::Domain)?;
    Ok(config)
}

/// Reject `config` if a different record already owns its key.
fn ensure_key_free(
    inner: &HashMap<Uuid, SeriesConfig>,
    config: &SeriesConfig,
) -> SerigenResult<()> {
    let taken = inner
        .values()
        .any(|other| other.id != config.id && other.matches(&config.type_of, &config.type_value));

    if taken {
        return Err(ApplicationError::DuplicateSeries { key: config.key() }.into());
    }
    Ok(())
}

impl SeriesStore for InMemorySeriesStore {
    fn candidates(&self, type_of: &str) -> SerigenResult<Vec<SeriesConfig>> {
        let inner = self.read()?;

        Ok(inner
            .values()
            .filter(|c| c.type_of == type_of)
            .cloned()
            .collect())
    }

    fn get(&self, id: Uuid) -> SerigenResult<SeriesConfig> {
        let inner = self.read()?;

        inner
            .get(&id)
            .cloned()
            .ok_or_else(|| ApplicationError::SeriesNotFound { id }.into())
    }

    fn list(&self) -> SerigenResult<Vec<SeriesConfig>> {
        let inner = self.read()?;

        let mut all: Vec<SeriesConfig> = inner.values().cloned().collect();
        all.sort_by(|a, b| {
            (a.type_of.as_str(), a.type_value.as_str())
                .cmp(&(b.type_of.as_str(), b.type_value.as_str()))
        });
        Ok(all)
    }

    fn insert(&self, config: SeriesConfig) -> SerigenResult<()> {
        let config = prepare(config)?;
        let mut inner = self.write()?;

        if inner.contains_key(&config.id) {
            return Err(ApplicationError::DuplicateSeries { key: config.key() }.into());
        }
        ensure_key_free(&inner, &config)?;

        debug!(series = %config.key(), id = %config.id, "Series inserted");
        inner.insert(config.id, config);
        Ok(())
    }

    fn update(&self, config: SeriesConfig) -> SerigenResult<()> {
        let mut config = prepare(config)?;
        let mut inner = self.write()?;

        let Some(stored) = inner.get(&config.id) else {
            return Err(ApplicationError::SeriesNotFound { id: config.id }.into());
        };
        ensure_key_free(&inner, &config)?;

        // Counter state only moves through `commit`.
        config.last_counter = stored.last_counter;
        config.last_value.clone_from(&stored.last_value);
        config.last_prefix.clone_from(&stored.last_prefix);

        debug!(series = %config.key(), id = %config.id, "Series updated");
        inner.insert(config.id, config);
        Ok(())
    }

    fn remove(&self, id: Uuid) -> SerigenResult<()> {
        let mut inner = self.write()?;

        inner
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::SeriesNotFound { id }.into())
    }

    fn commit(&self, expected: &SeriesConfig, updated: &SeriesConfig) -> SerigenResult<bool> {
        let mut inner = self.write()?;

        let stored = inner
            .get_mut(&updated.id)
            .ok_or(ApplicationError::SeriesNotFound { id: updated.id })?;

        if stored.generation_state() != expected.generation_state() {
            debug!(series = %stored.key(), "Stale commit rejected");
            return Ok(false);
        }

        // Only the counter state moves; definition edits made meanwhile stay.
        stored.last_counter = updated.last_counter;
        stored.last_value.clone_from(&updated.last_value);
        stored.last_prefix.clone_from(&updated.last_prefix);
        Ok(true)
    }
}
