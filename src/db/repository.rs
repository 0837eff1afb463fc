// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence of the workout store under a single storage key.

use crate::db::storage::KeyValueStorage;
use crate::error::Result;
use crate::services::store::{LoadReport, WorkoutStore};

/// Reads and writes the whole store as one blob.
#[derive(Debug, Clone)]
pub struct WorkoutRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> WorkoutRepository<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored workouts. A missing key is an empty store.
    pub fn load(&self) -> Result<(WorkoutStore, LoadReport)> {
        match self.storage.get(&self.key)? {
            Some(blob) => {
                let (store, report) = WorkoutStore::deserialize(&blob)?;
                tracing::info!(
                    key = %self.key,
                    loaded = report.loaded,
                    dropped = report.dropped_count(),
                    "Loaded stored workouts"
                );
                Ok((store, report))
            }
            None => {
                tracing::debug!(key = %self.key, "No stored workouts");
                Ok((WorkoutStore::new(), LoadReport::default()))
            }
        }
    }

    /// Serialize and write the store in one step.
    pub fn save(&mut self, store: &WorkoutStore) -> Result<()> {
        let blob = store.serialize()?;
        self.storage.set(&self.key, &blob)?;
        tracing::debug!(key = %self.key, count = store.len(), "Saved workouts");
        Ok(())
    }

    /// Remove the stored blob entirely.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared stored workouts");
        Ok(())
    }
}
