// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory ordered workout collection.
//!
//! Insertion order is display order. Sorting only produces a borrowed view
//! (see [`crate::services::sort`]) and never reorders the store.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{StoredWorkout, Workout, WorkoutId};

/// Ordered sequence of workouts with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn get(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &WorkoutId) -> Option<usize> {
        self.workouts.iter().position(|w| w.id() == id)
    }

    /// Append a workout.
    pub fn add(&mut self, workout: Workout) -> Result<()> {
        if self.contains(workout.id()) {
            return Err(AppError::DuplicateId(workout.id().clone()));
        }
        self.workouts.push(workout);
        Ok(())
    }

    /// Remove and return the workout with the given id.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> Result<Workout> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        Ok(self.workouts.remove(index))
    }

    /// Swap in a new workout at the old one's position.
    ///
    /// The replacement may keep the old id. Any other id must not already
    /// be present.
    pub fn replace(&mut self, id: &WorkoutId, workout: Workout) -> Result<Workout> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        if workout.id() != id && self.contains(workout.id()) {
            return Err(AppError::DuplicateId(workout.id().clone()));
        }
        Ok(std::mem::replace(&mut self.workouts[index], workout))
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    /// Serialize to the durable blob: a JSON array of stored records.
    pub fn serialize(&self) -> Result<String> {
        let records: Vec<StoredWorkout> = self.workouts.iter().map(StoredWorkout::from).collect();
        serde_json::to_string(&records)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize workouts: {}", e)))
    }

    /// Rebuild a store from a blob written by [`WorkoutStore::serialize`].
    ///
    /// Records with an unknown type, a malformed shape, failed validation
    /// or a repeated id are skipped and listed in the report. Only a blob
    /// that is not a JSON array at all is an error.
    pub fn deserialize(blob: &str) -> Result<(Self, LoadReport)> {
        let values: Vec<Value> = serde_json::from_str(blob)
            .map_err(|e| AppError::StorageCorrupt(format!("expected a JSON array: {}", e)))?;

        let mut store = Self::new();
        let mut report = LoadReport::default();

        for (index, value) in values.into_iter().enumerate() {
            let workout = serde_json::from_value::<StoredWorkout>(value)
                .map_err(|e| e.to_string())
                .and_then(|record| Workout::try_from(record).map_err(|e| e.to_string()));

            let outcome = match workout {
                Ok(workout) => store.add(workout).map_err(|e| e.to_string()),
                Err(reason) => Err(reason),
            };

            match outcome {
                Ok(()) => report.loaded += 1,
                Err(reason) => {
                    tracing::warn!(index, reason = %reason, "Dropping stored workout");
                    report.dropped.push(DroppedRecord { index, reason });
                }
            }
        }

        Ok((store, report))
    }
}

/// Outcome of loading a stored blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Records rebuilt into workouts.
    pub loaded: usize,
    /// Records that were skipped.
    pub dropped: Vec<DroppedRecord>,
}

impl LoadReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// A skipped record and why it was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRecord {
    /// Position in the stored array
    pub index: usize,
    pub reason: String,
}
