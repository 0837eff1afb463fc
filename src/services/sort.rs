// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only sorted views over a [`WorkoutStore`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::ValidationError;
use crate::models::Workout;
use crate::services::store::WorkoutStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Distance,
    Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort overlay applied on top of the controller's mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    key: Option<SortKey>,
    order: SortOrder,
}

impl SortState {
    pub fn key(&self) -> Option<SortKey> {
        self.key
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    pub fn set_key(&mut self, key: SortKey) {
        self.key = Some(key);
    }

    /// Choose an order. Rejected until a key has been chosen.
    pub fn set_order(&mut self, order: SortOrder) -> Result<(), ValidationError> {
        if self.key.is_none() {
            return Err(ValidationError::SortKeyRequired);
        }
        self.order = order;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl WorkoutStore {
    /// Workouts in display order for the given sort state.
    pub fn view(&self, sort: &SortState) -> Vec<&Workout> {
        match sort.key() {
            Some(key) => self.sorted(key, sort.order()),
            None => self.iter().collect(),
        }
    }

    /// Stable sort by `key`; ties keep insertion order in both directions.
    pub fn sorted(&self, key: SortKey, order: SortOrder) -> Vec<&Workout> {
        let mut view: Vec<&Workout> = self.iter().collect();
        view.sort_by(|a, b| {
            let ordering = compare(a, b, key);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        view
    }
}

fn compare(a: &Workout, b: &Workout, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.created_at().cmp(&b.created_at()),
        SortKey::Distance => a.distance().total_cmp(&b.distance()),
        SortKey::Duration => a.duration().total_cmp(&b.duration()),
    }
}
