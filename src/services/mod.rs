// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - workout collection, sorting and location lookup.

pub mod location;
pub mod sort;
pub mod store;

pub use location::{ConfiguredLocation, LocationError, LocationService};
pub use sort::{SortKey, SortOrder, SortState};
pub use store::{DroppedRecord, LoadReport, WorkoutStore};
