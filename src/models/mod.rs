// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod form;
pub mod record;
pub mod workout;

pub use form::FormFields;
pub use record::StoredWorkout;
pub use workout::{
    ActivityInput, Coords, Metric, Workout, WorkoutId, WorkoutInput, WorkoutKind, WorkoutType,
};
