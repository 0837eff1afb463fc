// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exclusive interaction modes.

use crate::models::{Coords, WorkoutId};
use crate::surfaces::MarkerHandle;

/// What the controller is doing right now. Exactly one at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Mode {
    #[default]
    Idle,
    /// Map clicked, form open, provisional marker on the map.
    Creating { coords: Coords, marker: MarkerHandle },
    /// Form reopened, prefilled from this workout.
    Editing { workout_id: WorkoutId },
    /// Deletion staged in the confirmation modal.
    ConfirmingDelete { target: DeleteTarget },
}

/// What a pending deletion removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Single(WorkoutId),
    All,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Creating { .. } => "creating",
            Mode::Editing { .. } => "editing",
            Mode::ConfirmingDelete { .. } => "confirming_delete",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    /// True while the entry form is showing.
    pub fn has_open_form(&self) -> bool {
        matches!(self, Mode::Creating { .. } | Mode::Editing { .. })
    }
}
