// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering surfaces the controller drives.
//!
//! The map, the form and the workout list are external collaborators.
//! Adapters implement these traits for a concrete UI and turn that UI's
//! native events into [`crate::controller::UiEvent`] values passed to
//! [`crate::controller::Controller::handle`].

pub mod console;

use std::time::Duration;

use crate::models::{Coords, FormFields, Workout, WorkoutId, WorkoutType};

/// Opaque handle to a marker owned by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// How the map moves to a new view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub animate: bool,
    pub pan_duration: Duration,
}

impl ViewOptions {
    /// Jump straight to the view.
    pub fn instant() -> Self {
        Self {
            animate: false,
            pan_duration: Duration::ZERO,
        }
    }

    pub fn animated(pan_duration: Duration) -> Self {
        Self {
            animate: true,
            pan_duration,
        }
    }
}

/// Pannable, zoomable map with markers.
pub trait MapSurface {
    fn set_view(&mut self, center: Coords, zoom: f64, options: ViewOptions);

    fn add_marker(&mut self, coords: Coords) -> MarkerHandle;

    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Attach (or replace) the popup shown for a workout's marker.
    fn bind_popup(&mut self, marker: MarkerHandle, workout: &Workout);

    /// Enable or disable drag, zoom and keyboard navigation.
    fn set_interaction_enabled(&mut self, enabled: bool);
}

/// The workout entry form.
pub trait FormSurface {
    /// Current field values as raw strings.
    fn read_fields(&self) -> FormFields;

    fn show(&mut self);

    /// Hide the form. `settle` is the delay before its visual state resets.
    fn hide(&mut self, settle: Duration);

    fn prefill(&mut self, workout: &Workout);

    /// Clear every input.
    fn reset(&mut self);

    /// Show the input that belongs to the given type (cadence or elevation).
    fn show_fields_for(&mut self, workout_type: WorkoutType);
}

/// The workout list with its options bar and confirmation modal.
pub trait ListSurface {
    /// Append one entry.
    fn render(&mut self, workout: &Workout);

    fn remove(&mut self, id: &WorkoutId);

    /// Remove every entry (and any selection mark).
    fn clear(&mut self);

    fn mark_selected(&mut self, id: &WorkoutId);

    fn clear_selected(&mut self);

    /// Hide an entry while it is being edited, or show it again.
    fn set_hidden(&mut self, id: &WorkoutId, hidden: bool);

    fn show_options(&mut self);

    fn hide_options(&mut self);

    /// Stage the workouts pending deletion.
    fn show_confirm_modal(&mut self, items: &[&Workout]);

    fn hide_confirm_modal(&mut self);

    /// Tell the user something went wrong.
    fn alert(&mut self, message: &str);
}
