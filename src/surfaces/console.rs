// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Headless surfaces that log what a real UI would draw.

use std::time::Duration;

use crate::models::{Coords, FormFields, Metric, Workout, WorkoutId, WorkoutType};
use crate::surfaces::{FormSurface, ListSurface, MapSurface, MarkerHandle, ViewOptions};
use crate::time_utils::format_utc_rfc3339;

#[derive(Debug, Default)]
pub struct ConsoleMap {
    next_marker: u64,
}

impl MapSurface for ConsoleMap {
    fn set_view(&mut self, center: Coords, zoom: f64, options: ViewOptions) {
        tracing::info!(
            lat = center.lat,
            lng = center.lng,
            zoom,
            animate = options.animate,
            pan_ms = options.pan_duration.as_millis() as u64,
            "map: set view"
        );
    }

    fn add_marker(&mut self, coords: Coords) -> MarkerHandle {
        self.next_marker += 1;
        tracing::info!(
            marker = self.next_marker,
            lat = coords.lat,
            lng = coords.lng,
            "map: marker added"
        );
        MarkerHandle(self.next_marker)
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        tracing::info!(marker = marker.0, "map: marker removed");
    }

    fn bind_popup(&mut self, marker: MarkerHandle, workout: &Workout) {
        tracing::info!(marker = marker.0, popup = %popup_text(workout), "map: popup bound");
    }

    fn set_interaction_enabled(&mut self, enabled: bool) {
        tracing::info!(enabled, "map: interaction");
    }
}

/// Form whose fields are filled by the driver instead of widgets.
#[derive(Debug, Default)]
pub struct ConsoleForm {
    fields: FormFields,
}

impl ConsoleForm {
    pub fn set_fields(&mut self, fields: FormFields) {
        self.fields = fields;
    }
}

impl FormSurface for ConsoleForm {
    fn read_fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn show(&mut self) {
        tracing::info!("form: shown");
    }

    fn hide(&mut self, settle: Duration) {
        tracing::info!(settle_ms = settle.as_millis() as u64, "form: hidden");
    }

    fn prefill(&mut self, workout: &Workout) {
        self.fields = FormFields::from_workout(workout);
        tracing::info!(workout_id = %workout.id(), "form: prefilled");
    }

    fn reset(&mut self) {
        let workout_type = std::mem::take(&mut self.fields.workout_type);
        self.fields = FormFields {
            workout_type,
            ..FormFields::default()
        };
    }

    fn show_fields_for(&mut self, workout_type: WorkoutType) {
        self.fields.workout_type = workout_type.as_str().to_string();
        tracing::info!(workout_type = %workout_type, "form: type changed");
    }
}

#[derive(Debug, Default)]
pub struct ConsoleList;

impl ListSurface for ConsoleList {
    fn render(&mut self, workout: &Workout) {
        tracing::info!(
            workout_id = %workout.id(),
            created_at = %format_utc_rfc3339(workout.created_at()),
            entry = %entry_text(workout),
            "list: entry"
        );
    }

    fn remove(&mut self, id: &WorkoutId) {
        tracing::info!(workout_id = %id, "list: entry removed");
    }

    fn clear(&mut self) {
        tracing::info!("list: cleared");
    }

    fn mark_selected(&mut self, id: &WorkoutId) {
        tracing::info!(workout_id = %id, "list: selected");
    }

    fn clear_selected(&mut self) {
        tracing::debug!("list: selection cleared");
    }

    fn set_hidden(&mut self, id: &WorkoutId, hidden: bool) {
        tracing::info!(workout_id = %id, hidden, "list: visibility");
    }

    fn show_options(&mut self) {
        tracing::debug!("list: options shown");
    }

    fn hide_options(&mut self) {
        tracing::debug!("list: options hidden");
    }

    fn show_confirm_modal(&mut self, items: &[&Workout]) {
        let ids: Vec<String> = items.iter().map(|w| w.id().to_string()).collect();
        tracing::info!(count = items.len(), ids = ?ids, "list: confirm delete?");
    }

    fn hide_confirm_modal(&mut self) {
        tracing::debug!("list: confirm modal hidden");
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!(alert = message, "list: alert");
    }
}

fn popup_text(workout: &Workout) -> String {
    let icon = match workout.workout_type() {
        WorkoutType::Running => "🏃‍♂️",
        WorkoutType::Cycling => "🚴‍♀️",
    };
    format!("{} {}", icon, workout.description())
}

fn entry_text(workout: &Workout) -> String {
    let metric = match workout.metric() {
        Metric::Pace(pace) => format!("{:.1} min/km", pace),
        Metric::Speed(speed) => format!("{:.1} km/h", speed),
    };
    let extra = match workout.workout_type() {
        WorkoutType::Running => format!("{} spm", workout.cadence().unwrap_or_default()),
        WorkoutType::Cycling => format!("{} m", workout.elevation_gain().unwrap_or_default()),
    };
    format!(
        "{} | {} km | {} min | {} | {}",
        workout.description(),
        workout.distance(),
        workout.duration(),
        metric,
        extra
    )
}
