// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use pinned_workouts::config::Config;
use pinned_workouts::controller::Controller;
use pinned_workouts::db::{MemoryStorage, WorkoutRepository};
use pinned_workouts::models::{Coords, FormFields, Workout, WorkoutId, WorkoutType};
use pinned_workouts::services::ConfiguredLocation;
use pinned_workouts::surfaces::{
    FormSurface, ListSurface, MapSurface, MarkerHandle, ViewOptions,
};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

pub const KEY: &str = "workouts";

/// Map that remembers markers, popups and view changes.
#[derive(Debug, Default)]
pub struct RecordingMap {
    next: u64,
    pub markers: HashMap<MarkerHandle, Coords>,
    pub popups: HashMap<MarkerHandle, WorkoutId>,
    pub views: Vec<(Coords, f64, ViewOptions)>,
    pub interaction_disabled: bool,
}

#[allow(dead_code)]
impl RecordingMap {
    pub fn marker_at(&self, coords: Coords) -> Option<MarkerHandle> {
        self.markers
            .iter()
            .find(|(_, c)| **c == coords)
            .map(|(m, _)| *m)
    }
}

impl MapSurface for RecordingMap {
    fn set_view(&mut self, center: Coords, zoom: f64, options: ViewOptions) {
        self.views.push((center, zoom, options));
    }

    fn add_marker(&mut self, coords: Coords) -> MarkerHandle {
        self.next += 1;
        let marker = MarkerHandle(self.next);
        self.markers.insert(marker, coords);
        marker
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        assert!(
            self.markers.remove(&marker).is_some(),
            "removed unknown marker {:?}",
            marker
        );
        self.popups.remove(&marker);
    }

    fn bind_popup(&mut self, marker: MarkerHandle, workout: &Workout) {
        assert!(self.markers.contains_key(&marker), "popup on unknown marker");
        self.popups.insert(marker, workout.id().clone());
    }

    fn set_interaction_enabled(&mut self, enabled: bool) {
        self.interaction_disabled = !enabled;
    }
}

/// Form holding typed values and visibility.
#[derive(Debug, Default)]
pub struct RecordingForm {
    pub fields: FormFields,
    pub visible: bool,
    pub prefilled: Option<WorkoutId>,
    pub shown_type: Option<WorkoutType>,
    pub hide_delays: Vec<Duration>,
}

#[allow(dead_code)]
impl RecordingForm {
    pub fn type_in(&mut self, workout_type: &str, distance: &str, duration: &str, extra: &str) {
        self.fields = FormFields {
            workout_type: workout_type.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: extra.to_string(),
            elevation: extra.to_string(),
        };
    }
}

impl FormSurface for RecordingForm {
    fn read_fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self, settle: Duration) {
        self.visible = false;
        self.hide_delays.push(settle);
    }

    fn prefill(&mut self, workout: &Workout) {
        self.fields = FormFields::from_workout(workout);
        self.prefilled = Some(workout.id().clone());
    }

    fn reset(&mut self) {
        self.fields = FormFields::default();
        self.prefilled = None;
    }

    fn show_fields_for(&mut self, workout_type: WorkoutType) {
        self.shown_type = Some(workout_type);
    }
}

/// List that checks the single-selection invariant on every call.
#[derive(Debug, Default)]
pub struct RecordingList {
    pub entries: Vec<WorkoutId>,
    pub hidden: HashSet<WorkoutId>,
    pub selected: Option<WorkoutId>,
    pub options_visible: bool,
    pub modal: Option<Vec<WorkoutId>>,
    pub alerts: Vec<String>,
}

impl ListSurface for RecordingList {
    fn render(&mut self, workout: &Workout) {
        assert!(
            !self.entries.contains(workout.id()),
            "entry rendered twice: {}",
            workout.id()
        );
        self.entries.push(workout.id().clone());
    }

    fn remove(&mut self, id: &WorkoutId) {
        self.entries.retain(|e| e != id);
        self.hidden.remove(id);
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.hidden.clear();
        self.selected = None;
    }

    fn mark_selected(&mut self, id: &WorkoutId) {
        assert!(
            self.selected.is_none(),
            "two workouts selected: {:?} and {}",
            self.selected,
            id
        );
        self.selected = Some(id.clone());
    }

    fn clear_selected(&mut self) {
        self.selected = None;
    }

    fn set_hidden(&mut self, id: &WorkoutId, hidden: bool) {
        if hidden {
            self.hidden.insert(id.clone());
        } else {
            self.hidden.remove(id);
        }
    }

    fn show_options(&mut self) {
        self.options_visible = true;
    }

    fn hide_options(&mut self) {
        self.options_visible = false;
    }

    fn show_confirm_modal(&mut self, items: &[&Workout]) {
        self.modal = Some(items.iter().map(|w| w.id().clone()).collect());
    }

    fn hide_confirm_modal(&mut self) {
        self.modal = None;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

pub type TestController =
    Controller<RecordingMap, RecordingForm, RecordingList, MemoryStorage>;

#[allow(dead_code)]
pub fn london() -> Coords {
    Coords::new(51.5, -0.1)
}

/// Controller over the given storage, not yet started.
#[allow(dead_code)]
pub fn controller_with(storage: MemoryStorage) -> TestController {
    Controller::new(
        Config::default(),
        RecordingMap::default(),
        RecordingForm::default(),
        RecordingList::default(),
        WorkoutRepository::new(storage, KEY),
    )
}

/// Started controller with a working map and empty storage.
#[allow(dead_code)]
pub async fn started() -> TestController {
    started_with(MemoryStorage::new()).await
}

#[allow(dead_code)]
pub async fn started_with(storage: MemoryStorage) -> TestController {
    let mut controller = controller_with(storage);
    controller
        .start(&ConfiguredLocation::new(Some(london())))
        .await;
    controller
}

/// The raw blob currently persisted.
#[allow(dead_code)]
pub fn persisted(controller: &TestController) -> Option<String> {
    use pinned_workouts::db::KeyValueStorage;
    controller.repository().storage().get(KEY).unwrap()
}
