// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Startup loading and write-through persistence.

use pinned_workouts::config::Config;
use pinned_workouts::controller::{Controller, OptionAction, UiEvent};
use pinned_workouts::db::{FileStorage, KeyValueStorage, MemoryStorage, WorkoutRepository};
use pinned_workouts::models::{Coords, WorkoutId, WorkoutType};
use pinned_workouts::services::{ConfiguredLocation, WorkoutStore};
use pinned_workouts::AppError;

mod common;
use common::{
    controller_with, london, persisted, started, started_with, RecordingForm, RecordingList,
    RecordingMap, KEY,
};

const MIXED_BLOB: &str = r#"[
    {"type":"running","id":"run-1","date":"2026-04-01T08:00:00Z","coords":[51.5,-0.1],
     "distance":5,"duration":30,"cadence":150,"pace":99,"description":"stale"},
    {"type":"swimming","id":"swim-1","date":"2026-04-02T08:00:00Z","coords":[51.5,-0.1],
     "distance":1,"duration":40}
]"#;

#[tokio::test]
async fn test_startup_skips_unknown_records() {
    let mut controller = controller_with(MemoryStorage::with_entry(KEY, MIXED_BLOB));

    let report = controller
        .start(&ConfiguredLocation::new(Some(london())))
        .await;

    assert!(report.map_ready);
    assert_eq!(report.loaded, 1);
    assert_eq!(report.dropped, 1);

    let workout = controller.store().get(&WorkoutId::from("run-1")).unwrap();
    assert_eq!(workout.pace(), Some(6.0));
    assert_eq!(workout.description(), "Running on April 1");
    assert_eq!(controller.list().entries, vec![WorkoutId::from("run-1")]);
    assert_eq!(controller.map().markers.len(), 1);
    assert_eq!(controller.map().popups.len(), 1);
}

#[tokio::test]
async fn test_startup_with_unreadable_blob_starts_empty() {
    let mut controller = controller_with(MemoryStorage::with_entry(KEY, "{\"not\":\"an array\"}"));

    let report = controller
        .start(&ConfiguredLocation::new(Some(london())))
        .await;

    assert_eq!(report.loaded, 0);
    assert!(controller.store().is_empty());
    assert!(controller.list().alerts.is_empty());

    // The first save overwrites the unreadable blob.
    controller.handle(UiEvent::MapClick(london())).unwrap();
    controller
        .form_mut()
        .type_in("running", "5", "30", "150");
    controller.handle(UiEvent::FormSubmit).unwrap();

    let (store, report) = WorkoutStore::deserialize(&persisted(&controller).unwrap()).unwrap();
    assert_eq!(store.len(), 1);
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_location_failure_lists_but_blocks_creation() {
    let mut controller = controller_with(MemoryStorage::with_entry(KEY, MIXED_BLOB));

    let report = controller.start(&ConfiguredLocation::new(None)).await;

    assert!(!report.map_ready);
    assert!(!controller.is_map_ready());
    assert_eq!(controller.list().alerts.len(), 1);
    assert!(controller.map().views.is_empty());
    assert!(controller.map().markers.is_empty());
    assert_eq!(controller.list().entries.len(), 1);

    controller.handle(UiEvent::MapClick(london())).unwrap();

    assert!(controller.mode().is_idle());
    assert!(controller.map().markers.is_empty());
    assert!(!controller.form().visible);
}

#[tokio::test]
async fn test_reload_restores_same_workouts() {
    let mut controller = started().await;
    for (workout_type, distance, extra) in [("running", "5", "150"), ("cycling", "20", "100")] {
        controller.handle(UiEvent::MapClick(london())).unwrap();
        controller
            .form_mut()
            .type_in(workout_type, distance, "60", extra);
        controller.handle(UiEvent::FormSubmit).unwrap();
    }
    let blob = persisted(&controller).unwrap();

    let reloaded = started_with(MemoryStorage::with_entry(KEY, &blob)).await;

    assert_eq!(reloaded.store(), controller.store());
    let types: Vec<WorkoutType> = reloaded.store().iter().map(|w| w.workout_type()).collect();
    assert_eq!(types, vec![WorkoutType::Running, WorkoutType::Cycling]);
}

#[tokio::test]
async fn test_reset_clears_storage() {
    let mut controller = started_with(MemoryStorage::with_entry(KEY, MIXED_BLOB)).await;
    controller
        .handle(UiEvent::OptionClick(OptionAction::SortBy(
            pinned_workouts::services::SortKey::Date,
        )))
        .unwrap();

    controller.reset().unwrap();

    assert!(controller.store().is_empty());
    assert_eq!(persisted(&controller), None);
    assert!(controller.list().entries.is_empty());
    assert!(controller.map().markers.is_empty());
    assert!(!controller.sort().is_active());
}

#[test]
fn test_file_storage_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut repository = WorkoutRepository::new(FileStorage::new(dir.path()).unwrap(), KEY);

    let mut store = WorkoutStore::new();
    store
        .add(pinned_workouts::models::Workout::running(london(), 5.0, 30.0, 150.0).unwrap())
        .unwrap();
    store
        .add(
            pinned_workouts::models::Workout::cycling(Coords::new(40.0, -3.7), 20.0, 60.0, 0.0)
                .unwrap(),
        )
        .unwrap();
    repository.save(&store).unwrap();

    let reopened = WorkoutRepository::new(FileStorage::new(dir.path()).unwrap(), KEY);
    let (loaded, report) = reopened.load().unwrap();
    assert_eq!(loaded, store);
    assert!(report.is_clean());
}

#[test]
fn test_remove_twice_is_not_found() {
    let mut store = WorkoutStore::new();
    let workout = pinned_workouts::models::Workout::running(london(), 5.0, 30.0, 150.0).unwrap();
    let id = workout.id().clone();
    store.add(workout).unwrap();

    store.remove_by_id(&id).unwrap();
    let err = store.remove_by_id(&id).unwrap_err();

    assert!(matches!(err, AppError::NotFound(missing) if missing == id));
    assert!(store.is_empty());
}

/// Storage whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, key: &str) -> pinned_workouts::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> pinned_workouts::Result<()> {
        Err(AppError::Storage("quota exceeded".to_string()))
    }

    fn remove(&mut self, _key: &str) -> pinned_workouts::Result<()> {
        Err(AppError::Storage("quota exceeded".to_string()))
    }
}

#[tokio::test]
async fn test_failed_write_leaves_store_untouched() {
    let mut controller = Controller::new(
        Config::default(),
        RecordingMap::default(),
        RecordingForm::default(),
        RecordingList::default(),
        WorkoutRepository::new(ReadOnlyStorage::default(), KEY),
    );
    controller
        .start(&ConfiguredLocation::new(Some(london())))
        .await;

    controller.handle(UiEvent::MapClick(london())).unwrap();
    controller
        .form_mut()
        .type_in("running", "5", "30", "150");
    let err = controller.handle(UiEvent::FormSubmit).unwrap_err();

    assert!(matches!(err, AppError::Storage(_)));
    assert!(controller.store().is_empty());
    assert!(controller.list().entries.is_empty());
    assert_eq!(controller.list().alerts.len(), 1);
    assert!(controller.mode().has_open_form());
}
