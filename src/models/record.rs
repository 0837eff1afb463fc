// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage record for a workout.
//!
//! Carries only the stored fields. Any derived values found in a blob
//! (`pace`, `speed`, `description`) are ignored on read and recomputed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::workout::{
    ActivityInput, Coords, Workout, WorkoutId, WorkoutInput, WorkoutKind,
};

/// One element of the persisted workout array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum StoredWorkout {
    Running {
        #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
        id: WorkoutId,
        date: DateTime<Utc>,
        #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    },
    Cycling {
        #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
        id: WorkoutId,
        date: DateTime<Utc>,
        #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
        coords: Coords,
        distance: f64,
        duration: f64,
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
    },
}

impl From<&Workout> for StoredWorkout {
    fn from(workout: &Workout) -> Self {
        let id = workout.id().clone();
        let date = workout.created_at();
        let coords = workout.coords();
        let distance = workout.distance();
        let duration = workout.duration();
        match *workout.kind() {
            WorkoutKind::Running { cadence, .. } => StoredWorkout::Running {
                id,
                date,
                coords,
                distance,
                duration,
                cadence: f64::from(cadence),
            },
            WorkoutKind::Cycling { elevation_gain, .. } => StoredWorkout::Cycling {
                id,
                date,
                coords,
                distance,
                duration,
                elevation_gain,
            },
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = ValidationError;

    fn try_from(record: StoredWorkout) -> Result<Self, Self::Error> {
        let (id, date, coords, distance, duration, activity) = match record {
            StoredWorkout::Running {
                id,
                date,
                coords,
                distance,
                duration,
                cadence,
            } => (
                id,
                date,
                coords,
                distance,
                duration,
                ActivityInput::Running { cadence },
            ),
            StoredWorkout::Cycling {
                id,
                date,
                coords,
                distance,
                duration,
                elevation_gain,
            } => (
                id,
                date,
                coords,
                distance,
                duration,
                ActivityInput::Cycling { elevation_gain },
            ),
        };

        Workout::restore(
            id,
            date,
            coords,
            WorkoutInput {
                distance,
                duration,
                activity,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_record_shape() {
        let workout = Workout::running(Coords::new(51.5, -0.1), 5.0, 30.0, 150.0).unwrap();
        let json = serde_json::to_value(StoredWorkout::from(&workout)).unwrap();

        assert_eq!(json["type"], "running");
        assert_eq!(json["id"], workout.id().as_str());
        assert_eq!(json["coords"], serde_json::json!([51.5, -0.1]));
        assert_eq!(json["cadence"], 150.0);
        assert!(json.get("pace").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_cycling_record_uses_camel_case_elevation() {
        let workout = Workout::cycling(Coords::new(40.0, 8.0), 20.0, 60.0, 100.0).unwrap();
        let json = serde_json::to_value(StoredWorkout::from(&workout)).unwrap();
        assert_eq!(json["type"], "cycling");
        assert_eq!(json["elevationGain"], 100.0);
    }

    #[test]
    fn test_stale_derived_fields_are_recomputed() {
        let json = r#"{
            "type": "running",
            "id": "1713088200",
            "date": "2024-04-14T09:30:00Z",
            "coords": [51.5, -0.1],
            "distance": 5,
            "duration": 30,
            "cadence": 150,
            "pace": 999,
            "description": "Swimming on January 1"
        }"#;
        let record: StoredWorkout = serde_json::from_str(json).unwrap();
        let workout = Workout::try_from(record).unwrap();

        assert_eq!(workout.pace(), Some(6.0));
        assert_eq!(workout.description(), "Running on April 14");
    }

    #[test]
    fn test_invalid_record_fails_validation() {
        let record = StoredWorkout::Cycling {
            id: WorkoutId::from("x"),
            date: Utc::now(),
            coords: Coords::new(0.0, 0.0),
            distance: 0.0,
            duration: 10.0,
            elevation_gain: 0.0,
        };
        assert_eq!(
            Workout::try_from(record).unwrap_err(),
            ValidationError::NotPositive { field: "distance" }
        );
    }
}
