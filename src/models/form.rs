// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw form values and their conversion into workout input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::workout::{ActivityInput, Workout, WorkoutInput, WorkoutType};

/// Field values exactly as the form widgets hold them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

impl FormFields {
    /// Fields as they would appear after prefilling from a workout.
    pub fn from_workout(workout: &Workout) -> Self {
        let mut fields = Self {
            workout_type: workout.workout_type().as_str().to_string(),
            distance: workout.distance().to_string(),
            duration: workout.duration().to_string(),
            ..Self::default()
        };
        match workout.workout_type() {
            WorkoutType::Running => {
                fields.cadence = workout.cadence().unwrap_or_default().to_string();
            }
            WorkoutType::Cycling => {
                fields.elevation = workout.elevation_gain().unwrap_or_default().to_string();
            }
        }
        fields
    }

    /// Parse the raw strings into numbers.
    ///
    /// Only the field belonging to the selected type is read. Range checks
    /// happen when the workout is built.
    pub fn parse(&self) -> Result<WorkoutInput, ValidationError> {
        let workout_type: WorkoutType = self.workout_type.parse()?;
        let distance = parse_number("distance", &self.distance)?;
        let duration = parse_number("duration", &self.duration)?;

        let activity = match workout_type {
            WorkoutType::Running => ActivityInput::Running {
                cadence: parse_number("cadence", &self.cadence)?,
            },
            WorkoutType::Cycling => ActivityInput::Cycling {
                elevation_gain: parse_number("elevation gain", &self.elevation)?,
            },
        };

        Ok(WorkoutInput {
            distance,
            duration,
            activity,
        })
    }
}

/// Blank input reads as zero, matching how number inputs coerce.
fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| ValidationError::NotANumber { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(workout_type: &str, distance: &str, duration: &str) -> FormFields {
        FormFields {
            workout_type: workout_type.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            ..FormFields::default()
        }
    }

    #[test]
    fn test_parse_running() {
        let mut raw = fields("running", "5", "30");
        raw.cadence = "150".to_string();
        let input = raw.parse().unwrap();
        assert_eq!(input.distance, 5.0);
        assert_eq!(input.duration, 30.0);
        assert_eq!(input.activity, ActivityInput::Running { cadence: 150.0 });
    }

    #[test]
    fn test_parse_cycling_ignores_cadence_field() {
        let mut raw = fields("cycling", "20", "60");
        raw.cadence = "garbage".to_string();
        raw.elevation = "100".to_string();
        let input = raw.parse().unwrap();
        assert_eq!(
            input.activity,
            ActivityInput::Cycling {
                elevation_gain: 100.0
            }
        );
    }

    #[test]
    fn test_blank_elevation_reads_as_zero() {
        let raw = fields("cycling", "20", "60");
        let input = raw.parse().unwrap();
        assert_eq!(
            input.activity,
            ActivityInput::Cycling {
                elevation_gain: 0.0
            }
        );
    }

    #[test]
    fn test_non_numeric_field_is_named() {
        let raw = fields("running", "five", "30");
        assert_eq!(
            raw.parse().unwrap_err(),
            ValidationError::NotANumber { field: "distance" }
        );
    }

    #[test]
    fn test_unknown_type() {
        let raw = fields("rowing", "5", "30");
        assert_eq!(
            raw.parse().unwrap_err(),
            ValidationError::UnknownType("rowing".to_string())
        );
    }

    #[test]
    fn test_from_workout_prefills_variant_field() {
        let workout =
            Workout::cycling(crate::models::Coords::new(10.0, 10.0), 20.0, 60.0, 250.0).unwrap();
        let raw = FormFields::from_workout(&workout);
        assert_eq!(raw.workout_type, "cycling");
        assert_eq!(raw.distance, "20");
        assert_eq!(raw.elevation, "250");
        assert!(raw.cadence.is_empty());
        assert_eq!(raw.parse().unwrap(), workout.input());
    }
}
