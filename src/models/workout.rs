// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout domain model.
//!
//! A workout is immutable once built. Derived values (pace, speed and the
//! description) are computed in the constructor and never read back from
//! storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::time_utils::format_month_day;

/// Geographic position of a workout, stored as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and inside the valid ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.lat.is_finite() {
            return Err(ValidationError::NotFinite { field: "latitude" });
        }
        if !self.lng.is_finite() {
            return Err(ValidationError::NotFinite { field: "longitude" });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ValidationError::OutOfRange { field: "latitude" });
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(ValidationError::OutOfRange { field: "longitude" });
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

/// Stable workout identifier, unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Capitalized label used in descriptions and popups.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }
}

impl FromStr for WorkoutType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific input values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityInput {
    /// Steps per minute
    Running { cadence: f64 },
    /// Meters climbed
    Cycling { elevation_gain: f64 },
}

/// Numbers entered for a workout, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    /// Distance in km
    pub distance: f64,
    /// Duration in minutes
    pub duration: f64,
    pub activity: ActivityInput,
}

impl WorkoutInput {
    pub fn workout_type(&self) -> WorkoutType {
        match self.activity {
            ActivityInput::Running { .. } => WorkoutType::Running,
            ActivityInput::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Variant payload with its derived metric.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutKind {
    Running {
        cadence: u32,
        /// min/km
        pace: f64,
    },
    Cycling {
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

/// The variant's headline metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Pace(f64),
    Speed(f64),
}

/// A recorded running or cycling activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    kind: WorkoutKind,
    description: String,
}

impl Workout {
    /// Build a new workout with a fresh id, timestamped now.
    pub fn new(coords: Coords, input: WorkoutInput) -> Result<Self, ValidationError> {
        Self::restore(WorkoutId::generate(), Utc::now(), coords, input)
    }

    /// Build a workout with a known identity (storage reload or edit).
    pub fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        input: WorkoutInput,
    ) -> Result<Self, ValidationError> {
        if id.as_str().trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        coords.validate()?;
        let distance = require_positive("distance", input.distance)?;
        let duration = require_positive("duration", input.duration)?;

        let kind = match input.activity {
            ActivityInput::Running { cadence } => {
                let cadence = require_positive("cadence", cadence)?;
                if cadence.fract() != 0.0 || cadence > u32::MAX as f64 {
                    return Err(ValidationError::NotInteger { field: "cadence" });
                }
                WorkoutKind::Running {
                    cadence: cadence as u32,
                    pace: duration / distance,
                }
            }
            ActivityInput::Cycling { elevation_gain } => {
                if !elevation_gain.is_finite() {
                    return Err(ValidationError::NotFinite {
                        field: "elevation gain",
                    });
                }
                if elevation_gain < 0.0 {
                    return Err(ValidationError::Negative {
                        field: "elevation gain",
                    });
                }
                WorkoutKind::Cycling {
                    elevation_gain,
                    speed: distance / (duration / 60.0),
                }
            }
        };

        let description = describe(input.workout_type(), created_at);

        Ok(Self {
            id,
            created_at,
            coords,
            distance,
            duration,
            kind,
            description,
        })
    }

    pub fn running(
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            coords,
            WorkoutInput {
                distance,
                duration,
                activity: ActivityInput::Running { cadence },
            },
        )
    }

    pub fn cycling(
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            coords,
            WorkoutInput {
                distance,
                duration,
                activity: ActivityInput::Cycling { elevation_gain },
            },
        )
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// e.g. "Running on April 14"
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metric(&self) -> Metric {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Metric::Pace(pace),
            WorkoutKind::Cycling { speed, .. } => Metric::Speed(speed),
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<u32> {
        match self.kind {
            WorkoutKind::Running { cadence, .. } => Some(cadence),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// The stored inputs this workout was built from.
    pub fn input(&self) -> WorkoutInput {
        let activity = match self.kind {
            WorkoutKind::Running { cadence, .. } => ActivityInput::Running {
                cadence: f64::from(cadence),
            },
            WorkoutKind::Cycling { elevation_gain, .. } => {
                ActivityInput::Cycling { elevation_gain }
            }
        };
        WorkoutInput {
            distance: self.distance,
            duration: self.duration,
            activity,
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(value)
}

fn describe(workout_type: WorkoutType, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", workout_type.label(), format_month_day(created_at))
}
