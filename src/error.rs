// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing reporting.

use crate::models::WorkoutId;
use crate::services::location::LocationError;

/// Bad user (or stored) input. Always names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be a positive number")]
    NotPositive { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must be a whole number")]
    NotInteger { field: &'static str },

    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },

    #[error("workout id must not be empty")]
    MissingId,

    #[error("unknown workout type: {0}")]
    UnknownType(String),

    #[error("choose a field to sort by before choosing an order")]
    SortKeyRequired,
}

impl ValidationError {
    /// Name of the offending field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotANumber { field }
            | ValidationError::NotFinite { field }
            | ValidationError::NotPositive { field }
            | ValidationError::Negative { field }
            | ValidationError::NotInteger { field }
            | ValidationError::OutOfRange { field } => Some(field),
            ValidationError::MissingId => Some("id"),
            ValidationError::UnknownType(_) => Some("type"),
            ValidationError::SortKeyRequired => Some("sort"),
        }
    }
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Workout not found: {0}")]
    NotFound(WorkoutId),

    #[error("Duplicate workout id: {0}")]
    DuplicateId(WorkoutId),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error("Stored workouts are corrupt: {0}")]
    StorageCorrupt(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Log the error at the level its class deserves and return the
    /// message to show the user, if any.
    pub fn report(&self) -> Option<String> {
        match self {
            AppError::Validation(err) => {
                tracing::warn!(error = %err, field = err.field(), "Rejected input");
                Some(validation_message(err))
            }
            AppError::NotFound(id) => {
                tracing::error!(workout_id = %id, "Workout missing from store");
                None
            }
            AppError::DuplicateId(id) => {
                tracing::error!(workout_id = %id, "Workout id already in store");
                None
            }
            AppError::LocationUnavailable(err) => {
                tracing::error!(error = %err, "Could not get current position");
                Some("Could not get your position. Reload to try again.".to_string())
            }
            AppError::StorageCorrupt(msg) => {
                tracing::warn!(error = %msg, "Stored workouts could not be read");
                None
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                Some("Your workouts could not be saved.".to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                None
            }
        }
    }

    /// True for errors caused by user input rather than by the program.
    pub fn is_user_error(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::SortKeyRequired => "Please choose a field to sort by first.".to_string(),
        ValidationError::UnknownType(_) => "Please choose running or cycling.".to_string(),
        _ => format!("Inputs have to be positive numbers ({}).", err),
    }
}

/// Result type alias for controller and store operations
pub type Result<T> = std::result::Result<T, AppError>;
