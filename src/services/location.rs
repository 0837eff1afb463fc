// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Starting-position lookup.

use async_trait::async_trait;

use crate::models::Coords;

/// Resolves the user's current position once at startup.
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn current_position(&self) -> Result<Coords, LocationError>;
}

/// Errors from position lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Permission to read the position was denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Reports a fixed, configured position.
///
/// With no position configured it behaves like a denied permission.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    position: Option<Coords>,
}

impl ConfiguredLocation {
    pub fn new(position: Option<Coords>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationService for ConfiguredLocation {
    async fn current_position(&self) -> Result<Coords, LocationError> {
        let position = self.position.ok_or(LocationError::PermissionDenied)?;
        position
            .validate()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;
        Ok(position)
    }
}
