// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pinned Workouts: running and cycling activities dropped as pins on a map
//!
//! This crate provides the workout model, its persistence, and the
//! interaction controller that turns map, form and list events into store
//! mutations. Rendering is left to the surfaces in [`surfaces`].

pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod surfaces;
pub mod time_utils;

pub use controller::{Controller, Mode, StartupReport, UiEvent};
pub use error::{AppError, Result, ValidationError};
