// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pinned Workouts headless driver
//!
//! Restores the stored workouts, then replays UI commands read from stdin
//! as JSON lines against console surfaces. Example session:
//!
//! ```text
//! {"command": "event", "event": "map_click", "data": [51.5, -0.1]}
//! {"command": "fill", "type": "running", "distance": "5", "duration": "30", "cadence": "150"}
//! {"command": "event", "event": "form_submit"}
//! ```
//!
//! Fill the form after the map click: opening the form resets its fields.

use pinned_workouts::{
    config::Config,
    controller::{Controller, UiEvent},
    db::{FileStorage, WorkoutRepository},
    models::FormFields,
    services::ConfiguredLocation,
    surfaces::console::{ConsoleForm, ConsoleList, ConsoleMap},
};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One line of driver input.
#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum DriverCommand {
    /// Type into the form.
    Fill(FormFields),
    /// Deliver a UI event to the controller.
    Event(UiEvent),
    /// Remove all stored workouts.
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        storage_dir = %config.storage_dir.display(),
        key = %config.storage_key,
        "Starting Pinned Workouts"
    );

    let storage = FileStorage::new(&config.storage_dir).expect("Failed to open storage");
    let repository = WorkoutRepository::new(storage, config.storage_key.clone());
    let location = ConfiguredLocation::new(config.home_position);

    let mut controller = Controller::new(
        config,
        ConsoleMap::default(),
        ConsoleForm::default(),
        ConsoleList,
        repository,
    );

    let report = controller.start(&location).await;
    tracing::info!(
        map_ready = report.map_ready,
        loaded = report.loaded,
        dropped = report.dropped,
        "Startup complete"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command: DriverCommand = match serde_json::from_str(line) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, line, "Ignoring unreadable command");
                continue;
            }
        };

        // Errors are already logged and alerted by the controller.
        let _ = match command {
            DriverCommand::Fill(fields) => {
                controller.form_mut().set_fields(fields);
                Ok(())
            }
            DriverCommand::Event(event) => controller.handle(event),
            DriverCommand::Reset => controller.reset(),
        };
    }

    tracing::info!(
        workouts = controller.store().len(),
        mode = controller.mode().name(),
        "Input closed, exiting"
    );
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pinned_workouts=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
