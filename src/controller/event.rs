// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Events adapters deliver to the controller.

use serde::{Deserialize, Serialize};

use crate::models::{Coords, WorkoutId, WorkoutType};
use crate::services::{SortKey, SortOrder};

/// A discrete UI event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum UiEvent {
    /// The map was clicked at these coordinates.
    MapClick(Coords),
    FormSubmit,
    /// The form's type selector changed.
    TypeChange(WorkoutType),
    /// A list entry was clicked.
    ItemClick(WorkoutId),
    OptionClick(OptionAction),
    ModalButton(ModalButton),
}

/// Buttons in the options bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum OptionAction {
    Edit,
    Delete,
    DeleteAll,
    Cancel,
    SortBy(SortKey),
    SortOrder(SortOrder),
    ClearSort,
}

/// Buttons in the delete confirmation modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalButton {
    Confirm,
    Decline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event: UiEvent =
            serde_json::from_str(r#"{"event": "map_click", "data": [51.5, -0.1]}"#).unwrap();
        assert_eq!(event, UiEvent::MapClick(Coords::new(51.5, -0.1)));

        let event: UiEvent = serde_json::from_str(
            r#"{"event": "option_click", "data": {"action": "sort_by", "value": "distance"}}"#,
        )
        .unwrap();
        assert_eq!(event, UiEvent::OptionClick(OptionAction::SortBy(SortKey::Distance)));

        let event: UiEvent = serde_json::from_str(r#"{"event": "form_submit"}"#).unwrap();
        assert_eq!(event, UiEvent::FormSubmit);
    }
}
