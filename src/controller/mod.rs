// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interaction controller.
//!
//! Owns the current [`Mode`], the selection, the sort overlay and the
//! workout store, and projects all of it onto the map, form and list
//! surfaces. Every handler runs to completion before the next event is
//! taken, but handlers still re-check the mode because two UI events can
//! arrive back to back before a render finishes.
//!
//! Store mutations go through `commit`: the change is applied
//! to a copy, the copy is written to storage, and only then does it become
//! the live store. A failed write leaves both sides untouched.

pub mod event;
pub mod mode;

pub use event::{ModalButton, OptionAction, UiEvent};
pub use mode::{DeleteTarget, Mode};

use std::collections::HashMap;

use crate::config::Config;
use crate::db::{KeyValueStorage, WorkoutRepository};
use crate::error::{AppError, Result};
use crate::models::{Coords, Workout, WorkoutId, WorkoutType};
use crate::services::{LocationService, SortKey, SortOrder, SortState, WorkoutStore};
use crate::surfaces::{FormSurface, ListSurface, MapSurface, MarkerHandle, ViewOptions};

/// Outcome of [`Controller::start`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupReport {
    /// Whether the map got an initial view (position lookup succeeded).
    pub map_ready: bool,
    /// Workouts restored from storage.
    pub loaded: usize,
    /// Stored records that were skipped.
    pub dropped: usize,
}

/// The interaction state machine.
pub struct Controller<M, F, L, S> {
    config: Config,
    map: M,
    form: F,
    list: L,
    repository: WorkoutRepository<S>,
    store: WorkoutStore,
    mode: Mode,
    /// Lookup-only reference into the store.
    selected: Option<WorkoutId>,
    sort: SortState,
    markers: HashMap<WorkoutId, MarkerHandle>,
    map_ready: bool,
}

impl<M, F, L, S> Controller<M, F, L, S>
where
    M: MapSurface,
    F: FormSurface,
    L: ListSurface,
    S: KeyValueStorage,
{
    pub fn new(
        config: Config,
        map: M,
        form: F,
        list: L,
        repository: WorkoutRepository<S>,
    ) -> Self {
        Self {
            config,
            map,
            form,
            list,
            repository,
            store: WorkoutStore::new(),
            mode: Mode::Idle,
            selected: None,
            sort: SortState::default(),
            markers: HashMap::new(),
            map_ready: false,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected(&self) -> Option<&WorkoutId> {
        self.selected.as_ref()
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    /// Workouts in the order the list shows them.
    pub fn visible_workouts(&self) -> Vec<&Workout> {
        self.store.view(&self.sort)
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn repository(&self) -> &WorkoutRepository<S> {
        &self.repository
    }

    // ─── Startup ─────────────────────────────────────────────────

    /// Acquire the starting position, then load and render stored workouts.
    ///
    /// A failed position lookup leaves the map uninitialized: stored
    /// workouts are still listed, but no workout can be created.
    pub async fn start<P>(&mut self, location: &P) -> StartupReport
    where
        P: LocationService + ?Sized,
    {
        match location.current_position().await {
            Ok(position) => {
                self.map
                    .set_view(position, self.config.map_zoom, ViewOptions::instant());
                self.map_ready = true;
                tracing::info!(lat = position.lat, lng = position.lng, "Map initialized");
            }
            Err(e) => {
                self.report(&AppError::LocationUnavailable(e));
            }
        }

        let (store, dropped) = match self.repository.load() {
            Ok((store, report)) => (store, report.dropped_count()),
            Err(e) => {
                self.report(&e);
                (WorkoutStore::new(), 0)
            }
        };
        self.store = store;
        self.reload_view();

        StartupReport {
            map_ready: self.map_ready,
            loaded: self.store.len(),
            dropped,
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────

    /// Handle one UI event.
    ///
    /// Errors are logged and, when meant for the user, shown as an alert
    /// before being returned.
    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        tracing::debug!(mode = self.mode.name(), event = ?event, "Handling event");

        let result = match event {
            UiEvent::MapClick(coords) => self.on_map_click(coords),
            UiEvent::FormSubmit => self.on_submit(),
            UiEvent::TypeChange(workout_type) => self.on_type_change(workout_type),
            UiEvent::ItemClick(id) => self.on_item_click(id),
            UiEvent::OptionClick(action) => self.on_option(action),
            UiEvent::ModalButton(ModalButton::Confirm) => self.on_confirm_delete(),
            UiEvent::ModalButton(ModalButton::Decline) => self.on_decline_delete(),
        };

        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    /// Remove every stored workout and clear the view.
    pub fn reset(&mut self) -> Result<()> {
        self.abandon_mode();
        self.repository.clear()?;
        self.store.clear();
        self.sort.clear();
        self.reload_view();
        tracing::info!("Tracker reset");
        Ok(())
    }

    fn on_option(&mut self, action: OptionAction) -> Result<()> {
        match action {
            OptionAction::Edit => self.on_edit(),
            OptionAction::Delete => self.on_delete(),
            OptionAction::DeleteAll => self.on_delete_all(),
            OptionAction::Cancel => self.on_cancel(),
            OptionAction::SortBy(key) => self.on_sort_key(key),
            OptionAction::SortOrder(order) => self.on_sort_order(order),
            OptionAction::ClearSort => {
                self.sort.clear();
                self.render_list();
                Ok(())
            }
        }
    }

    // ─── Creating ────────────────────────────────────────────────

    fn on_map_click(&mut self, coords: Coords) -> Result<()> {
        if !self.map_ready {
            tracing::debug!("Map click ignored: map not initialized");
            return Ok(());
        }

        match self.mode.clone() {
            Mode::Editing { .. } | Mode::ConfirmingDelete { .. } => {
                tracing::debug!(mode = self.mode.name(), "Map click ignored");
                Ok(())
            }
            Mode::Creating { marker, .. } => {
                // Move the pin, keep whatever was typed.
                self.map.remove_marker(marker);
                let marker = self.map.add_marker(coords);
                self.mode = Mode::Creating { coords, marker };
                Ok(())
            }
            Mode::Idle => {
                self.deselect();
                let marker = self.map.add_marker(coords);
                self.form.reset();
                self.form.show();
                self.mode = Mode::Creating { coords, marker };
                tracing::debug!(lat = coords.lat, lng = coords.lng, "Creating workout");
                Ok(())
            }
        }
    }

    fn submit_create(&mut self, coords: Coords, marker: MarkerHandle) -> Result<()> {
        let input = self.form.read_fields().parse()?;
        let workout = Workout::new(coords, input)?;
        let id = workout.id().clone();

        let added = workout.clone();
        self.commit(move |store| store.add(added))?;

        self.map.bind_popup(marker, &workout);
        self.markers.insert(id.clone(), marker);
        self.close_form();
        self.mode = Mode::Idle;
        self.render_list();

        tracing::info!(
            workout_id = %id,
            workout_type = %workout.workout_type(),
            distance = workout.distance(),
            duration = workout.duration(),
            "Workout created"
        );
        Ok(())
    }

    fn cancel_create(&mut self, marker: MarkerHandle) {
        self.map.remove_marker(marker);
        self.close_form();
        self.mode = Mode::Idle;
    }

    // ─── Selection ───────────────────────────────────────────────

    fn on_item_click(&mut self, id: WorkoutId) -> Result<()> {
        let coords = self
            .store
            .get(&id)
            .map(Workout::coords)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;

        // Only one editor may be open: close whatever form is showing first.
        self.abandon_mode();

        self.select(id);
        if self.map_ready {
            self.map.set_view(
                coords,
                self.config.selected_zoom,
                ViewOptions::animated(self.config.pan_duration),
            );
        }
        self.list.show_options();
        Ok(())
    }

    /// Clear the old selection before marking the new one.
    fn select(&mut self, id: WorkoutId) {
        if self.selected.take().is_some() {
            self.list.clear_selected();
        }
        self.list.mark_selected(&id);
        self.selected = Some(id);
    }

    fn deselect(&mut self) {
        if self.selected.take().is_some() {
            self.list.clear_selected();
        }
        self.list.hide_options();
    }

    // ─── Editing ─────────────────────────────────────────────────

    fn on_edit(&mut self) -> Result<()> {
        if !self.mode.is_idle() {
            tracing::debug!(mode = self.mode.name(), "Edit ignored: busy");
            return Ok(());
        }
        let Some(id) = self.selected.clone() else {
            tracing::debug!("Edit ignored: nothing selected");
            return Ok(());
        };
        let workout = self
            .store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;

        self.form.prefill(workout);
        self.form.show_fields_for(workout.workout_type());
        self.form.show();
        self.list.set_hidden(&id, true);
        self.map.set_interaction_enabled(false);
        tracing::debug!(workout_id = %id, "Editing workout");
        self.mode = Mode::Editing { workout_id: id };
        Ok(())
    }

    fn submit_edit(&mut self, id: WorkoutId) -> Result<()> {
        let original = self
            .store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        let input = self.form.read_fields().parse()?;
        let updated = Workout::restore(
            original.id().clone(),
            original.created_at(),
            original.coords(),
            input,
        )?;

        let replacement = updated.clone();
        let target = id.clone();
        self.commit(move |store| store.replace(&target, replacement).map(|_| ()))?;

        self.close_editor(&id);
        self.leave_to_idle();
        self.reload_view();

        tracing::info!(
            workout_id = %id,
            workout_type = %updated.workout_type(),
            "Workout edited"
        );
        Ok(())
    }

    /// Undo the editing affordances without touching the selection.
    fn close_editor(&mut self, id: &WorkoutId) {
        self.list.set_hidden(id, false);
        self.map.set_interaction_enabled(true);
        self.close_form();
    }

    // ─── Deleting ────────────────────────────────────────────────

    fn on_delete(&mut self) -> Result<()> {
        let Some(id) = self.selected.clone() else {
            tracing::debug!("Delete ignored: nothing selected");
            return Ok(());
        };
        match self.mode.clone() {
            Mode::Idle => {}
            Mode::Editing { workout_id } => {
                self.close_editor(&workout_id);
                self.mode = Mode::Idle;
            }
            Mode::Creating { .. } | Mode::ConfirmingDelete { .. } => {
                tracing::debug!(mode = self.mode.name(), "Delete ignored: busy");
                return Ok(());
            }
        }

        let workout = self
            .store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        self.list.show_confirm_modal(&[workout]);
        self.mode = Mode::ConfirmingDelete {
            target: DeleteTarget::Single(id),
        };
        Ok(())
    }

    fn on_delete_all(&mut self) -> Result<()> {
        if matches!(self.mode, Mode::ConfirmingDelete { .. }) {
            tracing::debug!("Delete all ignored: confirmation already open");
            return Ok(());
        }
        if self.store.is_empty() {
            self.list.alert("There are no workouts to delete.");
            return Ok(());
        }

        match self.mode.clone() {
            Mode::Creating { marker, .. } => self.cancel_create(marker),
            Mode::Editing { workout_id } => {
                self.close_editor(&workout_id);
                self.mode = Mode::Idle;
            }
            Mode::Idle | Mode::ConfirmingDelete { .. } => {}
        }

        let items = self.store.view(&self.sort);
        self.list.show_confirm_modal(&items);
        self.mode = Mode::ConfirmingDelete {
            target: DeleteTarget::All,
        };
        Ok(())
    }

    fn on_confirm_delete(&mut self) -> Result<()> {
        let Mode::ConfirmingDelete { target } = self.mode.clone() else {
            tracing::debug!(mode = self.mode.name(), "Confirm ignored: nothing staged");
            return Ok(());
        };

        let result = match &target {
            DeleteTarget::Single(id) => {
                let id = id.clone();
                self.commit(move |store| store.remove_by_id(&id).map(|_| ()))
            }
            // One step rather than per-item removal; same end state.
            DeleteTarget::All => self.commit(|store| {
                store.clear();
                Ok(())
            }),
        };

        self.list.hide_confirm_modal();
        self.leave_to_idle();
        result?;

        match target {
            DeleteTarget::Single(id) => {
                self.list.remove(&id);
                if let Some(marker) = self.markers.remove(&id) {
                    self.map.remove_marker(marker);
                }
                tracing::info!(workout_id = %id, "Workout deleted");
            }
            DeleteTarget::All => {
                tracing::info!("All workouts deleted");
            }
        }

        self.reload_view();
        Ok(())
    }

    fn on_decline_delete(&mut self) -> Result<()> {
        if !matches!(self.mode, Mode::ConfirmingDelete { .. }) {
            tracing::debug!(mode = self.mode.name(), "Decline ignored: nothing staged");
            return Ok(());
        }
        self.list.hide_confirm_modal();
        self.leave_to_idle();
        Ok(())
    }

    // ─── Form ────────────────────────────────────────────────────

    fn on_submit(&mut self) -> Result<()> {
        match self.mode.clone() {
            Mode::Creating { coords, marker } => self.submit_create(coords, marker),
            Mode::Editing { workout_id } => self.submit_edit(workout_id),
            Mode::Idle | Mode::ConfirmingDelete { .. } => {
                tracing::debug!(mode = self.mode.name(), "Submit ignored: no form open");
                Ok(())
            }
        }
    }

    fn on_type_change(&mut self, workout_type: WorkoutType) -> Result<()> {
        if self.mode.has_open_form() {
            self.form.show_fields_for(workout_type);
        }
        Ok(())
    }

    fn on_cancel(&mut self) -> Result<()> {
        match self.mode.clone() {
            Mode::Creating { marker, .. } => self.cancel_create(marker),
            Mode::Editing { workout_id } => {
                self.close_editor(&workout_id);
                self.leave_to_idle();
            }
            Mode::ConfirmingDelete { .. } => {
                self.list.hide_confirm_modal();
                self.leave_to_idle();
            }
            Mode::Idle => self.deselect(),
        }
        Ok(())
    }

    fn close_form(&mut self) {
        self.form.hide(self.config.form_settle_delay);
        self.form.reset();
    }

    // ─── Sorting ─────────────────────────────────────────────────

    fn on_sort_key(&mut self, key: SortKey) -> Result<()> {
        self.sort.set_key(key);
        self.render_list();
        Ok(())
    }

    fn on_sort_order(&mut self, order: SortOrder) -> Result<()> {
        self.sort.set_order(order)?;
        self.render_list();
        Ok(())
    }

    // ─── Shared helpers ──────────────────────────────────────────

    /// Apply a mutation to a copy, persist it, then make it live.
    fn commit<T>(&mut self, mutate: T) -> Result<()>
    where
        T: FnOnce(&mut WorkoutStore) -> Result<()>,
    {
        let mut next = self.store.clone();
        mutate(&mut next)?;
        self.repository.save(&next)?;
        self.store = next;
        Ok(())
    }

    /// Close whatever the current mode has open, without committing.
    fn abandon_mode(&mut self) {
        match self.mode.clone() {
            Mode::Idle => {}
            Mode::Creating { marker, .. } => self.cancel_create(marker),
            Mode::Editing { workout_id } => {
                self.close_editor(&workout_id);
                self.leave_to_idle();
            }
            Mode::ConfirmingDelete { .. } => {
                self.list.hide_confirm_modal();
                self.leave_to_idle();
            }
        }
    }

    /// Return to idle and drop the selection along with it.
    fn leave_to_idle(&mut self) {
        self.mode = Mode::Idle;
        self.deselect();
    }

    /// Rebuild markers and the list from the store.
    fn reload_view(&mut self) {
        for (_, marker) in self.markers.drain() {
            self.map.remove_marker(marker);
        }
        if self.map_ready {
            for workout in self.store.iter() {
                let marker = self.map.add_marker(workout.coords());
                self.map.bind_popup(marker, workout);
                self.markers.insert(workout.id().clone(), marker);
            }
        }
        self.render_list();
    }

    /// Re-render the list through the current sort, restoring selection
    /// and the hidden entry under edit.
    fn render_list(&mut self) {
        self.list.clear();
        for workout in self.store.view(&self.sort) {
            self.list.render(workout);
        }
        if let Some(id) = &self.selected {
            self.list.mark_selected(id);
        }
        if let Mode::Editing { workout_id } = &self.mode {
            self.list.set_hidden(workout_id, true);
        }
    }

    fn report(&mut self, err: &AppError) {
        if let Some(message) = err.report() {
            self.list.alert(&message);
        }
    }
}
