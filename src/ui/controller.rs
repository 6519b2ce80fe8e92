//! Workout view controller.
//!
//! Owns the store, the persistence adapter, the map and the form/list view
//! state, and turns UI events into store mutations. Every mutation ends with
//! a full snapshot write.
//!
//! Construction only wires dependencies; [`WorkoutController::start`] loads
//! saved workouts and asks for the current position.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::location::{GeolocationError, Geolocator};
use crate::storage::config::AppConfig;
use crate::storage::kv::{KeyValueStore, StorageError};
use crate::storage::persistence::WorkoutPersistence;
use crate::workouts::{
    Coords, ElevationPolicy, StoreError, ValidationError, Workout, WorkoutId, WorkoutKind,
    WorkoutStore,
};

use super::form::{EntryForm, FormMode};
use super::list::{ListView, WorkoutListItem};
use super::map::{MapView, MarkerPopup, PanOptions};

/// Errors surfaced to the user.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{0}")]
    Geolocation(#[from] GeolocationError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Click on the map to choose where the workout happened")]
    NoLocation,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Could not save workouts: {0}")]
    Storage(#[from] StorageError),
}

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(WorkoutId),
    Updated(WorkoutId),
}

/// Controller settings.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Zoom used for centering and jumping to workouts
    pub zoom: u8,
    /// Pan animation length when jumping to a workout
    pub pan_duration_secs: f32,
    /// Display delay after the form closes
    pub form_hide_delay: Duration,
    /// Rule for cycling elevation gain
    pub elevation_policy: ElevationPolicy,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ControllerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            zoom: config.map.default_zoom,
            pan_duration_secs: config.map.pan_duration_secs,
            form_hide_delay: Duration::from_millis(config.form.hide_delay_ms),
            elevation_policy: config.form.elevation_policy,
        }
    }
}

/// Wires UI events to the workout store, map and persistence.
pub struct WorkoutController<M: MapView, K: KeyValueStore> {
    map: M,
    map_ready: bool,
    store: WorkoutStore<M::Marker>,
    persistence: WorkoutPersistence<K>,
    form: EntryForm,
    list: ListView,
    settings: ControllerSettings,
}

impl<M: MapView, K: KeyValueStore> WorkoutController<M, K> {
    /// Create a controller. Nothing is loaded until [`start`](Self::start).
    pub fn new(map: M, persistence: WorkoutPersistence<K>, settings: ControllerSettings) -> Self {
        Self {
            map,
            map_ready: false,
            store: WorkoutStore::new(),
            persistence,
            form: EntryForm::new(),
            list: ListView::new(),
            settings,
        }
    }

    /// Load saved workouts and center the map on the current position.
    ///
    /// The list is filled even when the position is unavailable; in that
    /// case the map stays unusable and the geolocation error is returned.
    pub fn start<G: Geolocator + ?Sized>(&mut self, geolocator: &G) -> Result<(), TrackerError> {
        self.store = WorkoutStore::from_loaded(self.persistence.load());
        self.list = ListView::from_workouts(self.store.workouts());
        tracing::info!("Loaded {} saved workouts", self.store.len());

        let center = geolocator.current_position().map_err(|e| {
            tracing::warn!("Geolocation failed: {}", e);
            e
        })?;

        self.map.set_view(center, self.settings.zoom, PanOptions::instant());
        self.map_ready = true;
        self.render_stored_markers()?;

        tracing::info!("Map centered at {}", center);
        Ok(())
    }

    fn render_stored_markers(&mut self) -> Result<(), TrackerError> {
        let unplaced: Vec<(WorkoutId, Coords, MarkerPopup)> = self
            .store
            .entries()
            .iter()
            .filter(|entry| entry.marker.is_none())
            .map(|entry| {
                (
                    entry.workout.id.clone(),
                    entry.workout.coords,
                    MarkerPopup::for_workout(&entry.workout),
                )
            })
            .collect();

        for (id, coords, popup) in unplaced {
            let marker = self.map.place_marker(coords, &popup);
            self.store.attach_marker(&id, marker)?;
        }
        Ok(())
    }

    /// A click on the map: remember the spot and open the form.
    pub fn handle_map_click(&mut self, coords: Coords) {
        if !self.map_ready {
            tracing::debug!("Ignoring map click before the map is ready");
            return;
        }
        tracing::debug!("Map clicked at {}", coords);
        self.list.close_menus();
        self.form.show_for_location(coords);
    }

    /// Switch the form between running and cycling fields.
    pub fn toggle_kind(&mut self, kind: WorkoutKind) -> bool {
        self.form.set_kind(kind)
    }

    /// Submit the form in its current mode.
    ///
    /// On a validation error the form stays open and nothing changes.
    pub fn submit(&mut self, now: Instant) -> Result<SubmitOutcome, TrackerError> {
        match self.form.mode().clone() {
            FormMode::Create => self.create_workout(now),
            FormMode::Edit { id } => self.update_workout(&id, now),
        }
    }

    fn create_workout(&mut self, now: Instant) -> Result<SubmitOutcome, TrackerError> {
        let coords = self.form.pending_coords().ok_or(TrackerError::NoLocation)?;
        let fields = self.form.raw.parse(self.settings.elevation_policy)?;

        let workout = Workout::new(coords, fields);
        let id = workout.id.clone();
        let item = WorkoutListItem::from_workout(&workout);

        let marker = if self.map_ready {
            Some(self.map.place_marker(coords, &MarkerPopup::for_workout(&workout)))
        } else {
            None
        };

        tracing::info!("Created {} ({})", workout.description, id);
        self.store.add(workout, marker)?;
        self.list.insert(item);
        self.form.hide(now, self.settings.form_hide_delay);

        self.persist()?;
        Ok(SubmitOutcome::Created(id))
    }

    fn update_workout(&mut self, id: &WorkoutId, now: Instant) -> Result<SubmitOutcome, TrackerError> {
        let fields = self.form.raw.parse(self.settings.elevation_policy)?;

        let updated = self.store.replace(id, &fields)?;
        self.list.refresh(updated);
        tracing::info!("Updated workout {}", id);

        self.form.hide(now, self.settings.form_hide_delay);
        self.form.finish_edit();

        self.persist()?;
        Ok(SubmitOutcome::Updated(id.clone()))
    }

    /// Open the form prefilled with a workout for editing.
    pub fn begin_edit(&mut self, id: &WorkoutId) -> Result<(), TrackerError> {
        let entry = self
            .store
            .find_by_id(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        self.form.begin_edit(&entry.workout);
        self.list.close_menus();
        tracing::debug!("Editing workout {}", id);
        Ok(())
    }

    /// Close the form without saving, leaving edit mode.
    pub fn cancel_form(&mut self, now: Instant) {
        if self.form.is_visible() {
            self.form.hide(now, self.settings.form_hide_delay);
        }
        self.form.finish_edit();
    }

    /// Delete a workout and its marker. Returns false for unknown ids.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<bool, TrackerError> {
        self.list.remove(id);

        let removed = match self.store.remove_by_id(id) {
            Some(entry) => {
                if let Some(marker) = entry.marker {
                    self.map.remove_marker(marker);
                }
                if self.form.mode() == &(FormMode::Edit { id: id.clone() }) {
                    self.form.finish_edit();
                }
                tracing::info!("Deleted workout {}", id);
                true
            }
            None => false,
        };

        self.persist()?;
        Ok(removed)
    }

    /// Pan the map to a workout. Returns false if nothing moved.
    pub fn move_to(&mut self, id: &WorkoutId) -> bool {
        if !self.map_ready {
            return false;
        }
        let Some(entry) = self.store.find_by_id(id) else {
            return false;
        };

        let coords = entry.workout.coords;
        self.map.set_view(
            coords,
            self.settings.zoom,
            PanOptions::animated(self.settings.pan_duration_secs),
        );
        true
    }

    /// Open a workout's options menu, closing any other.
    pub fn open_menu(&mut self, id: &WorkoutId) -> bool {
        self.list.open_menu(id)
    }

    /// Close every options menu (a click anywhere else).
    pub fn close_menus(&mut self) -> bool {
        self.list.close_menus()
    }

    /// Delete every workout and the saved snapshot.
    pub fn reset_all(&mut self) -> Result<(), TrackerError> {
        for entry in self.store.clear() {
            if let Some(marker) = entry.marker {
                self.map.remove_marker(marker);
            }
        }
        self.list.clear();
        self.form.finish_edit();
        self.persistence.reset()?;
        tracing::info!("All workouts removed");
        Ok(())
    }

    /// Run deferred form actions that are due.
    pub fn tick(&mut self, now: Instant) {
        self.form.tick(now);
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.persistence.save(self.store.workouts()).map_err(|e| {
            tracing::error!("Failed to save workouts: {}", e);
            e
        })
    }

    /// Whether the map has been centered and accepts clicks.
    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    /// The map.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Mutable access to the map, for drawing and animation.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// The workout store.
    pub fn store(&self) -> &WorkoutStore<M::Marker> {
        &self.store
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &WorkoutPersistence<K> {
        &self.persistence
    }

    /// The entry form.
    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// Mutable access to the form fields.
    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    /// The workout list.
    pub fn list(&self) -> &ListView {
        &self.list
    }
}
