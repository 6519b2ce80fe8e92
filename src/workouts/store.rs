//! In-memory workout store.
//!
//! Entries keep insertion order and each one owns its marker handle, so a
//! workout and its pin are always added and removed together.

use std::collections::HashSet;

use thiserror::Error;

use super::types::{ModelError, Workout, WorkoutFields, WorkoutId};

/// A workout together with its map marker, if one has been placed.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry<H> {
    /// The workout record
    pub workout: Workout,
    /// Marker handle; `None` until the workout is drawn on the map
    pub marker: Option<H>,
}

/// Store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Workout {0} already exists")]
    DuplicateId(WorkoutId),

    #[error("Workout {0} not found")]
    NotFound(WorkoutId),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Ordered collection of workout entries keyed by id.
#[derive(Debug, Clone)]
pub struct WorkoutStore<H> {
    entries: Vec<WorkoutEntry<H>>,
}

impl<H> Default for WorkoutStore<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> WorkoutStore<H> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from workouts read back from storage.
    ///
    /// Loaded entries have no markers. Later duplicates of an id are dropped.
    pub fn from_loaded(workouts: Vec<Workout>) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(workouts.len());

        for workout in workouts {
            if !seen.insert(workout.id.clone()) {
                tracing::warn!("Dropping duplicate workout id {} from snapshot", workout.id);
                continue;
            }
            entries.push(WorkoutEntry {
                workout,
                marker: None,
            });
        }

        Self { entries }
    }

    /// Number of workouts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[WorkoutEntry<H>] {
        &self.entries
    }

    /// Workouts in insertion order.
    pub fn workouts(&self) -> impl Iterator<Item = &Workout> {
        self.entries.iter().map(|e| &e.workout)
    }

    /// Append a workout and its marker.
    pub fn add(&mut self, workout: Workout, marker: Option<H>) -> Result<(), StoreError> {
        if self.position(&workout.id).is_some() {
            return Err(StoreError::DuplicateId(workout.id));
        }
        self.entries.push(WorkoutEntry { workout, marker });
        Ok(())
    }

    /// Find an entry by id.
    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&WorkoutEntry<H>> {
        self.entries.iter().find(|e| &e.workout.id == id)
    }

    /// Remove an entry by id.
    ///
    /// The returned entry still holds its marker; the caller detaches it from
    /// the map. Unknown ids are a no-op.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> Option<WorkoutEntry<H>> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Replace a workout's fields in place, keeping its marker.
    pub fn replace(&mut self, id: &WorkoutId, fields: &WorkoutFields) -> Result<&Workout, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let entry = &mut self.entries[index];
        entry.workout = entry.workout.updated(fields)?;
        Ok(&entry.workout)
    }

    /// Attach a marker to an entry, returning any handle it replaces.
    pub fn attach_marker(&mut self, id: &WorkoutId, marker: H) -> Result<Option<H>, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(self.entries[index].marker.replace(marker))
    }

    /// Remove every entry, handing them back so markers can be detached.
    pub fn clear(&mut self) -> Vec<WorkoutEntry<H>> {
        std::mem::take(&mut self.entries)
    }

    fn position(&self, id: &WorkoutId) -> Option<usize> {
        self.entries.iter().position(|e| &e.workout.id == id)
    }
}
