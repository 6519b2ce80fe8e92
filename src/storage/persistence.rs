//! Workout snapshot persistence.
//!
//! The whole workout list is written as one JSON array under a single key
//! after every change. Reading it back never fails: a missing or unreadable
//! snapshot simply means "no history".
//!
//! Snapshot record layout:
//!
//! ```json
//! {
//!   "id": "…", "date": "2024-05-01T09:30:00Z", "coords": [10.0, 20.0],
//!   "distance": 5.0, "duration": 25.0, "type": "running",
//!   "cadence": 150.0, "pace": 5.0, "description": "running on May 1"
//! }
//! ```
//!
//! Rides carry `elevationGain` and `speed` instead. Snapshots written by the
//! old browser version (`elvationGain`, metrics stored as `"5.00"` strings)
//! are still accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::storage::kv::{KeyValueStore, StorageError};
use crate::workouts::types::{Coords, Workout, WorkoutDetails, WorkoutKind};

/// Default key of the snapshot slot.
pub const DEFAULT_KEY: &str = "workout";

/// One serialized workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(
        default,
        rename = "elevationGain",
        alias = "elvationGain",
        skip_serializing_if = "Option::is_none"
    )]
    pub elevation_gain: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub pace: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed: Option<f64>,
    pub description: String,
}

/// A record that cannot be turned back into a workout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{kind} workout {id} is missing `{field}`")]
    MissingField {
        id: String,
        kind: WorkoutKind,
        field: &'static str,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let mut record = WorkoutRecord {
            id: workout.id.to_string(),
            date: workout.date,
            coords: workout.coords,
            distance: workout.distance_km,
            duration: workout.duration_min,
            kind: workout.kind(),
            cadence: None,
            elevation_gain: None,
            pace: None,
            speed: None,
            description: workout.description.clone(),
        };

        match workout.details {
            WorkoutDetails::Running { cadence, pace } => {
                record.cadence = Some(cadence);
                record.pace = Some(pace);
            }
            WorkoutDetails::Cycling {
                elevation_gain,
                speed,
            } => {
                record.elevation_gain = Some(elevation_gain);
                record.speed = Some(speed);
            }
        }

        record
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = RecordError;

    /// Rebuild a workout, keeping the stored metric and description as-is.
    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let missing = |field| RecordError::MissingField {
            id: record.id.clone(),
            kind: record.kind,
            field,
        };

        let details = match record.kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence: record.cadence.ok_or_else(|| missing("cadence"))?,
                pace: record.pace.ok_or_else(|| missing("pace"))?,
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain: record.elevation_gain.ok_or_else(|| missing("elevationGain"))?,
                speed: record.speed.ok_or_else(|| missing("speed"))?,
            },
        };

        Ok(Workout {
            id: record.id.into(),
            date: record.date,
            coords: record.coords,
            distance_km: record.distance,
            duration_min: record.duration,
            details,
            description: record.description,
        })
    }
}

/// Reads and writes the workout snapshot in a key-value store.
pub struct WorkoutPersistence<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> WorkoutPersistence<K> {
    /// Create an adapter writing under `key`.
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Create an adapter using [`DEFAULT_KEY`].
    pub fn with_default_key(kv: K) -> Self {
        Self::new(kv, DEFAULT_KEY)
    }

    /// Key of the snapshot slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying key-value store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Overwrite the snapshot with the given workouts.
    pub fn save<'a, I>(&mut self, workouts: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = &'a Workout>,
    {
        let records: Vec<WorkoutRecord> = workouts.into_iter().map(WorkoutRecord::from).collect();
        let json = serde_json::to_string(&records)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        self.kv.set(&self.key, &json)?;
        tracing::debug!("Saved {} workouts under '{}'", records.len(), self.key);
        Ok(())
    }

    /// Load the snapshot.
    ///
    /// Returns an empty list when nothing is stored or the blob is not valid
    /// JSON. Individual records missing their variant fields are skipped.
    pub fn load(&self) -> Vec<Workout> {
        let json = match self.kv.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read workout snapshot: {}", e);
                return Vec::new();
            }
        };

        let records: Vec<WorkoutRecord> = match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Ignoring malformed workout snapshot: {}", e);
                return Vec::new();
            }
        };

        records
            .into_iter()
            .filter_map(|record| match Workout::try_from(record) {
                Ok(workout) => Some(workout),
                Err(e) => {
                    tracing::warn!("Skipping workout record: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Delete the snapshot.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.kv.remove(&self.key)
    }
}
