//! Workout model types.
//!
//! A workout is either a run or a ride. The variant carries its own derived
//! metric (pace or speed), and both the create and edit paths go through
//! [`derive_metrics`], so a record never needs variant-specific methods to
//! recompute itself.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Geographic position in degrees.
///
/// Serialized as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coords {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
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

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Opaque workout identifier.
///
/// New workouts get a UUID; ids read from older snapshots are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
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

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    /// Running: tracks cadence, derives pace
    #[default]
    Running,
    /// Cycling: tracks elevation gain, derives speed
    Cycling,
}

impl WorkoutKind {
    /// All kinds, in form order.
    pub const ALL: [WorkoutKind; 2] = [WorkoutKind::Running, WorkoutKind::Cycling];

    /// Lowercase tag used in descriptions and snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Display name for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Name of the derived metric.
    pub fn metric_name(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "pace",
            WorkoutKind::Cycling => "speed",
        }
    }

    /// Unit of the derived metric.
    pub fn metric_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "min/km",
            WorkoutKind::Cycling => "km/h",
        }
    }
}

impl std::fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific value entered by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindInput {
    /// Steps per minute
    Running { cadence: f64 },
    /// Meters climbed
    Cycling { elevation_gain: f64 },
}

impl KindInput {
    /// Kind this input belongs to.
    pub fn kind(&self) -> WorkoutKind {
        match self {
            KindInput::Running { .. } => WorkoutKind::Running,
            KindInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// User-supplied fields, shared by creation and editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutFields {
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Variant-specific value
    pub input: KindInput,
}

impl WorkoutFields {
    /// Pace (min/km) for runs, speed (km/h) for rides, rounded to two
    /// decimals. May be infinite when the inputs are extreme.
    pub fn metric(&self) -> f64 {
        match self.input {
            KindInput::Running { .. } => round2(self.duration_min / self.distance_km),
            KindInput::Cycling { .. } => round2(self.distance_km / (self.duration_min / 60.0)),
        }
    }
}

/// Stored variant data, including the derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    /// Run with cadence (spm) and pace (min/km)
    Running { cadence: f64, pace: f64 },
    /// Ride with elevation gain (m) and speed (km/h)
    Cycling { elevation_gain: f64, speed: f64 },
}

impl WorkoutDetails {
    /// Kind of this variant.
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace for runs, speed for rides.
    pub fn metric(&self) -> f64 {
        match self {
            WorkoutDetails::Running { pace, .. } => *pace,
            WorkoutDetails::Cycling { speed, .. } => *speed,
        }
    }

    /// Cadence for runs, elevation gain for rides.
    pub fn variant_value(&self) -> f64 {
        match self {
            WorkoutDetails::Running { cadence, .. } => *cadence,
            WorkoutDetails::Cycling { elevation_gain, .. } => *elevation_gain,
        }
    }

    /// The user input this variant was derived from.
    pub fn input(&self) -> KindInput {
        match *self {
            WorkoutDetails::Running { cadence, .. } => KindInput::Running { cadence },
            WorkoutDetails::Cycling { elevation_gain, .. } => KindInput::Cycling { elevation_gain },
        }
    }
}

/// Output of [`derive_metrics`].
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// Variant data with its metric filled in
    pub details: WorkoutDetails,
    /// "<type> on <Month> <Day>"
    pub description: String,
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_infinite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Compute the derived metric and description for a set of fields.
///
/// Pace is `duration / distance`; speed is `distance / (duration / 60)`.
/// Both are rounded to two decimals. Inputs are assumed validated.
pub fn derive_metrics(fields: &WorkoutFields, date: DateTime<Utc>) -> DerivedMetrics {
    let metric = fields.metric();
    let details = match fields.input {
        KindInput::Running { cadence } => WorkoutDetails::Running {
            cadence,
            pace: metric,
        },
        KindInput::Cycling { elevation_gain } => WorkoutDetails::Cycling {
            elevation_gain,
            speed: metric,
        },
    };

    DerivedMetrics {
        description: describe(details.kind(), date),
        details,
    }
}

/// Build the list/popup title, e.g. `running on May 1`, using the local
/// calendar day.
pub fn describe(kind: WorkoutKind, date: DateTime<Utc>) -> String {
    describe_in(kind, date, &Local)
}

/// Build the title with the calendar day of `date` in `tz`.
pub fn describe_in<Tz>(kind: WorkoutKind, date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{} on {}", kind, date.with_timezone(tz).format("%B %-d"))
}

/// A recorded workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    /// Unique identifier, never reassigned
    pub id: WorkoutId,
    /// Creation timestamp
    pub date: DateTime<Utc>,
    /// Where the workout happened
    pub coords: Coords,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Variant data and derived metric
    pub details: WorkoutDetails,
    /// Title shown in the list and on the marker popup
    pub description: String,
}

impl Workout {
    /// Create a workout stamped with the current time.
    pub fn new(coords: Coords, fields: WorkoutFields) -> Self {
        Self::with_date(coords, fields, Utc::now())
    }

    /// Create a workout with an explicit creation date.
    pub fn with_date(coords: Coords, fields: WorkoutFields, date: DateTime<Utc>) -> Self {
        let derived = derive_metrics(&fields, date);

        Self {
            id: WorkoutId::generate(),
            date,
            coords,
            distance_km: fields.distance_km,
            duration_min: fields.duration_min,
            details: derived.details,
            description: derived.description,
        }
    }

    /// Kind of this workout.
    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Current user-editable fields.
    pub fn fields(&self) -> WorkoutFields {
        WorkoutFields {
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            input: self.details.input(),
        }
    }

    /// Return a copy with new fields and recomputed metric/description.
    ///
    /// `id`, `coords` and `date` carry over unchanged.
    pub fn updated(&self, fields: &WorkoutFields) -> Result<Workout, ModelError> {
        let found = fields.input.kind();
        if found != self.kind() {
            return Err(ModelError::KindMismatch {
                expected: self.kind(),
                found,
            });
        }

        let derived = derive_metrics(fields, self.date);

        Ok(Workout {
            id: self.id.clone(),
            date: self.date,
            coords: self.coords,
            distance_km: fields.distance_km,
            duration_min: fields.duration_min,
            details: derived.details,
            description: derived.description,
        })
    }
}

/// Workout model errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Cannot turn a {expected} workout into {found}")]
    KindMismatch {
        expected: WorkoutKind,
        found: WorkoutKind,
    },
}
