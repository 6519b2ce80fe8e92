//! Workout module: model, form input and the in-memory store.

pub mod input;
pub mod store;
pub mod types;

pub use input::{coerce_number, ElevationPolicy, Field, RawInput, ValidationError};
pub use store::{StoreError, WorkoutEntry, WorkoutStore};
pub use types::{
    derive_metrics, describe, describe_in, round2, Coords, DerivedMetrics, KindInput, ModelError, Workout,
    WorkoutDetails, WorkoutFields, WorkoutId, WorkoutKind,
};
