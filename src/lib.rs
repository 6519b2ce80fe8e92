//! Trackpin - map-based workout log
//!
//! Click where a run or ride happened, enter distance, duration and cadence
//! or elevation gain, and the workout is pinned on the map, listed in the
//! sidebar and saved locally. Workouts can be edited, deleted and jumped to.

pub mod location;
pub mod storage;
pub mod ui;
pub mod workouts;

// Re-export commonly used types
pub use location::{ConfiguredLocation, Geolocator};
pub use storage::config::AppConfig;
pub use storage::persistence::WorkoutPersistence;
pub use ui::controller::WorkoutController;
pub use workouts::{Workout, WorkoutStore};
