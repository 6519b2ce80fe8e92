//! Map capability used by the controller.
//!
//! The controller only needs to drop pins, remove them and move the view;
//! click events flow the other way through
//! [`WorkoutController::handle_map_click`](super::controller::WorkoutController::handle_map_click).

use crate::workouts::{Coords, Workout, WorkoutKind};

/// A map that can show workout markers.
pub trait MapView {
    /// Handle to a placed marker.
    type Marker;

    /// Place a marker with an open popup.
    fn place_marker(&mut self, coords: Coords, popup: &MarkerPopup) -> Self::Marker;

    /// Remove a previously placed marker.
    fn remove_marker(&mut self, marker: Self::Marker);

    /// Center the view on `center` at `zoom`.
    fn set_view(&mut self, center: Coords, zoom: u8, pan: PanOptions);
}

/// How the view moves to a new center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    /// Animate the transition
    pub animate: bool,
    /// Animation length in seconds
    pub duration_secs: f32,
}

impl PanOptions {
    /// Jump without animation.
    pub fn instant() -> Self {
        Self {
            animate: false,
            duration_secs: 0.0,
        }
    }

    /// Pan smoothly over `duration_secs`.
    pub fn animated(duration_secs: f32) -> Self {
        Self {
            animate: true,
            duration_secs,
        }
    }
}

/// Popup attached to a workout marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    /// Text shown in the popup
    pub content: String,
    /// Workout kind, used for styling
    pub kind: WorkoutKind,
    /// Minimum popup width in points
    pub min_width: f32,
    /// Maximum popup width in points
    pub max_width: f32,
    /// Whether opening another popup closes this one
    pub auto_close: bool,
    /// Whether clicking the map closes this popup
    pub close_on_click: bool,
}

impl MarkerPopup {
    /// Popup for a workout: its description, always open.
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            content: workout.description.clone(),
            kind: workout.kind(),
            min_width: 150.0,
            max_width: 300.0,
            auto_close: false,
            close_on_click: false,
        }
    }

    /// Style class, e.g. `running-popup`.
    pub fn class_name(&self) -> String {
        format!("{}-popup", self.kind)
    }
}
