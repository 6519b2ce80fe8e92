//! UI module: the view controller, its view state and the egui widgets.

pub mod controller;
pub mod form;
pub mod list;
pub mod map;
pub mod theme;
pub mod widgets;

pub use controller::{ControllerSettings, SubmitOutcome, TrackerError, WorkoutController};
pub use form::{EntryForm, FormMode};
pub use list::{DetailRow, ListView, WorkoutListItem};
pub use map::{MapView, MarkerPopup, PanOptions};
