//! Reusable UI widgets.

pub mod entry_form;
pub mod map_canvas;
pub mod workout_card;

pub use entry_form::{entry_form, FormAction};
pub use map_canvas::{MapCanvas, MarkerId};
pub use workout_card::{workout_card, CardAction};
