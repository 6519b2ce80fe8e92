//! Entry form state.
//!
//! The form is shared by the create and edit flows. Its mode decides what a
//! submission does; editing switches the mode and finishing (or cancelling)
//! the edit switches it back.
//!
//! Hiding the form also suppresses its display for a short delay so the
//! closing transition can finish. Each hide schedules its own re-enable and
//! none are cancelled: a second hide before the first delay expires means
//! the display comes back when the first deadline passes, and again
//! (harmlessly) at the second.

use std::time::{Duration, Instant};

use crate::workouts::{Coords, RawInput, Workout, WorkoutId, WorkoutKind};

/// What a submission does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Create a new workout at the pending location
    #[default]
    Create,
    /// Update an existing workout
    Edit { id: WorkoutId },
}

/// Entry form state.
#[derive(Debug, Clone)]
pub struct EntryForm {
    /// Field text bound to the inputs
    pub raw: RawInput,
    mode: FormMode,
    visible: bool,
    display_enabled: bool,
    pending_coords: Option<Coords>,
    reenable_at: Vec<Instant>,
    focus_requested: bool,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            raw: RawInput::default(),
            mode: FormMode::Create,
            visible: false,
            display_enabled: true,
            pending_coords: None,
            reenable_at: Vec::new(),
            focus_requested: false,
        }
    }
}

impl EntryForm {
    /// Create a hidden form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current submission mode.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Whether the form is editing an existing workout.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Whether the form is open (it may still be waiting on its display delay).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the form should be drawn right now.
    pub fn is_displayed(&self) -> bool {
        self.visible && self.display_enabled
    }

    /// Location of the most recent map click.
    pub fn pending_coords(&self) -> Option<Coords> {
        self.pending_coords
    }

    /// Open the form for a new workout at `coords`.
    ///
    /// A click while editing abandons the edit.
    pub fn show_for_location(&mut self, coords: Coords) {
        if self.is_editing() {
            self.finish_edit();
            self.clear_fields();
        }
        self.pending_coords = Some(coords);
        self.visible = true;
        self.focus_requested = true;
    }

    /// Open the form prefilled with a workout's values.
    pub fn begin_edit(&mut self, workout: &Workout) {
        self.raw = RawInput::from_fields(&workout.fields());
        self.mode = FormMode::Edit {
            id: workout.id.clone(),
        };
        self.visible = true;
        self.focus_requested = true;
    }

    /// Return to create mode.
    pub fn finish_edit(&mut self) {
        self.mode = FormMode::Create;
    }

    /// Switch the visible variant field. Ignored while editing.
    pub fn set_kind(&mut self, kind: WorkoutKind) -> bool {
        if self.is_editing() {
            return false;
        }
        self.raw.kind = kind;
        true
    }

    /// Close the form, clear its fields and suppress display for `delay`.
    pub fn hide(&mut self, now: Instant, delay: Duration) {
        self.visible = false;
        self.display_enabled = false;
        self.reenable_at.push(now + delay);
        self.clear_fields();
    }

    /// Run any re-enables that are due. Returns true if one fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.reenable_at.len();
        self.reenable_at.retain(|deadline| *deadline > now);

        let fired = self.reenable_at.len() < before;
        if fired {
            self.display_enabled = true;
        }
        fired
    }

    /// Number of re-enables still waiting.
    pub fn pending_reenables(&self) -> usize {
        self.reenable_at.len()
    }

    /// Take the one-shot request to focus the distance field.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn clear_fields(&mut self) {
        self.raw = RawInput {
            kind: self.raw.kind,
            ..Default::default()
        };
    }
}
