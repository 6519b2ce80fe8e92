//! Workout list view model.
//!
//! Items are kept in display order, newest first. Edits refresh an item's
//! text in place; the per-item options menu allows at most one open menu.

use crate::workouts::{Workout, WorkoutDetails, WorkoutId, WorkoutKind};

/// One labelled value on a workout card.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    /// Emoji icon
    pub icon: &'static str,
    /// Formatted value
    pub value: String,
    /// Unit label
    pub unit: &'static str,
}

/// A rendered workout card.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutListItem {
    /// Workout id
    pub id: WorkoutId,
    /// Workout kind, used for styling
    pub kind: WorkoutKind,
    /// Card title (the workout description)
    pub title: String,
    /// Distance, duration, metric and variant value, in that order
    pub details: [DetailRow; 4],
    /// Whether the options menu is open
    pub menu_open: bool,
}

/// Format a user-entered number without trailing zeros.
fn format_value(value: f64) -> String {
    value.to_string()
}

fn detail_rows(workout: &Workout) -> [DetailRow; 4] {
    let (kind_icon, variant_icon, variant_unit) = match workout.details {
        WorkoutDetails::Running { .. } => ("🏃‍♂️", "🦶🏼", "spm"),
        WorkoutDetails::Cycling { .. } => ("🚴‍♀️", "⛰", "m"),
    };

    [
        DetailRow {
            icon: kind_icon,
            value: format_value(workout.distance_km),
            unit: "km",
        },
        DetailRow {
            icon: "⏱",
            value: format_value(workout.duration_min),
            unit: "min",
        },
        DetailRow {
            icon: "⚡️",
            value: format!("{:.2}", workout.details.metric()),
            unit: workout.kind().metric_unit(),
        },
        DetailRow {
            icon: variant_icon,
            value: format_value(workout.details.variant_value()),
            unit: variant_unit,
        },
    ]
}

impl WorkoutListItem {
    /// Render a workout.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            id: workout.id.clone(),
            kind: workout.kind(),
            title: workout.description.clone(),
            details: detail_rows(workout),
            menu_open: false,
        }
    }

    /// Update the text fields after an edit.
    pub fn refresh(&mut self, workout: &Workout) {
        self.title = workout.description.clone();
        self.details = detail_rows(workout);
    }
}

/// The workout list.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    items: Vec<WorkoutListItem>,
}

impl ListView {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render workouts given in insertion order.
    pub fn from_workouts<'a, I>(workouts: I) -> Self
    where
        I: IntoIterator<Item = &'a Workout>,
    {
        let mut items: Vec<_> = workouts.into_iter().map(WorkoutListItem::from_workout).collect();
        items.reverse();
        Self { items }
    }

    /// Items in display order.
    pub fn items(&self) -> &[WorkoutListItem] {
        &self.items
    }

    /// Look up an item.
    pub fn get(&self, id: &WorkoutId) -> Option<&WorkoutListItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add an item at the top.
    pub fn insert(&mut self, item: WorkoutListItem) {
        self.items.insert(0, item);
    }

    /// Remove an item. Returns false if it was not listed.
    pub fn remove(&mut self, id: &WorkoutId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() < before
    }

    /// Refresh an item's text from an edited workout.
    pub fn refresh(&mut self, workout: &Workout) -> bool {
        match self.items.iter_mut().find(|item| item.id == workout.id) {
            Some(item) => {
                item.refresh(workout);
                true
            }
            None => false,
        }
    }

    /// Open one item's menu, closing every other.
    pub fn open_menu(&mut self, id: &WorkoutId) -> bool {
        let mut found = false;
        for item in &mut self.items {
            item.menu_open = &item.id == id;
            found |= item.menu_open;
        }
        found
    }

    /// Close all menus. Returns true if one was open.
    pub fn close_menus(&mut self) -> bool {
        let mut was_open = false;
        for item in &mut self.items {
            was_open |= item.menu_open;
            item.menu_open = false;
        }
        was_open
    }

    /// Id of the item whose menu is open.
    pub fn open_menu_id(&self) -> Option<&WorkoutId> {
        self.items.iter().find(|item| item.menu_open).map(|item| &item.id)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
