//! Entry form widget.

use egui::{Grid, Key, RichText, TextEdit, Ui};

use crate::ui::form::EntryForm;
use crate::workouts::WorkoutKind;

/// What the user did with the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Submit (button or Enter)
    Submit,
    /// Close without saving (button or Escape)
    Cancel,
    /// Picked another workout type
    KindChanged(WorkoutKind),
}

fn number_field(ui: &mut Ui, label: &str, text: &mut String, hint: &str) -> egui::Response {
    ui.label(label);
    let response = ui.add(TextEdit::singleline(text).hint_text(hint).desired_width(120.0));
    ui.end_row();
    response
}

/// Render the entry form.
pub fn entry_form(ui: &mut Ui, form: &mut EntryForm) -> Option<FormAction> {
    let mut action = None;
    let editing = form.is_editing();
    let focus = form.take_focus_request();

    ui.label(
        RichText::new(if editing { "Edit workout" } else { "New workout" })
            .strong()
            .size(16.0),
    );
    if let Some(coords) = form.pending_coords().filter(|_| !editing) {
        ui.label(RichText::new(format!("📍 {}", coords)).small());
    }
    ui.add_space(4.0);

    Grid::new("entry_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Type");
            let mut selected = form.raw.kind;
            ui.add_enabled_ui(!editing, |ui| {
                egui::ComboBox::from_id_salt("workout_kind")
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for kind in WorkoutKind::ALL {
                            ui.selectable_value(&mut selected, kind, kind.label());
                        }
                    });
            });
            ui.end_row();
            if selected != form.raw.kind {
                action = Some(FormAction::KindChanged(selected));
            }

            let distance = number_field(ui, "Distance", &mut form.raw.distance, "km");
            if focus {
                distance.request_focus();
            }
            number_field(ui, "Duration", &mut form.raw.duration, "min");

            match form.raw.kind {
                WorkoutKind::Running => {
                    number_field(ui, "Cadence", &mut form.raw.cadence, "step/min");
                }
                WorkoutKind::Cycling => {
                    number_field(ui, "Elev Gain", &mut form.raw.elevation, "meters");
                }
            }
        });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if ui.button(if editing { "Save" } else { "OK" }).clicked() {
            action = Some(FormAction::Submit);
        }
        if ui.button("Cancel").clicked() {
            action = Some(FormAction::Cancel);
        }
    });

    if action.is_none() {
        ui.input(|i| {
            if i.key_pressed(Key::Enter) {
                action = Some(FormAction::Submit);
            } else if i.key_pressed(Key::Escape) {
                action = Some(FormAction::Cancel);
            }
        });
    }

    action
}
