//! Workout card widget for the sidebar list.

use egui::{Frame, Label, Margin, RichText, Sense, Stroke, Ui};

use crate::ui::list::WorkoutListItem;
use crate::ui::theme::{kind_color, Palette};

/// What the user did with a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Clicked the card body: jump to its marker
    Select,
    /// Clicked the options control
    OpenMenu,
    /// Chose "Edit" in the options menu
    Edit,
    /// Chose "Delete workout" in the options menu
    Delete,
}

/// Render one workout card.
pub fn workout_card(ui: &mut Ui, item: &WorkoutListItem) -> Option<CardAction> {
    let accent = kind_color(item.kind);
    let mut action = None;

    Frame::new()
        .fill(Palette::CARD_BG)
        .stroke(Stroke::new(1.0, accent))
        .corner_radius(5.0)
        .inner_margin(Margin::symmetric(14, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            let mut body = ui
                .horizontal(|ui| {
                    let title = ui.add(
                        Label::new(RichText::new(&item.title).strong().size(16.0))
                            .sense(Sense::click()),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("⋯").on_hover_text("Options").clicked() {
                            action = Some(CardAction::OpenMenu);
                        }
                    });
                    title
                })
                .inner;

            if item.menu_open {
                ui.horizontal(|ui| {
                    if ui.button("Delete workout").clicked() {
                        action = Some(CardAction::Delete);
                    }
                    if ui.button("Edit").clicked() {
                        action = Some(CardAction::Edit);
                    }
                });
            }

            ui.horizontal(|ui| {
                for detail in &item.details {
                    let text = format!("{} {} {}", detail.icon, detail.value, detail.unit);
                    let response = ui.add(
                        Label::new(RichText::new(text).color(Palette::TEXT_SECONDARY))
                            .sense(Sense::click()),
                    );
                    body |= response;
                    ui.add_space(8.0);
                }
            });

            if action.is_none() && body.clicked() {
                action = Some(CardAction::Select);
            }
        });

    action
}
