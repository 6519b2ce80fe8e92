//! UI theme definitions.

use egui::{Color32, Visuals};

use crate::workouts::WorkoutKind;

/// Theme colors.
pub struct Palette;

impl Palette {
    /// Map background
    pub const MAP_BG: Color32 = Color32::from_rgb(38, 44, 48);
    /// Map grid lines
    pub const MAP_GRID: Color32 = Color32::from_rgb(58, 66, 72);
    /// Sidebar background
    pub const PANEL_BG: Color32 = Color32::from_rgb(45, 52, 57);
    /// Card background
    pub const CARD_BG: Color32 = Color32::from_rgb(66, 72, 77);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 236, 236);
    /// Secondary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(170, 170, 170);
    /// Running accent (green)
    pub const RUNNING: Color32 = Color32::from_rgb(0, 196, 106);
    /// Cycling accent (orange)
    pub const CYCLING: Color32 = Color32::from_rgb(255, 181, 69);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(80, 86, 92);
}

/// Accent color for a workout kind.
pub fn kind_color(kind: WorkoutKind) -> Color32 {
    match kind {
        WorkoutKind::Running => Palette::RUNNING,
        WorkoutKind::Cycling => Palette::CYCLING,
    }
}

/// Create the application visuals.
pub fn visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_fill = Palette::PANEL_BG;
    visuals.panel_fill = Palette::PANEL_BG;
    visuals.faint_bg_color = Palette::CARD_BG;
    visuals.extreme_bg_color = Palette::MAP_BG;

    visuals.widgets.noninteractive.bg_fill = Palette::CARD_BG;
    visuals.widgets.inactive.bg_fill = Palette::CARD_BG;
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(80, 88, 94);
    visuals.widgets.active.bg_fill = Palette::RUNNING;

    visuals.selection.bg_fill = Palette::RUNNING.linear_multiply(0.4);
    visuals.selection.stroke.color = Palette::RUNNING;

    visuals.widgets.noninteractive.fg_stroke.color = Palette::TEXT_PRIMARY;
    visuals.widgets.inactive.fg_stroke.color = Palette::TEXT_SECONDARY;
    visuals.widgets.hovered.fg_stroke.color = Palette::TEXT_PRIMARY;
    visuals.widgets.active.fg_stroke.color = Palette::TEXT_PRIMARY;

    visuals.widgets.noninteractive.bg_stroke.color = Palette::BORDER;
    visuals.widgets.inactive.bg_stroke.color = Palette::BORDER;

    visuals
}
