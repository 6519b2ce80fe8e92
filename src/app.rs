//! Main application state and egui integration.

use std::time::Instant;

use eframe::egui;

use trackpin::location::ConfiguredLocation;
use trackpin::storage::config::AppConfig;
use trackpin::storage::database::SqliteKvStore;
use trackpin::storage::kv::{KeyValueStore, MemoryKvStore};
use trackpin::storage::persistence::WorkoutPersistence;
use trackpin::ui::controller::{ControllerSettings, WorkoutController};
use trackpin::ui::theme::{self, Palette};
use trackpin::ui::widgets::{entry_form, workout_card, CardAction, FormAction, MapCanvas};
use trackpin::workouts::WorkoutId;

type Controller = WorkoutController<MapCanvas, Box<dyn KeyValueStore>>;

/// Main application state.
pub struct TrackpinApp {
    /// Workout controller
    controller: Controller,
    /// Message shown in the alert dialog
    alert: Option<String>,
    /// Whether the reset confirmation is open
    confirm_reset: bool,
}

impl TrackpinApp {
    /// Create the app and load saved workouts.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        cc.egui_ctx.set_visuals(theme::visuals());

        let kv: Box<dyn KeyValueStore> = match SqliteKvStore::open(&config.database_path()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!("Workouts will not be kept after exit: {}", e);
                Box::new(MemoryKvStore::new())
            }
        };
        let persistence = WorkoutPersistence::new(kv, config.storage.key.clone());

        let mut controller = WorkoutController::new(
            MapCanvas::new(),
            persistence,
            ControllerSettings::from(&config),
        );

        let alert = controller
            .start(&ConfiguredLocation::from_settings(&config.map))
            .err()
            .map(|e| format!("{}. Set map.home in the configuration file.", e));

        Self {
            controller,
            alert,
            confirm_reset: false,
        }
    }

    fn handle_card_action(&mut self, id: WorkoutId, action: CardAction) {
        match action {
            CardAction::Select => {
                self.controller.move_to(&id);
            }
            CardAction::OpenMenu => {
                self.controller.open_menu(&id);
            }
            CardAction::Edit => {
                if let Err(e) = self.controller.begin_edit(&id) {
                    self.alert = Some(e.to_string());
                }
            }
            CardAction::Delete => {
                if let Err(e) = self.controller.delete(&id) {
                    self.alert = Some(e.to_string());
                }
            }
        }
    }

    fn handle_form_action(&mut self, action: FormAction, now: Instant) {
        match action {
            FormAction::Submit => {
                if let Err(e) = self.controller.submit(now) {
                    self.alert = Some(e.to_string());
                }
            }
            FormAction::Cancel => self.controller.cancel_form(now),
            FormAction::KindChanged(kind) => {
                self.controller.toggle_kind(kind);
            }
        }
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui, now: Instant) -> Option<CardAction> {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading("Trackpin");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_workouts = !self.controller.list().items().is_empty();
                if ui
                    .add_enabled(has_workouts, egui::Button::new("Reset all"))
                    .clicked()
                {
                    self.confirm_reset = true;
                }
            });
        });
        ui.separator();

        if self.controller.form().is_displayed() {
            if let Some(action) = entry_form(ui, self.controller.form_mut()) {
                self.handle_form_action(action, now);
            }
            ui.separator();
        }

        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.controller.list().items().is_empty() {
                ui.label(
                    egui::RichText::new("Click on the map to log a workout")
                        .color(Palette::TEXT_SECONDARY),
                );
            }
            for item in self.controller.list().items() {
                if let Some(action) = workout_card(ui, item) {
                    clicked = Some((item.id.clone(), action));
                }
                ui.add_space(8.0);
            }
        });

        let (id, action) = clicked?;
        self.handle_card_action(id, action);
        Some(action)
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        egui::Window::new("Trackpin")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.label(message);
                ui.add_space(12.0);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }

    fn render_reset_dialog(&mut self, ctx: &egui::Context) {
        if !self.confirm_reset {
            return;
        }

        egui::Window::new("Delete all workouts?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("This removes every saved workout.");
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.confirm_reset = false;
                    }
                    if ui
                        .add(egui::Button::new("Delete all").fill(Palette::CYCLING))
                        .clicked()
                    {
                        self.confirm_reset = false;
                        if let Err(e) = self.controller.reset_all() {
                            self.alert = Some(e.to_string());
                        }
                    }
                });
            });
    }
}

impl eframe::App for TrackpinApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.tick(now);

        if self.controller.form().pending_reenables() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        let card_action = egui::SidePanel::left("workouts")
            .resizable(true)
            .default_width(360.0)
            .min_width(280.0)
            .show(ctx, |ui| self.render_sidebar(ui, now))
            .inner;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(coords) = self.controller.map_mut().show(ui) {
                    self.controller.handle_map_click(coords);
                }
            });

        // Any click outside an options control closes open menus
        if card_action != Some(CardAction::OpenMenu) && ctx.input(|i| i.pointer.any_click()) {
            self.controller.close_menus();
        }

        self.render_reset_dialog(ctx);
        self.render_alert(ctx);
    }
}
