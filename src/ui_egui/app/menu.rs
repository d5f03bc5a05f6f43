use super::MoodCalendarApp;
use crate::models::settings::{THEME_DARK, THEME_LIGHT, THEME_SYSTEM};
use egui::Context;

impl MoodCalendarApp {
    pub(super) fn render_menu_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                self.render_file_menu(ui, ctx);
                self.render_view_menu(ui);
                self.render_help_menu(ui);
            });
        });
    }

    fn render_file_menu(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        ui.menu_button("File", |ui| {
            if ui.button("✏ New Diary Post...").clicked() {
                self.state.diary_dialog_state.reset();
                self.state.show_diary_dialog = true;
                ui.close_menu();
            }

            ui.separator();

            if ui.button("🔄 Reload from Database").clicked() {
                self.reload_from_database();
                ui.close_menu();
            }
            if ui.button("📋 Copy Moods as JSON").clicked() {
                self.copy_moods_as_json(ctx);
                ui.close_menu();
            }

            ui.separator();
            if ui.button("Exit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn render_view_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("View", |ui| {
            ui.menu_button("🎨 Theme", |ui| {
                for (value, label) in [
                    (THEME_LIGHT, "Light"),
                    (THEME_DARK, "Dark"),
                    (THEME_SYSTEM, "Follow System"),
                ] {
                    if ui
                        .selectable_label(self.settings.theme == value, label)
                        .clicked()
                    {
                        self.settings.theme = value.to_string();
                        self.save_settings();
                        self.state.pending_theme_apply = true;
                        ui.close_menu();
                    }
                }
            });

            ui.separator();

            if ui
                .checkbox(&mut self.settings.show_diary_markers, "Show Diary Markers")
                .clicked()
            {
                self.save_settings();
                ui.close_menu();
            }
            if ui
                .checkbox(&mut self.settings.reveal_animation, "Animate Entries")
                .clicked()
            {
                self.save_settings();
                self.restart_reveal();
                ui.close_menu();
            }
        });
    }

    fn render_help_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Help", |ui| {
            if ui.button("ℹ About...").clicked() {
                self.state.show_about_dialog = true;
                ui.close_menu();
            }
        });
    }

    pub(super) fn render_about_dialog(&mut self, ctx: &Context) {
        if !self.state.show_about_dialog {
            return;
        }

        let mut dialog_open = true;
        egui::Window::new("About Mood Calendar")
            .open(&mut dialog_open)
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.vertical_centered(|ui| {
                    ui.heading("🌼 Mood Calendar");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label(env!("CARGO_PKG_DESCRIPTION"));
                    ui.add_space(8.0);
                    ui.label(format!("License: {}", env!("CARGO_PKG_LICENSE")));
                    ui.add_space(4.0);
                    ui.label(format!("{} moods recorded", self.store.recorded_len()));
                });
            });

        if !dialog_open {
            self.state.show_about_dialog = false;
        }
    }

    fn save_settings(&mut self) {
        if let Err(err) = self.context.settings_service().update(&self.settings) {
            log::error!("Failed to update settings: {}", err);
            self.toast_manager.error("Could not save settings");
        }
    }

    fn copy_moods_as_json(&mut self, ctx: &Context) {
        match self.context.mood_service().export_json() {
            Ok(json) => {
                ctx.copy_text(json);
                self.toast_manager.success("Mood entries copied to clipboard");
            }
            Err(err) => {
                log::error!("Failed to export mood entries: {:#}", err);
                self.toast_manager.error("Could not export mood entries");
            }
        }
    }
}
