//! Light and dark colour sets for the mood calendar window.

use egui::Color32;

use crate::models::settings::{Settings, THEME_DARK, THEME_LIGHT, THEME_SYSTEM};

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    pub app_background: Color32,
    /// Fill of the rounded panel behind the grid
    pub grid_background: Color32,
    /// Fill of a day with no mood recorded
    pub empty_day: Color32,
    pub cell_border: Color32,
    /// Hover ring and selected year
    pub accent: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl HeatmapTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(246, 243, 238),
            grid_background: Color32::from_rgb(252, 250, 247),
            empty_day: Color32::from_rgba_unmultiplied(0, 0, 0, 10),
            cell_border: Color32::from_rgb(120, 104, 86),
            accent: Color32::from_rgb(74, 59, 44),
            text_primary: Color32::from_rgb(58, 48, 40),
            text_secondary: Color32::from_rgb(122, 103, 86),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 28, 27),
            grid_background: Color32::from_rgb(40, 37, 35),
            empty_day: Color32::from_rgba_unmultiplied(255, 255, 255, 14),
            cell_border: Color32::from_rgb(200, 190, 178),
            accent: Color32::from_rgb(236, 214, 186),
            text_primary: Color32::from_rgb(238, 232, 224),
            text_secondary: Color32::from_rgb(170, 160, 150),
        }
    }

    /// Theme for the persisted setting. "system" follows the OS preference
    /// and falls back to light when it cannot be detected.
    pub fn for_settings(settings: &Settings) -> Self {
        match settings.theme.as_str() {
            THEME_DARK => Self::dark(),
            THEME_SYSTEM => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light | dark_light::Mode::Default => Self::light(),
            },
            THEME_LIGHT => Self::light(),
            other => {
                log::warn!("Theme '{}' not found, using fallback.", other);
                Self::light()
            }
        }
    }

    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.grid_background;
        visuals.panel_fill = self.app_background;
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.35);
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}
