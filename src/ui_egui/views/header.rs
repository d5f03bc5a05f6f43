//! Year selector and mood legend shown above the grid.

use egui::{RichText, Sense, Stroke, Vec2};

use super::palette::mood_color;
use crate::heatmap::layout::step_year;
use crate::models::mood::{Intensity, Mood};
use crate::ui_egui::theme::HeatmapTheme;

/// Renders the row of selectable years. Clicking a year or scrolling over the
/// selector returns the newly chosen year.
pub fn render_year_selector(
    ui: &mut egui::Ui,
    options: &[i32],
    selected: i32,
    theme: &HeatmapTheme,
) -> Option<i32> {
    let mut chosen = None;

    let frame = egui::Frame::none()
        .fill(theme.grid_background)
        .rounding(16.0)
        .stroke(Stroke::new(1.0, theme.cell_border.gamma_multiply(0.2)))
        .inner_margin(egui::Margin::symmetric(14.0, 8.0));

    let response = frame
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 14.0;
                for &year in options {
                    let active = year == selected;
                    let text = if active {
                        RichText::new(year.to_string())
                            .size(15.0)
                            .strong()
                            .color(theme.accent)
                    } else {
                        RichText::new(year.to_string())
                            .size(13.0)
                            .color(theme.text_secondary.gamma_multiply(0.7))
                    };
                    if ui.add(egui::Label::new(text).sense(Sense::click())).clicked() {
                        chosen = Some(year);
                    }
                }
            });
        })
        .response;

    if ui.rect_contains_pointer(response.rect) {
        let scroll = ui.input(|i| i.raw_scroll_delta);
        let delta = if scroll.y.abs() >= scroll.x.abs() { scroll.y } else { scroll.x };
        // Wheel down moves to later years
        if delta < 0.0 {
            chosen = Some(step_year(options, selected, 1));
        } else if delta > 0.0 {
            chosen = Some(step_year(options, selected, -1));
        }
    }

    chosen.filter(|year| *year != selected)
}

/// Three swatches per mood, lightest first, followed by the mood's name.
pub fn render_legend(ui: &mut egui::Ui, theme: &HeatmapTheme) {
    ui.horizontal_wrapped(|ui| {
        for mood in Mood::ALL {
            egui::Frame::none()
                .fill(theme.grid_background.gamma_multiply(0.8))
                .rounding(10.0)
                .inner_margin(egui::Margin::symmetric(8.0, 3.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 3.0;
                        for intensity in Intensity::ALL {
                            let (rect, response) =
                                ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                            ui.painter().circle_filled(
                                rect.center(),
                                6.0,
                                mood_color(mood, intensity),
                            );
                            response.on_hover_text(format!("{} {}", mood.label(), intensity.get()));
                        }
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new(mood.label().to_uppercase())
                                .size(11.0)
                                .color(theme.text_secondary),
                        );
                    });
                });
        }
    });
}
