use egui::{Pos2, RichText, Stroke};

use crate::heatmap::TooltipContent;
use crate::ui_egui::theme::HeatmapTheme;

const TOOLTIP_WIDTH: f32 = 256.0;

/// Draws the day tooltip as a free-floating layer above everything else and
/// returns the screen rect it occupied.
pub fn render_tooltip_overlay(
    ctx: &egui::Context,
    position: Pos2,
    content: &TooltipContent,
    theme: &HeatmapTheme,
) -> egui::Rect {
    egui::Area::new(egui::Id::new("mood_tooltip"))
        .fixed_pos(position)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(theme.grid_background)
                .rounding(16.0)
                .stroke(Stroke::new(1.0, theme.cell_border.gamma_multiply(0.2)))
                .inner_margin(egui::Margin::same(14.0))
                .show(ui, |ui| {
                    ui.set_width(TOOLTIP_WIDTH);
                    ui.label(
                        RichText::new(content.title.to_uppercase())
                            .size(11.0)
                            .color(theme.text_secondary),
                    );
                    if let Some(label) = &content.mood_label {
                        ui.label(RichText::new(label).strong().color(theme.text_primary));
                    }
                    if let Some(note) = &content.note {
                        ui.add_space(4.0);
                        ui.add(egui::Label::new(RichText::new(note).size(12.0)).wrap());
                    }
                    if let Some(placeholder) = content.placeholder {
                        ui.add_space(4.0);
                        ui.label(RichText::new(placeholder).size(12.0).color(theme.text_secondary));
                    }
                    if let Some(diary) = &content.diary {
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new(format!("{} ↗", diary.title))
                                .size(11.0)
                                .strong()
                                .color(theme.accent),
                        );
                    }
                });
        })
        .response
        .rect
}
