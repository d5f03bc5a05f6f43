//! Modal editor for a single day's mood.

use egui::{RichText, Sense, Stroke, Vec2};

use crate::heatmap::Interaction;
use crate::models::diary::DiaryLink;
use crate::models::mood::{Intensity, Mood};
use crate::ui_egui::theme::HeatmapTheme;
use crate::ui_egui::views::palette::mood_color;

pub enum MoodDialogAction {
    None,
    Save,
    Cancel,
    OpenDiary(DiaryLink),
}

/// Renders the dialog while `interaction` holds a draft. Mood, intensity and
/// note edits go straight into the draft; the caller applies Save/Cancel.
pub fn render_mood_dialog(
    ctx: &egui::Context,
    interaction: &mut Interaction,
    diary: Option<&DiaryLink>,
    theme: &HeatmapTheme,
) -> MoodDialogAction {
    let Some(draft) = interaction.draft().cloned() else {
        return MoodDialogAction::None;
    };

    let mut action = MoodDialogAction::None;
    let mut dialog_open = true;

    egui::Window::new("How did the day feel?")
        .id(egui::Id::new("mood_dialog"))
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(draft.date.format("%A, %B %-d, %Y").to_string().to_uppercase())
                    .size(11.0)
                    .color(theme.text_secondary),
            );
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;
                for mood in Mood::ALL {
                    let selected = draft.mood == mood;
                    let size = if selected { 40.0 } else { 34.0 };
                    let (rect, response) =
                        ui.allocate_exact_size(Vec2::splat(40.0), Sense::click());
                    ui.painter().circle_filled(
                        rect.center(),
                        size / 2.0,
                        mood_color(mood, Intensity::MEDIUM),
                    );
                    if selected {
                        ui.painter()
                            .circle_stroke(rect.center(), size / 2.0 + 2.0, Stroke::new(2.0, theme.accent));
                    }
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        mood.icon(),
                        egui::FontId::proportional(16.0),
                        theme.text_primary,
                    );
                    if response.on_hover_text(mood.label()).clicked() {
                        interaction.select_mood(mood);
                    }
                }
            });
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(draft.mood.label().to_uppercase())
                        .size(11.0)
                        .color(theme.text_secondary),
                );
                for intensity in Intensity::ALL {
                    let diameter = 18.0 + f32::from(intensity.get()) * 6.0;
                    let (rect, response) =
                        ui.allocate_exact_size(Vec2::splat(diameter), Sense::click());
                    ui.painter()
                        .circle_filled(rect.center(), diameter / 2.0, mood_color(draft.mood, intensity));
                    if draft.intensity == intensity {
                        ui.painter().circle_stroke(
                            rect.center(),
                            diameter / 2.0,
                            Stroke::new(2.0, theme.accent),
                        );
                    }
                    if response
                        .on_hover_text(format!("Intensity {}", intensity.get()))
                        .clicked()
                    {
                        interaction.select_intensity(intensity);
                    }
                }
            });
            ui.add_space(10.0);

            ui.label(RichText::new("NOTE").size(11.0).color(theme.text_secondary));
            if let Some(note) = interaction.note_mut() {
                ui.add(
                    egui::TextEdit::multiline(note)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY)
                        .hint_text("Capture how you felt today..."),
                );
            }
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    action = MoodDialogAction::Save;
                }
                if ui.button("Cancel").clicked() {
                    action = MoodDialogAction::Cancel;
                }
                if let Some(link) = diary {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.link("Open diary ↗").on_hover_text(&link.title).clicked() {
                            action = MoodDialogAction::OpenDiary(link.clone());
                        }
                    });
                }
            });
        });

    if !dialog_open {
        action = MoodDialogAction::Cancel;
    }

    action
}
