//! Dialog for writing a diary post. Posts are the source of the diary
//! markers on the heatmap.

use egui::{Color32, RichText};

#[derive(Default)]
pub struct DiaryDialogState {
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

impl DiaryDialogState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub enum DiaryDialogAction {
    None,
    Create { title: String, content: String },
    Close,
}

pub fn render_diary_dialog(
    ctx: &egui::Context,
    state: &mut DiaryDialogState,
    open: &mut bool,
) -> DiaryDialogAction {
    let mut action = DiaryDialogAction::None;
    let mut dialog_open = *open;

    egui::Window::new("✏ New Diary Post")
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(true)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(error) = &state.error {
                ui.colored_label(Color32::RED, RichText::new(error).strong());
                ui.add_space(4.0);
            }

            ui.label("Title:");
            ui.text_edit_singleline(&mut state.title);
            ui.add_space(6.0);

            ui.label("Content:");
            ui.add(
                egui::TextEdit::multiline(&mut state.content)
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let can_publish = !state.title.trim().is_empty();
                if ui
                    .add_enabled(can_publish, egui::Button::new("Publish"))
                    .clicked()
                {
                    action = DiaryDialogAction::Create {
                        title: state.title.clone(),
                        content: state.content.clone(),
                    };
                }
                if ui.button("Cancel").clicked() {
                    action = DiaryDialogAction::Close;
                }
            });
        });

    if !dialog_open {
        action = DiaryDialogAction::Close;
    }
    *open = dialog_open;
    action
}
