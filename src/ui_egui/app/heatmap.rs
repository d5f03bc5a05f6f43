use super::state::CELL_FADE_MS;
use super::MoodCalendarApp;
use crate::heatmap::layout::wave_delay_ms;
use crate::heatmap::{Interaction, ScreenPoint, TooltipContent};
use crate::ui_egui::diary_dialog::{render_diary_dialog, DiaryDialogAction};
use crate::ui_egui::mood_dialog::{render_mood_dialog, MoodDialogAction};
use crate::ui_egui::views::header::{render_legend, render_year_selector};
use crate::ui_egui::views::palette::HeatmapPalette;
use crate::ui_egui::views::tooltip_overlay::render_tooltip_overlay;
use crate::ui_egui::views::{CellAnimation, GridHover, HeatmapResponse, HeatmapView};
use egui::{Context, RichText};

impl MoodCalendarApp {
    pub(super) fn render_main_panel(&mut self, ctx: &Context) {
        let panel_frame = egui::Frame::central_panel(&ctx.style())
            .fill(self.active_theme.app_background)
            .inner_margin(egui::Margin::same(16.0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        RichText::new("MOOD TRACKER")
                            .size(11.0)
                            .color(self.active_theme.text_secondary),
                    );
                    ui.add_space(12.0);
                    if let Some(year) = render_year_selector(
                        ui,
                        &self.year.options,
                        self.year.selected,
                        &self.active_theme,
                    ) {
                        self.select_year(year);
                    }
                    ui.add_space(12.0);
                    render_legend(ui, &self.active_theme);
                });

                if self.store.is_showing_samples() {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new("Showing sample moods until you record your own.")
                            .italics()
                            .size(11.0)
                            .color(self.active_theme.text_secondary),
                    );
                }
                ui.add_space(12.0);

                let response = egui::Frame::none()
                    .fill(self.active_theme.grid_background)
                    .rounding(24.0)
                    .inner_margin(egui::Margin::same(20.0))
                    .show(ui, |ui| {
                        egui::ScrollArea::horizontal()
                            .show(ui, |ui| self.heatmap_view().show(ui))
                            .inner
                    })
                    .inner;

                self.handle_grid_response(ctx, response);
            });
    }

    fn cell_animation(&self) -> CellAnimation {
        let last_wave = wave_delay_ms(self.grid.column_count(), 0);
        if self.settings.reveal_animation && self.reveal.is_animating(last_wave) {
            CellAnimation::Running {
                elapsed_ms: self.reveal.elapsed_ms(),
                fade_ms: CELL_FADE_MS as f32,
            }
        } else {
            CellAnimation::Static
        }
    }

    fn heatmap_view(&self) -> HeatmapView<'_> {
        HeatmapView {
            grid: &self.grid,
            palette: HeatmapPalette::from_theme(&self.active_theme),
            animation: self.cell_animation(),
            hovered: self.interaction.hovered_date(),
            show_diary_markers: self.settings.show_diary_markers,
        }
    }

    fn handle_grid_response(&mut self, ctx: &Context, response: HeatmapResponse) {
        if matches!(self.cell_animation(), CellAnimation::Running { .. }) {
            ctx.request_repaint();
        }

        let pointer = response.pointer.or_else(|| ctx.pointer_hover_pos());
        let over_tooltip = match (pointer, self.state.tooltip_rect) {
            (Some(pointer), Some(rect)) => rect.contains(pointer),
            _ => false,
        };

        match response.hover {
            GridHover::Slot(date) => {
                self.interaction.pointer_entered(date);
                self.state.pointer_on_tooltip = false;
                if let Some(pointer) = response.pointer {
                    if self.tooltip.schedule(ScreenPoint::new(pointer.x, pointer.y)) {
                        ctx.request_repaint();
                    }
                }
            }
            GridHover::Outside if self.state.pointer_on_tooltip => {
                if !over_tooltip {
                    self.interaction.tooltip_left(false);
                    self.state.pointer_on_tooltip = false;
                }
            }
            GridHover::Outside => {
                self.interaction.pointer_left(over_tooltip);
                self.state.pointer_on_tooltip =
                    over_tooltip && self.interaction.hovered_date().is_some();
            }
        }

        if let Some(date) = response.clicked {
            self.interaction.click(date, &self.store);
            self.tooltip.cancel();
        }
    }

    pub(super) fn render_tooltip(&mut self, ctx: &Context) {
        let Some(date) = self.interaction.hovered_date() else {
            self.state.tooltip_rect = None;
            return;
        };

        self.tooltip.take_frame_update();
        let Some(position) = self.tooltip.position() else {
            return;
        };

        let content = TooltipContent::for_date(date, &self.store, &self.diary_links);
        let rect = render_tooltip_overlay(
            ctx,
            egui::pos2(position.x, position.y),
            &content,
            &self.active_theme,
        );
        self.state.tooltip_rect = Some(rect);
    }

    pub(super) fn handle_dialogs(&mut self, ctx: &Context) {
        let diary = self
            .interaction
            .draft()
            .and_then(|draft| self.diary_links.get(&draft.date))
            .cloned();

        match render_mood_dialog(ctx, &mut self.interaction, diary.as_ref(), &self.active_theme) {
            MoodDialogAction::None => {}
            MoodDialogAction::Save => self.commit_draft(),
            MoodDialogAction::Cancel => self.interaction.cancel(),
            MoodDialogAction::OpenDiary(link) => {
                let url = link.absolute_url(&self.context.config().site_base_url);
                if let Err(err) = webbrowser::open(&url) {
                    log::error!("Failed to open {}: {}", url, err);
                    self.toast_manager.error("Could not open the diary post");
                }
            }
        }

        if self.state.show_diary_dialog {
            let action = render_diary_dialog(
                ctx,
                &mut self.state.diary_dialog_state,
                &mut self.state.show_diary_dialog,
            );
            match action {
                DiaryDialogAction::None => {}
                DiaryDialogAction::Close => self.state.show_diary_dialog = false,
                DiaryDialogAction::Create { title, content } => {
                    self.publish_diary_post(&title, &content)
                }
            }
        }

        self.render_about_dialog(ctx);
    }

    /// Applies the open draft to the store immediately, then hands the
    /// merged entry to the background writer.
    fn commit_draft(&mut self) {
        let Some((date, patch)) = self.interaction.save() else {
            return;
        };

        let replaces_samples = self.store.is_showing_samples();
        let entry = self.store.upsert(date, &patch);
        log::info!("Saved {} ({}) for {}", entry.mood, entry.intensity.get(), date);
        self.bridge.dispatch(entry);

        if replaces_samples {
            self.refresh_year_options();
            self.restart_reveal();
        } else {
            self.rebuild_grid();
        }
    }

    fn publish_diary_post(&mut self, title: &str, content: &str) {
        let created = self.context.diary_service().create(title, content);
        match created {
            Ok(post) => {
                log::info!("Published diary post {:?}", post.id);
                self.state.show_diary_dialog = false;
                self.state.diary_dialog_state.reset();
                match self.context.diary_service().diary_links() {
                    Ok(links) => self.diary_links = links,
                    Err(e) => log::error!("Failed to refresh diary links: {:#}", e),
                }
                self.refresh_year_options();
                self.rebuild_grid();
                self.toast_manager.success("Diary post published");
            }
            Err(e) => {
                log::warn!("Failed to publish diary post: {:#}", e);
                self.state.diary_dialog_state.error = Some(format!("{:#}", e));
            }
        }
    }

    fn select_year(&mut self, year: i32) {
        if year == self.year.selected {
            return;
        }
        self.year.selected = year;
        if !self.interaction.is_editing() {
            self.interaction = Interaction::new();
        }
        self.tooltip.cancel();
        self.restart_reveal();
    }
}
