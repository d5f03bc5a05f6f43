mod context;
mod heatmap;
mod lifecycle;
mod menu;
mod state;
mod toast;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use self::context::AppContext;
use self::state::{AppState, RevealState, YearState};
use self::toast::ToastManager;
use crate::heatmap::{HeatmapGrid, Interaction, TooltipScheduler};
use crate::models::diary::DiaryLink;
use crate::models::settings::Settings;
use crate::services::mood::{MoodStore, PersistenceBridge};
use crate::ui_egui::theme::HeatmapTheme;

pub struct MoodCalendarApp {
    /// Database handle and loaded configuration
    context: AppContext,
    settings: Settings,
    active_theme: HeatmapTheme,
    /// Mood entries for the session; the UI is the only writer
    store: MoodStore,
    diary_links: BTreeMap<NaiveDate, DiaryLink>,
    bridge: PersistenceBridge,
    interaction: Interaction,
    tooltip: TooltipScheduler,
    year: YearState,
    reveal: RevealState,
    /// Cached cell data for the selected year
    grid: HeatmapGrid,
    state: AppState,
    toast_manager: ToastManager,
}

impl eframe::App for MoodCalendarApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.handle_exit(gl);
    }
}
