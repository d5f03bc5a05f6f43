use super::context::AppContext;
use super::state::{AppState, RevealState, YearState};
use super::toast::ToastManager;
use super::MoodCalendarApp;
use crate::config::AppConfig;
use crate::heatmap::layout::{resolve_year, year_options};
use crate::heatmap::{GridOptions, HeatmapGrid, Interaction, RevealSchedule, TooltipScheduler};
use crate::models::settings::Settings;
use crate::services::database::Database;
use crate::services::mood::{sample_seeds, MoodStore, PersistOutcome, PersistenceBridge};
use crate::services::settings::SettingsService;
use crate::ui_egui::theme::HeatmapTheme;
use crate::utils::date::today;
use anyhow::{Context, Result};
use chrono::Datelike;
use std::collections::BTreeMap;
use std::time::Duration;

/// How long shutdown waits for in-flight mood writes.
const EXIT_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);
/// How long a manual reload waits before treating the database as authoritative.
const RELOAD_FLUSH_TIMEOUT: Duration = Duration::from_millis(500);

impl MoodCalendarApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let database = initialize_database(&config)?;

        let settings = load_settings_or_default(&SettingsService::new(&database));
        log::info!(
            "Loaded settings: theme={}, selected_year={:?}",
            settings.theme,
            settings.selected_year
        );

        let bridge = PersistenceBridge::for_database(&database);
        let active_theme = HeatmapTheme::for_settings(&settings);
        let current_year = today().year();
        let preferred_year = settings.selected_year.unwrap_or(current_year);

        let mut app = Self {
            context: AppContext::new(database, config),
            settings,
            active_theme,
            store: MoodStore::new(),
            diary_links: BTreeMap::new(),
            bridge,
            interaction: Interaction::new(),
            tooltip: TooltipScheduler::new(),
            year: YearState {
                selected: preferred_year,
                options: vec![current_year, current_year + 1],
            },
            reveal: RevealState::new(rand::random()),
            grid: HeatmapGrid::build(
                preferred_year,
                &MoodStore::new(),
                &BTreeMap::new(),
                &RevealSchedule::default(),
                &GridOptions::default(),
            ),
            state: AppState::new(),
            toast_manager: ToastManager::new(),
        };

        app.load_from_database();
        app.active_theme.apply_to_context(&cc.egui_ctx);
        Ok(app)
    }

    /// Seeds the store from the database (or demo data) and rebuilds
    /// everything derived from it.
    pub(super) fn load_from_database(&mut self) {
        self.diary_links = match self.context.diary_service().diary_links() {
            Ok(links) => links,
            Err(e) => {
                log::error!("Failed to load diary links: {:#}", e);
                self.toast_manager.error("Could not load diary posts");
                BTreeMap::new()
            }
        };

        let entries = match self.context.mood_service().list_all() {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Failed to load mood entries: {:#}", e);
                self.toast_manager.error("Could not load mood entries");
                Vec::new()
            }
        };

        if entries.is_empty() && self.context.config().seed_demo_data {
            log::info!("No mood entries recorded yet, showing sample data");
            self.store
                .replace_with_samples(sample_seeds(&self.diary_links, today()));
        } else {
            log::info!("Loaded {} mood entries", entries.len());
            self.store.replace(entries);
        }

        self.refresh_year_options();
        self.restart_reveal();
    }

    /// Discards the in-memory store and reloads it from the database.
    /// Late results from writes dispatched before the reload are ignored.
    pub(super) fn reload_from_database(&mut self) {
        let outcomes = self.bridge.wait_idle(RELOAD_FLUSH_TIMEOUT);
        self.report_outcomes(outcomes);
        self.bridge.invalidate();

        self.interaction = Interaction::new();
        self.tooltip.cancel();
        self.load_from_database();
        self.toast_manager.info("Reloaded from database");
    }

    pub(super) fn refresh_year_options(&mut self) {
        let diary_years: Vec<i32> = self.diary_links.keys().map(|d| d.year()).collect();
        self.year.options = year_options(self.store.years(), diary_years, today().year());
        self.year.selected = resolve_year(&self.year.options, self.year.selected);
    }

    /// Recomputes the reveal order for the selected year and starts the
    /// animation over.
    pub(super) fn restart_reveal(&mut self) {
        let schedule = RevealSchedule::compute(
            self.reveal.session_seed,
            self.store.dates_in_year(self.year.selected),
            self.context.config().reveal_window_ms,
        );
        self.reveal.restart(schedule);
        self.rebuild_grid();
    }

    pub(super) fn rebuild_grid(&mut self) {
        let options = GridOptions {
            jitter_amplitude: self.context.config().jitter_amplitude,
        };
        self.grid = HeatmapGrid::build(
            self.year.selected,
            &self.store,
            &self.diary_links,
            &self.reveal.schedule,
            &options,
        );
    }

    pub(super) fn report_outcomes(&mut self, outcomes: Vec<PersistOutcome>) {
        for outcome in outcomes {
            match outcome {
                PersistOutcome::Saved { date } => {
                    log::debug!("Mood entry for {} saved", date);
                }
                PersistOutcome::Failed { date, error } => {
                    log::warn!("Showing save failure for {}: {}", date, error);
                    self.toast_manager.error(format!(
                        "Mood for {} was not saved. It will be lost on reload.",
                        date.format("%b %-d, %Y")
                    ));
                }
            }
        }
    }

    pub(super) fn apply_theme(&mut self, ctx: &egui::Context) {
        self.active_theme = HeatmapTheme::for_settings(&self.settings);
        self.active_theme.apply_to_context(ctx);
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.pending_theme_apply {
            self.apply_theme(ctx);
            self.state.pending_theme_apply = false;
        }

        let outcomes = self.bridge.poll();
        self.report_outcomes(outcomes);
        if self.bridge.in_flight() > 0 {
            // Keep polling until the background writes report back
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.render_menu_bar(ctx);
        self.render_main_panel(ctx);
        self.render_tooltip(ctx);
        self.handle_dialogs(ctx);

        // Render toast notifications (last, so they appear on top)
        let is_dark = self.active_theme.is_dark;
        self.toast_manager.render(ctx, is_dark);
    }

    pub(super) fn handle_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.tooltip.cancel();

        let pending = self.bridge.in_flight();
        if pending > 0 {
            log::info!("Waiting for {} mood write(s) before exit", pending);
        }
        for outcome in self.bridge.wait_idle(EXIT_FLUSH_TIMEOUT) {
            if let PersistOutcome::Failed { date, error } = outcome {
                log::error!("Mood entry for {} lost on exit: {}", date, error);
            }
        }
        self.bridge.invalidate();

        if let Err(e) = self
            .context
            .settings_service()
            .update_selected_year(self.year.selected)
        {
            log::warn!("Failed to remember selected year: {:#}", e);
        }
    }
}

fn initialize_database(config: &AppConfig) -> Result<Database> {
    let db_path = config.resolve_database_path();
    let db_path = db_path.to_string_lossy();

    let db = Database::new(&db_path)?;
    db.initialize_schema()
        .context("Failed to initialize database schema")?;
    log::info!("Using database at {}", db_path);
    Ok(db)
}

fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {}, using defaults", e);
            Settings::default()
        }
    }
}
