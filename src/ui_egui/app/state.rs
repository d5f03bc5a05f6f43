use std::time::{Duration, Instant};

use crate::heatmap::RevealSchedule;
use crate::ui_egui::diary_dialog::DiaryDialogState;

/// How long a single cell takes to fade in once its delay has passed.
pub const CELL_FADE_MS: u32 = 320;

pub struct YearState {
    pub selected: i32,
    pub options: Vec<i32>,
}

/// Timing of the entry animation for the year on screen.
pub struct RevealState {
    pub session_seed: u64,
    pub schedule: RevealSchedule,
    pub started_at: Instant,
}

impl RevealState {
    pub fn new(session_seed: u64) -> Self {
        Self {
            session_seed,
            schedule: RevealSchedule::default(),
            started_at: Instant::now(),
        }
    }

    pub fn restart(&mut self, schedule: RevealSchedule) {
        self.schedule = schedule;
        self.started_at = Instant::now();
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.started_at.elapsed().as_secs_f32() * 1000.0
    }

    /// Whether anything is still fading in, given the longest wave delay.
    pub fn is_animating(&self, max_wave_delay_ms: u32) -> bool {
        let last = self.schedule.max_delay().max(max_wave_delay_ms) + CELL_FADE_MS;
        self.started_at.elapsed() < Duration::from_millis(u64::from(last))
    }
}

pub struct AppState {
    pub show_diary_dialog: bool,
    pub diary_dialog_state: DiaryDialogState,
    pub show_about_dialog: bool,
    /// Screen rect of the tooltip overlay in the previous frame
    pub tooltip_rect: Option<egui::Rect>,
    /// Pointer moved from a cell onto the tooltip and is still there
    pub pointer_on_tooltip: bool,
    pub pending_theme_apply: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            show_diary_dialog: false,
            diary_dialog_state: DiaryDialogState::default(),
            show_about_dialog: false,
            tooltip_rect: None,
            pointer_on_tooltip: false,
            pending_theme_apply: false,
        }
    }
}
