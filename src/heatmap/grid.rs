//! Per-cell view data for one year of the heatmap.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::hash::{jitter_for, Jitter, DEFAULT_JITTER_AMPLITUDE};
use super::layout::{build_week_columns, wave_delay_ms, DAYS_PER_WEEK};
use super::reveal::RevealSchedule;
use crate::models::diary::DiaryLink;
use crate::models::mood::{Intensity, Mood};
use crate::services::mood::MoodStore;
use crate::utils::date::date_key;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub jitter_amplitude: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            jitter_amplitude: DEFAULT_JITTER_AMPLITUDE,
        }
    }
}

/// Everything a renderer needs to draw one slot of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub date: Option<NaiveDate>,
    pub column: usize,
    pub row: usize,
    pub mood: Option<(Mood, Intensity)>,
    pub has_note: bool,
    pub linked: bool,
    /// Paint offset only. Hit testing uses the unjittered slot.
    pub jitter: Jitter,
    pub wave_delay_ms: u32,
    pub reveal_delay_ms: Option<u32>,
}

impl CellView {
    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }

    pub fn is_populated(&self) -> bool {
        self.mood.is_some()
    }

    pub fn glows(&self) -> bool {
        matches!(self.mood, Some((_, intensity)) if intensity == Intensity::HIGH)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    year: i32,
    columns: usize,
    cells: Vec<CellView>,
}

impl HeatmapGrid {
    pub fn build(
        year: i32,
        store: &MoodStore,
        links: &BTreeMap<NaiveDate, DiaryLink>,
        reveal: &RevealSchedule,
        options: &GridOptions,
    ) -> Self {
        let weeks = build_week_columns(year);
        let mut cells = Vec::with_capacity(weeks.len() * DAYS_PER_WEEK);

        for (column, week) in weeks.iter().enumerate() {
            for (row, slot) in week.iter().enumerate() {
                let wave_delay_ms = wave_delay_ms(column, row);
                let Some(date) = *slot else {
                    cells.push(CellView {
                        date: None,
                        column,
                        row,
                        mood: None,
                        has_note: false,
                        linked: false,
                        jitter: Jitter::default(),
                        wave_delay_ms,
                        reveal_delay_ms: None,
                    });
                    continue;
                };

                let entry = store.get(date);
                cells.push(CellView {
                    date: Some(date),
                    column,
                    row,
                    mood: entry.map(|e| (e.mood, e.intensity)),
                    has_note: entry.is_some_and(|e| e.has_note()),
                    linked: links.contains_key(&date),
                    jitter: jitter_for(&date_key(date), options.jitter_amplitude),
                    wave_delay_ms,
                    reveal_delay_ms: entry.and_then(|_| reveal.delay_for(date)),
                });
            }
        }

        Self {
            year,
            columns: weeks.len(),
            cells,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Cells in column-major order, seven per column.
    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&CellView> {
        if row >= DAYS_PER_WEEK {
            return None;
        }
        self.cells.get(column * DAYS_PER_WEEK + row)
    }

    pub fn columns(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn find(&self, date: NaiveDate) -> Option<&CellView> {
        self.cells.iter().find(|cell| cell.date == Some(date))
    }

    pub fn populated_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_populated()).count()
    }
}
