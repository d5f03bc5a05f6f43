use chrono::{Datelike, NaiveDate};
use egui::{Align2, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::{glow_color, mood_color, HeatmapPalette};
use crate::heatmap::layout::DAYS_PER_WEEK;
use crate::heatmap::{CellView, HeatmapGrid};

pub const CELL_SIZE: f32 = 14.0;
pub const CELL_GAP: f32 = 3.0;
const CELL_PITCH: f32 = CELL_SIZE + CELL_GAP;
const WEEKDAY_GUTTER: f32 = 30.0;
const MONTH_GUTTER: f32 = 18.0;
const HOVER_SCALE: f32 = 1.35;
const GLOW_SPREAD: f32 = 3.0;

const WEEKDAY_LABELS: [(usize, &str); 3] = [(0, "Mon"), (2, "Wed"), (4, "Fri")];

/// Where the pointer is relative to the grid this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHover {
    Outside,
    /// Over a slot; `None` for padding days outside the year
    Slot(Option<NaiveDate>),
}

pub struct HeatmapResponse {
    pub hover: GridHover,
    pub pointer: Option<Pos2>,
    pub clicked: Option<NaiveDate>,
}

/// Fade-in progress source for the cells.
#[derive(Debug, Clone, Copy)]
pub enum CellAnimation {
    Static,
    Running { elapsed_ms: f32, fade_ms: f32 },
}

impl CellAnimation {
    fn progress(&self, delay_ms: u32) -> f32 {
        match *self {
            CellAnimation::Static => 1.0,
            CellAnimation::Running { elapsed_ms, fade_ms } => {
                let t = ((elapsed_ms - delay_ms as f32) / fade_ms).clamp(0.0, 1.0);
                // ease-out
                1.0 - (1.0 - t) * (1.0 - t)
            }
        }
    }
}

/// Slot under `offset`, measured from the top-left of the first cell.
/// Gaps belong to the cell before them so the hover does not flicker
/// between neighbours. Jitter is ignored on purpose.
pub fn slot_at(offset: Vec2, columns: usize) -> Option<(usize, usize)> {
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let column = (offset.x / CELL_PITCH) as usize;
    let row = (offset.y / CELL_PITCH) as usize;
    (column < columns && row < DAYS_PER_WEEK).then_some((column, row))
}

pub struct HeatmapView<'a> {
    pub grid: &'a HeatmapGrid,
    pub palette: HeatmapPalette,
    pub animation: CellAnimation,
    pub hovered: Option<NaiveDate>,
    pub show_diary_markers: bool,
}

impl<'a> HeatmapView<'a> {
    pub fn show(self, ui: &mut egui::Ui) -> HeatmapResponse {
        let columns = self.grid.column_count();
        let size = Vec2::new(
            WEEKDAY_GUTTER + columns as f32 * CELL_PITCH,
            MONTH_GUTTER + DAYS_PER_WEEK as f32 * CELL_PITCH,
        );
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let origin = rect.min + Vec2::new(WEEKDAY_GUTTER, MONTH_GUTTER);
        let painter = ui.painter_at(rect.expand(GLOW_SPREAD * 2.0));

        self.paint_labels(&painter, origin);
        for cell in self.grid.cells() {
            self.paint_cell(&painter, origin, cell);
        }

        let pointer = response.hover_pos();
        let slot = pointer.and_then(|pos| slot_at(pos - origin, columns));
        let hover = match slot {
            Some((column, row)) => {
                GridHover::Slot(self.grid.cell(column, row).and_then(|cell| cell.date))
            }
            None => GridHover::Outside,
        };

        let clicked = if response.clicked() {
            response
                .interact_pointer_pos()
                .and_then(|pos| slot_at(pos - origin, columns))
                .and_then(|(column, row)| self.grid.cell(column, row))
                .and_then(|cell| cell.date)
        } else {
            None
        };

        if matches!(hover, GridHover::Slot(Some(_))) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        HeatmapResponse {
            hover,
            pointer,
            clicked,
        }
    }

    fn paint_labels(&self, painter: &egui::Painter, origin: Pos2) {
        let font = FontId::proportional(10.0);

        for (row, label) in WEEKDAY_LABELS {
            let y = origin.y + row as f32 * CELL_PITCH + CELL_SIZE / 2.0;
            painter.text(
                Pos2::new(origin.x - 6.0, y),
                Align2::RIGHT_CENTER,
                label,
                font.clone(),
                self.palette.label,
            );
        }

        // A month is labelled on the column holding its first day
        for column in self.grid.columns() {
            let Some(first) = column
                .iter()
                .filter_map(|cell| cell.date)
                .find(|date| date.day() == 1)
            else {
                continue;
            };
            let x = origin.x + column[0].column as f32 * CELL_PITCH;
            painter.text(
                Pos2::new(x, origin.y - 4.0),
                Align2::LEFT_BOTTOM,
                first.format("%b").to_string(),
                font.clone(),
                self.palette.label,
            );
        }
    }

    fn paint_cell(&self, painter: &egui::Painter, origin: Pos2, cell: &CellView) {
        let Some(date) = cell.date else {
            return;
        };

        let slot = Rect::from_min_size(
            origin + Vec2::new(cell.column as f32 * CELL_PITCH, cell.row as f32 * CELL_PITCH),
            Vec2::splat(CELL_SIZE),
        );
        let center = slot.center() + Vec2::new(cell.jitter.x, cell.jitter.y);
        let hovered = self.hovered == Some(date);
        let mut radius = CELL_SIZE / 2.0;
        if hovered {
            radius *= HOVER_SCALE;
        }

        let wave = self.animation.progress(cell.wave_delay_ms);
        match cell.mood {
            Some((mood, intensity)) => {
                let reveal = self.animation.progress(cell.reveal_delay_ms.unwrap_or(0));
                let alpha = wave.min(reveal);
                if cell.glows() {
                    painter.circle_filled(
                        center,
                        radius + GLOW_SPREAD * alpha,
                        glow_color(mood).gamma_multiply(alpha),
                    );
                }
                painter.circle_filled(
                    center,
                    radius * (0.6 + 0.4 * reveal),
                    mood_color(mood, intensity).gamma_multiply(alpha),
                );
            }
            None => {
                painter.circle_filled(center, radius, self.palette.empty_day.gamma_multiply(wave));
            }
        }

        let border = if hovered {
            Stroke::new(1.5, self.palette.hover_border)
        } else {
            Stroke::new(0.5, self.palette.cell_border.gamma_multiply(wave))
        };
        painter.circle_stroke(center, radius, border);

        if cell.linked && self.show_diary_markers {
            painter.text(
                slot.right_bottom() + Vec2::new(2.0, 2.0),
                Align2::CENTER_CENTER,
                "↗",
                FontId::proportional(8.0),
                self.palette.marker.gamma_multiply(wave),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_lookup_ignores_gaps() {
        assert_eq!(slot_at(Vec2::new(1.0, 1.0), 53), Some((0, 0)));
        // Inside the gap after the first cell
        assert_eq!(slot_at(Vec2::new(CELL_SIZE + 1.0, 1.0), 53), Some((0, 0)));
        assert_eq!(
            slot_at(Vec2::new(CELL_PITCH * 2.0 + 1.0, CELL_PITCH * 6.0 + 1.0), 53),
            Some((2, 6))
        );
    }

    #[test]
    fn test_slot_lookup_outside_grid() {
        assert_eq!(slot_at(Vec2::new(-1.0, 4.0), 53), None);
        assert_eq!(slot_at(Vec2::new(4.0, CELL_PITCH * 7.0 + 1.0), 53), None);
        assert_eq!(slot_at(Vec2::new(CELL_PITCH * 53.0 + 1.0, 4.0), 53), None);
    }

    #[test]
    fn test_animation_progress() {
        let running = CellAnimation::Running {
            elapsed_ms: 100.0,
            fade_ms: 200.0,
        };
        assert_eq!(running.progress(500), 0.0);
        assert_eq!(running.progress(0), 0.75);
        assert_eq!(CellAnimation::Static.progress(10_000), 1.0);
    }
}
