//! Tooltip overlay positioning and content.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::diary::DiaryLink;
use crate::services::mood::MoodStore;

/// Gap between the pointer and the tooltip's top-left corner.
pub const POINTER_OFFSET: f32 = 12.0;

pub const EMPTY_DAY_PLACEHOLDER: &str = "No record yet. Click a day to add.";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Coalesces pointer movement into at most one tooltip move per frame.
///
/// `schedule` may be called for every pointer event; only the latest point
/// survives until the next `take_frame_update`.
#[derive(Debug, Clone, Default)]
pub struct TooltipScheduler {
    latest: Option<ScreenPoint>,
    pending: bool,
    position: Option<ScreenPoint>,
}

impl TooltipScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer position. Returns true when this call raised the
    /// pending flag, i.e. a repaint needs requesting.
    pub fn schedule(&mut self, pointer: ScreenPoint) -> bool {
        self.latest = Some(pointer);
        let first = !self.pending;
        self.pending = true;
        first
    }

    /// Applies the pending move, if any, and returns the new overlay position.
    pub fn take_frame_update(&mut self) -> Option<ScreenPoint> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        let pointer = self.latest.take()?;
        let placed = ScreenPoint::new(pointer.x + POINTER_OFFSET, pointer.y + POINTER_OFFSET);
        self.position = Some(placed);
        Some(placed)
    }

    /// Where the overlay currently sits.
    pub fn position(&self) -> Option<ScreenPoint> {
        self.position
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub mood_label: Option<String>,
    pub note: Option<String>,
    pub diary: Option<DiaryLink>,
    pub placeholder: Option<&'static str>,
}

impl TooltipContent {
    pub fn for_date(
        date: NaiveDate,
        store: &MoodStore,
        links: &BTreeMap<NaiveDate, DiaryLink>,
    ) -> Self {
        let entry = store.get(date);
        let diary = links.get(&date).cloned();

        let mood_label = entry.map(|e| {
            format!("{} {} · {}/3", e.mood.icon(), e.mood.label(), e.intensity.get())
        });
        let note = entry
            .filter(|e| e.has_note())
            .map(|e| e.note.trim().to_string());
        let placeholder = (entry.is_none() && diary.is_none()).then_some(EMPTY_DAY_PLACEHOLDER);

        Self {
            title: date.format("%A, %B %-d, %Y").to_string(),
            mood_label,
            note,
            diary,
            placeholder,
        }
    }
}
