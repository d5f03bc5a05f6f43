//! Hover and edit state for the heatmap.
//!
//! One `Interaction` value is owned by the UI. It never touches the mood
//! store directly: `save` hands back the patch and the caller applies it,
//! so a cancelled edit cannot leave anything behind.

use chrono::NaiveDate;

use crate::models::mood::{Intensity, Mood, MoodEntry, MoodPatch};
use crate::services::mood::MoodStore;

/// Unsaved copy of an entry while the edit dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodDraft {
    pub date: NaiveDate,
    pub mood: Mood,
    pub intensity: Intensity,
    pub note: String,
}

impl MoodDraft {
    /// joy / 2 / empty note
    pub fn fresh(date: NaiveDate) -> Self {
        Self::from_entry(&MoodEntry::default_for(date))
    }

    pub fn from_entry(entry: &MoodEntry) -> Self {
        Self {
            date: entry.date,
            mood: entry.mood,
            intensity: entry.intensity,
            note: entry.note.clone(),
        }
    }

    pub fn to_patch(&self) -> MoodPatch {
        MoodPatch::mood(self.mood)
            .with_intensity(self.intensity)
            .with_note(self.note.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Hovering {
        date: NaiveDate,
    },
    Editing {
        draft: MoodDraft,
    },
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved onto a grid slot. Padding slots (`None`) hide the tooltip.
    pub fn pointer_entered(&mut self, date: Option<NaiveDate>) {
        if self.is_editing() {
            return;
        }
        *self = match date {
            Some(date) => Self::Hovering { date },
            None => Self::Idle,
        };
    }

    /// Pointer left the hovered cell. Moving onto the tooltip keeps it open.
    pub fn pointer_left(&mut self, into_tooltip: bool) {
        if matches!(self, Self::Hovering { .. }) && !into_tooltip {
            *self = Self::Idle;
        }
    }

    /// Pointer left the tooltip. Moving back onto the grid keeps it open.
    pub fn tooltip_left(&mut self, into_grid: bool) {
        if matches!(self, Self::Hovering { .. }) && !into_grid {
            *self = Self::Idle;
        }
    }

    /// Opens the editor for `date`. Any draft already open is dropped.
    pub fn click(&mut self, date: NaiveDate, store: &MoodStore) {
        let draft = store
            .get(date)
            .map(MoodDraft::from_entry)
            .unwrap_or_else(|| MoodDraft::fresh(date));
        *self = Self::Editing { draft };
    }

    pub fn select_mood(&mut self, mood: Mood) {
        if let Some(draft) = self.draft_mut() {
            draft.mood = mood;
        }
    }

    pub fn select_intensity(&mut self, intensity: Intensity) {
        if let Some(draft) = self.draft_mut() {
            draft.intensity = intensity;
        }
    }

    pub fn edit_note(&mut self, note: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.note = note.into();
        }
    }

    /// Mutable access to the note buffer for text widgets.
    pub fn note_mut(&mut self) -> Option<&mut String> {
        self.draft_mut().map(|draft| &mut draft.note)
    }

    /// Closes the editor and returns the patch to commit.
    pub fn save(&mut self) -> Option<(NaiveDate, MoodPatch)> {
        match std::mem::take(self) {
            Self::Editing { draft } => Some((draft.date, draft.to_patch())),
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.is_editing() {
            *self = Self::Idle;
        }
    }

    pub fn hovered_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Hovering { date } => Some(*date),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&MoodDraft> {
        match self {
            Self::Editing { draft } => Some(draft),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    fn draft_mut(&mut self) -> Option<&mut MoodDraft> {
        match self {
            Self::Editing { draft } => Some(draft),
            _ => None,
        }
    }
}
