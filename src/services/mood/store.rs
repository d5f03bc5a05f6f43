use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::models::mood::{MoodEntry, MoodPatch};

/// In-memory mood entries keyed by day.
///
/// The store is owned by whoever drives the UI for the current session and
/// is passed explicitly to the code that reads it. It is seeded once at
/// load (`from_entries`) and swapped out wholesale on reload (`replace`).
///
/// A store seeded with [`MoodStore::replace_with_samples`] holds display-only
/// demo entries. The first real [`MoodStore::upsert`] discards them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodStore {
    entries: BTreeMap<NaiveDate, MoodEntry>,
    samples: bool,
}

impl MoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted entries. A later entry for the same day
    /// replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = MoodEntry>) -> Self {
        let mut store = Self::new();
        store.replace(entries);
        store
    }

    /// Discards everything and reseeds from `entries`.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = MoodEntry>) {
        self.entries = entries
            .into_iter()
            .map(|entry| (entry.date, entry))
            .collect();
        self.samples = false;
    }

    /// Reseeds with demo entries that are shown but never persisted.
    pub fn replace_with_samples(&mut self, entries: impl IntoIterator<Item = MoodEntry>) {
        self.replace(entries);
        self.samples = true;
    }

    pub fn is_showing_samples(&self) -> bool {
        self.samples
    }

    /// Number of entries the user actually recorded. Demo entries count as none.
    pub fn recorded_len(&self) -> usize {
        if self.samples {
            0
        } else {
            self.entries.len()
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.entries.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Merges `patch` onto the day's entry (or a fresh joy/2/"" entry) and
    /// stores the result immediately. Returns the stored entry so the caller
    /// can hand the same payload to persistence.
    pub fn upsert(&mut self, date: NaiveDate, patch: &MoodPatch) -> MoodEntry {
        if self.samples {
            log::info!("First mood recorded, clearing {} sample entries", self.entries.len());
            self.entries.clear();
            self.samples = false;
        }

        let merged = match self.entries.get(&date) {
            Some(existing) => existing.merged(patch),
            None => MoodEntry::default_for(date).merged(patch),
        };
        self.entries.insert(date, merged.clone());
        merged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = &MoodEntry> {
        self.entries.values()
    }

    /// Days of `year` that have an entry, ascending.
    pub fn dates_in_year(&self, year: i32) -> Vec<NaiveDate> {
        let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return Vec::new();
        };
        self.entries.range(start..=end).map(|(date, _)| *date).collect()
    }

    /// Every year that has at least one entry.
    pub fn years(&self) -> BTreeSet<i32> {
        self.entries.keys().map(|date| date.year()).collect()
    }
}
