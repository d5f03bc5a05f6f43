// Test fixtures - reusable test data
// Provides consistent databases and entries across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use mood_calendar::models::mood::{Intensity, Mood, MoodEntry};
use mood_calendar::services::database::Database;
use tempfile::TempDir;

/// A schema-initialised database in its own temporary directory.
/// The directory is removed when the fixture is dropped.
pub struct TestDatabase {
    pub db: Database,
    pub dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Self::open_in(&dir);
        Self { db, dir }
    }

    /// A second connection to the same file, as a restarted app would open.
    pub fn reopen(&self) -> Database {
        Self::open_in(&self.dir)
    }

    pub fn path(&self) -> String {
        self.db.path().to_string()
    }

    fn open_in(dir: &TempDir) -> Database {
        let path = dir.path().join("mood_calendar.db");
        let db = Database::new(path.to_str().expect("temp path is UTF-8"))
            .expect("Failed to create database");
        db.initialize_schema().expect("Failed to initialize schema");
        db
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Sample entries for testing
pub mod entries {
    use super::*;

    pub fn rainy_tuesday() -> MoodEntry {
        MoodEntry::new(date(2024, 3, 5), Mood::Sadness, Intensity::MEDIUM).with_note("rain all day")
    }

    pub fn good_run() -> MoodEntry {
        MoodEntry::new(date(2024, 3, 9), Mood::Joy, Intensity::HIGH).with_note("10k personal best")
    }

    pub fn long_week() -> MoodEntry {
        MoodEntry::new(date(2024, 11, 29), Mood::Fatigue, Intensity::LOW)
    }
}
