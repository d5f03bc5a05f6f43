//! Mood entry model.
//!
//! A mood entry records how a single calendar day felt: one of five mood
//! categories, an intensity from 1 to 3 and an optional free-text note.
//! The date is the natural key; there is at most one entry per day.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::parse_date_key;

/// The five tracked mood categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Joy,
    Anger,
    Calm,
    Fatigue,
    Sadness,
}

impl Mood {
    /// All moods in legend/palette order.
    pub const ALL: [Mood; 5] = [
        Mood::Joy,
        Mood::Calm,
        Mood::Sadness,
        Mood::Anger,
        Mood::Fatigue,
    ];

    /// Lowercase name used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Joy => "joy",
            Mood::Anger => "anger",
            Mood::Calm => "calm",
            Mood::Fatigue => "fatigue",
            Mood::Sadness => "sadness",
        }
    }

    /// Short label shown in the legend and tooltip.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Joy => "Joy",
            Mood::Anger => "Anger",
            Mood::Calm => "Calm",
            Mood::Fatigue => "Fatigue",
            Mood::Sadness => "Sad",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Mood::Joy => "✿",
            Mood::Calm => "❦",
            Mood::Fatigue => "◆",
            Mood::Anger => "ϟ",
            Mood::Sadness => "💧",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = MoodValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "joy" => Ok(Mood::Joy),
            "anger" => Ok(Mood::Anger),
            "calm" => Ok(Mood::Calm),
            "fatigue" => Ok(Mood::Fatigue),
            "sadness" => Ok(Mood::Sadness),
            _ => Err(MoodValidationError::UnknownMood(s.to_string())),
        }
    }
}

/// How strongly a mood was felt, always within 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub const LOW: Intensity = Intensity(1);
    pub const MEDIUM: Intensity = Intensity(2);
    pub const HIGH: Intensity = Intensity(3);

    pub const ALL: [Intensity; 3] = [Self::LOW, Self::MEDIUM, Self::HIGH];

    /// Strict constructor used at the write boundary.
    pub fn new(level: i64) -> Result<Self, MoodValidationError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(MoodValidationError::IntensityOutOfRange(level))
        }
    }

    /// Lenient constructor for values read back from storage.
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl TryFrom<u8> for Intensity {
    type Error = MoodValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

/// A persisted mood record for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: Mood,
    pub intensity: Intensity,
    #[serde(default)]
    pub note: String,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, mood: Mood, intensity: Intensity) -> Self {
        Self {
            date,
            mood,
            intensity,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Entry created when a day is saved for the first time without a full payload.
    pub fn default_for(date: NaiveDate) -> Self {
        Self::new(date, Mood::default(), Intensity::default())
    }

    /// Returns a copy with every field present in `patch` overwritten.
    pub fn merged(&self, patch: &MoodPatch) -> Self {
        Self {
            date: self.date,
            mood: patch.mood.unwrap_or(self.mood),
            intensity: patch.intensity.unwrap_or(self.intensity),
            note: patch.note.clone().unwrap_or_else(|| self.note.clone()),
        }
    }

    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }
}

/// Partial update applied on top of an existing (or default) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodPatch {
    pub mood: Option<Mood>,
    pub intensity: Option<Intensity>,
    pub note: Option<String>,
}

impl MoodPatch {
    pub fn mood(mood: Mood) -> Self {
        Self {
            mood: Some(mood),
            ..Self::default()
        }
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// A patch that rewrites every field of an entry.
    pub fn full(entry: &MoodEntry) -> Self {
        Self {
            mood: Some(entry.mood),
            intensity: Some(entry.intensity),
            note: Some(entry.note.clone()),
        }
    }
}

/// Raw, unchecked write request as it arrives from a form or import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSubmission {
    pub date: Option<String>,
    pub mood: Option<String>,
    pub intensity: Option<i64>,
    pub note: Option<String>,
}

impl MoodSubmission {
    /// Checks every required field and produces a storable entry.
    pub fn validate(&self) -> Result<MoodEntry, MoodValidationError> {
        let raw_date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(MoodValidationError::MissingDate)?;
        let date = parse_date_key(raw_date)
            .ok_or_else(|| MoodValidationError::InvalidDate(raw_date.to_string()))?;

        let mood = self
            .mood
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or(MoodValidationError::MissingMood)?
            .parse::<Mood>()?;

        let intensity = Intensity::new(self.intensity.ok_or(MoodValidationError::MissingIntensity)?)?;

        Ok(MoodEntry {
            date,
            mood,
            intensity,
            note: self.note.clone().unwrap_or_default(),
        })
    }
}

/// Reasons a mood write is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodValidationError {
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date '{0}' (expected yyyy-mm-dd)")]
    InvalidDate(String),
    #[error("Mood is required")]
    MissingMood,
    #[error("Unknown mood '{0}' (expected joy, anger, calm, fatigue or sadness)")]
    UnknownMood(String),
    #[error("Intensity is required")]
    MissingIntensity,
    #[error("Intensity must be 1, 2 or 3 (got {0})")]
    IntensityOutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submission(date: &str, mood: &str, intensity: i64) -> MoodSubmission {
        MoodSubmission {
            date: Some(date.to_string()),
            mood: Some(mood.to_string()),
            intensity: Some(intensity),
            note: None,
        }
    }

    #[test_case("joy", Mood::Joy)]
    #[test_case("anger", Mood::Anger)]
    #[test_case("calm", Mood::Calm)]
    #[test_case("fatigue", Mood::Fatigue)]
    #[test_case("sadness", Mood::Sadness)]
    #[test_case(" Calm ", Mood::Calm)]
    fn test_mood_from_str(input: &str, expected: Mood) {
        assert_eq!(input.parse::<Mood>(), Ok(expected));
    }

    #[test]
    fn test_unknown_mood_rejected() {
        assert_eq!(
            "elated".parse::<Mood>(),
            Err(MoodValidationError::UnknownMood("elated".to_string()))
        );
    }

    #[test]
    fn test_mood_labels() {
        assert_eq!(Mood::Sadness.label(), "Sad");
        assert_eq!(Mood::Joy.label(), "Joy");
        assert_eq!(Mood::ALL.len(), 5);
    }

    #[test]
    fn test_default_mood_is_joy() {
        assert_eq!(Mood::default(), Mood::Joy);
    }

    #[test]
    fn test_intensity_strict_range() {
        assert!(Intensity::new(0).is_err());
        assert_eq!(Intensity::new(1), Ok(Intensity::LOW));
        assert_eq!(Intensity::new(3), Ok(Intensity::HIGH));
        assert_eq!(
            Intensity::new(4),
            Err(MoodValidationError::IntensityOutOfRange(4))
        );
    }

    #[test_case(-5, 1)]
    #[test_case(0, 1)]
    #[test_case(2, 2)]
    #[test_case(7, 3)]
    fn test_intensity_clamped(raw: i64, expected: u8) {
        assert_eq!(Intensity::clamped(raw).get(), expected);
    }

    #[test]
    fn test_merged_overwrites_only_present_fields() {
        let entry = MoodEntry::new(date(2024, 3, 5), Mood::Calm, Intensity::HIGH).with_note("tea");
        let merged = entry.merged(&MoodPatch::mood(Mood::Fatigue));
        assert_eq!(merged.mood, Mood::Fatigue);
        assert_eq!(merged.intensity, Intensity::HIGH);
        assert_eq!(merged.note, "tea");

        let cleared = entry.merged(&MoodPatch::default().with_note(""));
        assert_eq!(cleared.note, "");
        assert_eq!(cleared.mood, Mood::Calm);
    }

    #[test]
    fn test_default_for_date() {
        let entry = MoodEntry::default_for(date(2024, 1, 1));
        assert_eq!(entry.mood, Mood::Joy);
        assert_eq!(entry.intensity, Intensity::MEDIUM);
        assert!(entry.note.is_empty());
    }

    #[test]
    fn test_validate_complete_submission() {
        let mut sub = submission("2024-03-05", "sadness", 2);
        sub.note = Some("rainy".to_string());
        let entry = sub.validate().unwrap();
        assert_eq!(entry.date, date(2024, 3, 5));
        assert_eq!(entry.mood, Mood::Sadness);
        assert_eq!(entry.intensity, Intensity::MEDIUM);
        assert_eq!(entry.note, "rainy");
    }

    #[test]
    fn test_validate_missing_fields() {
        let mut sub = submission("2024-03-05", "joy", 2);
        sub.date = None;
        assert_eq!(sub.validate(), Err(MoodValidationError::MissingDate));

        assert_eq!(
            submission("  ", "joy", 2).validate(),
            Err(MoodValidationError::MissingDate)
        );

        let mut sub = submission("2024-03-05", "joy", 2);
        sub.mood = None;
        assert_eq!(sub.validate(), Err(MoodValidationError::MissingMood));

        let mut sub = submission("2024-03-05", "joy", 2);
        sub.intensity = None;
        assert_eq!(sub.validate(), Err(MoodValidationError::MissingIntensity));
    }

    #[test]
    fn test_validate_out_of_range_values() {
        assert_eq!(
            submission("2024-13-01", "joy", 2).validate(),
            Err(MoodValidationError::InvalidDate("2024-13-01".to_string()))
        );
        assert_eq!(
            submission("2024-03-05", "joy", 5).validate(),
            Err(MoodValidationError::IntensityOutOfRange(5))
        );
        assert!(matches!(
            submission("2024-03-05", "bliss", 2).validate(),
            Err(MoodValidationError::UnknownMood(_))
        ));
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = MoodEntry::new(date(2024, 3, 5), Mood::Sadness, Intensity::MEDIUM);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["mood"], "sadness");
        assert_eq!(json["intensity"], 2);
        assert_eq!(json["note"], "");
    }

    #[test]
    fn test_entry_json_rejects_bad_intensity() {
        let result: Result<MoodEntry, _> = serde_json::from_str(
            r#"{"date":"2024-03-05","mood":"joy","intensity":9}"#,
        );
        assert!(result.is_err());
    }
}
