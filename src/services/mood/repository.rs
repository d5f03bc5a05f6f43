use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::mood::{Intensity, Mood, MoodEntry, MoodSubmission};
use crate::utils::date::{date_key, parse_date_key};

/// Row as stored, before any normalisation.
struct RawMoodRow {
    date: String,
    mood: String,
    intensity: Value,
    note: Option<String>,
}

/// Repository for mood entries.
pub struct MoodService<'a> {
    conn: &'a Connection,
}

impl<'a> MoodService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All stored entries, newest day first.
    ///
    /// Rows with an out-of-range intensity are clamped into 1..=3. Rows whose
    /// date or mood cannot be understood are skipped.
    pub fn list_all(&self) -> Result<Vec<MoodEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, mood, intensity, note FROM mood_entries ORDER BY date DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(RawMoodRow {
                date: row.get(0)?,
                mood: row.get(1)?,
                intensity: row.get(2)?,
                note: row.get(3)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let row = row.context("Failed to read mood entry row")?;
            if let Some(entry) = normalize_row(row) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    /// Get the entry for a single day.
    pub fn get(&self, date: NaiveDate) -> Result<Option<MoodEntry>> {
        let row = self
            .conn
            .query_row(
                "SELECT date, mood, intensity, note FROM mood_entries WHERE date = ?1",
                params![date_key(date)],
                |row| {
                    Ok(RawMoodRow {
                        date: row.get(0)?,
                        mood: row.get(1)?,
                        intensity: row.get(2)?,
                        note: row.get(3)?,
                    })
                },
            )
            .optional()
            .context("Failed to load mood entry")?;

        Ok(row.and_then(normalize_row))
    }

    /// Insert the entry, or overwrite mood/intensity/note if the day already has one.
    pub fn upsert(&self, entry: &MoodEntry) -> Result<()> {
        let key = date_key(entry.date);
        self.conn
            .execute(
                "INSERT INTO mood_entries (id, date, mood, intensity, note, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))
                 ON CONFLICT(date) DO UPDATE SET
                    mood = excluded.mood,
                    intensity = excluded.intensity,
                    note = excluded.note",
                params![
                    key,
                    key,
                    entry.mood.as_str(),
                    entry.intensity.get(),
                    entry.note,
                ],
            )
            .with_context(|| format!("Failed to save mood entry for {}", key))?;

        Ok(())
    }

    /// Validates a raw submission and stores it.
    pub fn submit(&self, submission: &MoodSubmission) -> Result<MoodEntry> {
        let entry = submission.validate()?;
        self.upsert(&entry)?;
        Ok(entry)
    }

    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM mood_entries", [], |row| row.get(0))
            .context("Failed to count mood entries")
    }

    /// Serialises every entry as a JSON array, oldest day first.
    pub fn export_json(&self) -> Result<String> {
        let mut entries = self.list_all()?;
        entries.reverse();
        serde_json::to_string_pretty(&entries).context("Failed to serialise mood entries")
    }
}

fn normalize_row(row: RawMoodRow) -> Option<MoodEntry> {
    let Some(date) = parse_date_key(&row.date) else {
        log::warn!("Skipping mood entry with non-canonical date '{}'", row.date);
        return None;
    };

    let mood = match row.mood.parse::<Mood>() {
        Ok(mood) => mood,
        Err(err) => {
            log::warn!("Skipping mood entry for {}: {}", row.date, err);
            return None;
        }
    };

    let raw_intensity = match row.intensity {
        Value::Integer(level) => level,
        Value::Real(level) => level.round() as i64,
        Value::Text(ref text) => text.trim().parse::<f64>().map(|l| l.round() as i64).unwrap_or(0),
        Value::Null | Value::Blob(_) => 0,
    };
    let intensity = Intensity::clamped(raw_intensity);
    if i64::from(intensity.get()) != raw_intensity {
        log::warn!(
            "Clamped intensity {} to {} for mood entry {}",
            raw_intensity,
            intensity.get(),
            row.date
        );
    }

    Some(MoodEntry {
        date,
        mood,
        intensity,
        note: row.note.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn insert_raw(db: &Database, date: &str, mood: &str, intensity: &dyn rusqlite::ToSql) {
        db.connection()
            .execute(
                "INSERT INTO mood_entries (id, date, mood, intensity) VALUES (?1, ?1, ?2, ?3)",
                params![date, mood, intensity],
            )
            .unwrap();
    }

    #[test]
    fn test_upsert_then_get() {
        let db = setup();
        let service = MoodService::new(db.connection());
        let entry = MoodEntry::new(date(2024, 3, 5), Mood::Sadness, Intensity::MEDIUM).with_note("grey");

        service.upsert(&entry).unwrap();

        assert_eq!(service.get(date(2024, 3, 5)).unwrap(), Some(entry));
        assert_eq!(service.get(date(2024, 3, 6)).unwrap(), None);
    }

    #[test]
    fn test_upsert_overwrites_same_date() {
        let db = setup();
        let service = MoodService::new(db.connection());
        let day = date(2024, 3, 5);

        service
            .upsert(&MoodEntry::new(day, Mood::Joy, Intensity::LOW).with_note("first"))
            .unwrap();
        service
            .upsert(&MoodEntry::new(day, Mood::Anger, Intensity::HIGH))
            .unwrap();

        assert_eq!(service.count().unwrap(), 1);
        let stored = service.get(day).unwrap().unwrap();
        assert_eq!(stored.mood, Mood::Anger);
        assert_eq!(stored.intensity, Intensity::HIGH);
        assert_eq!(stored.note, "");
    }

    #[test]
    fn test_list_all_newest_first() {
        let db = setup();
        let service = MoodService::new(db.connection());
        for day in [3, 1, 2] {
            service
                .upsert(&MoodEntry::new(date(2024, 1, day), Mood::Calm, Intensity::LOW))
                .unwrap();
        }

        let dates: Vec<NaiveDate> = service.list_all().unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 3), date(2024, 1, 2), date(2024, 1, 1)]);
    }

    #[test]
    fn test_list_all_clamps_out_of_range_intensity() {
        let db = setup();
        insert_raw(&db, "2024-05-01", "joy", &7);
        insert_raw(&db, "2024-05-02", "calm", &-2);
        insert_raw(&db, "2024-05-03", "fatigue", &"2");

        let service = MoodService::new(db.connection());
        let entries = service.list_all().unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].intensity, Intensity::MEDIUM);
        assert_eq!(entries[1].intensity, Intensity::LOW);
        assert_eq!(entries[2].intensity, Intensity::HIGH);
    }

    #[test]
    fn test_list_all_skips_unknown_mood_and_bad_date() {
        let db = setup();
        insert_raw(&db, "2024-05-01", "euphoric", &2);
        insert_raw(&db, "yesterday", "joy", &2);
        insert_raw(&db, "2024-05-03", "joy", &2);

        let entries = MoodService::new(db.connection()).list_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, date(2024, 5, 3));
    }

    #[test]
    fn test_list_all_skips_non_canonical_date_key() {
        let db = setup();
        insert_raw(&db, "2024-3-5", "calm", &2);
        let service = MoodService::new(db.connection());
        service
            .submit(&MoodSubmission {
                date: Some("2024-03-05".to_string()),
                mood: Some("joy".to_string()),
                intensity: Some(3),
                note: None,
            })
            .unwrap();

        let entries = service.list_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, date(2024, 3, 5));
        assert_eq!(entries[0].mood, Mood::Joy);
        assert!(!service.export_json().unwrap().contains("calm"));
    }

    #[test]
    fn test_submit_validates_before_writing() {
        let db = setup();
        let service = MoodService::new(db.connection());

        let missing = MoodSubmission {
            date: Some("2024-03-05".to_string()),
            mood: Some("joy".to_string()),
            intensity: None,
            note: None,
        };
        assert!(service.submit(&missing).is_err());
        assert_eq!(service.count().unwrap(), 0);

        let valid = MoodSubmission {
            intensity: Some(3),
            ..missing
        };
        let stored = service.submit(&valid).unwrap();
        assert_eq!(stored.intensity, Intensity::HIGH);
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_export_json_oldest_first() {
        let db = setup();
        let service = MoodService::new(db.connection());
        service
            .upsert(&MoodEntry::new(date(2024, 2, 1), Mood::Joy, Intensity::LOW))
            .unwrap();
        service
            .upsert(&MoodEntry::new(date(2024, 1, 1), Mood::Calm, Intensity::HIGH))
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&service.export_json().unwrap()).unwrap();
        assert_eq!(json[0]["date"], "2024-01-01");
        assert_eq!(json[1]["mood"], "joy");
    }
}
