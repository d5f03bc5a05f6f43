use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::diary::DiaryLink;
use crate::models::mood::{Intensity, Mood, MoodEntry};

/// Rotation used for demo data. Deliberately not palette order so that
/// neighbouring seeds differ.
const SEED_ROTATION: [Mood; 5] = [
    Mood::Joy,
    Mood::Anger,
    Mood::Calm,
    Mood::Fatigue,
    Mood::Sadness,
];

const SCATTER_DAYS: i64 = 30;

/// Demo entries shown when nothing has been recorded yet.
///
/// Every diary day gets an entry that mentions the post, then thirty more
/// days are scattered backwards from `today` (skipping diary days). These are
/// display-only and never written to the database.
pub fn sample_seeds(
    diary_links: &BTreeMap<NaiveDate, DiaryLink>,
    today: NaiveDate,
) -> Vec<MoodEntry> {
    let mut seeds = Vec::with_capacity(diary_links.len() + SCATTER_DAYS as usize);

    for (idx, (date, link)) in diary_links.iter().enumerate() {
        seeds.push(
            MoodEntry::new(*date, SEED_ROTATION[idx % SEED_ROTATION.len()], Intensity::MEDIUM)
                .with_note(format!("Diary: {}", link.title)),
        );
    }

    for i in 0..SCATTER_DAYS {
        let date = today - Duration::days(i * 4 + i % 3);
        if diary_links.contains_key(&date) {
            continue;
        }

        let mood = SEED_ROTATION[(i as usize + 2) % SEED_ROTATION.len()];
        let intensity = Intensity::clamped(i % 3 + 1);
        let note = if i % 5 == 0 { "Short mood note" } else { "" };
        seeds.push(MoodEntry::new(date, mood, intensity).with_note(note));
    }

    seeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seeds_without_diary() {
        let today = date(2024, 6, 30);
        let seeds = sample_seeds(&BTreeMap::new(), today);

        assert_eq!(seeds.len(), 30);
        assert_eq!(seeds[0].date, today);
        assert_eq!(seeds[0].mood, Mood::Calm);
        assert_eq!(seeds[0].intensity, Intensity::LOW);
        assert_eq!(seeds[0].note, "Short mood note");

        let unique: HashSet<NaiveDate> = seeds.iter().map(|s| s.date).collect();
        assert_eq!(unique.len(), seeds.len(), "seed dates must not repeat");
    }

    #[test]
    fn test_diary_days_take_precedence() {
        let today = date(2024, 6, 30);
        let mut links = BTreeMap::new();
        links.insert(
            today,
            DiaryLink {
                date: today,
                url: "/post/1".to_string(),
                title: "Summer".to_string(),
            },
        );

        let seeds = sample_seeds(&links, today);
        let for_today: Vec<&MoodEntry> = seeds.iter().filter(|s| s.date == today).collect();

        assert_eq!(for_today.len(), 1);
        assert_eq!(for_today[0].note, "Diary: Summer");
        assert_eq!(for_today[0].mood, Mood::Joy);
        assert_eq!(seeds.len(), 30);
    }
}
