//! Diary post service.
//!
//! Diary posts are only the source of the per-day links shown on the
//! heatmap; editing and rendering posts happens elsewhere.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{params, Connection, Row};

use crate::models::diary::{DiaryLink, DiaryPost};

pub struct DiaryService<'a> {
    conn: &'a Connection,
}

impl<'a> DiaryService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new post stamped with the current time.
    pub fn create(&self, title: &str, content: &str) -> Result<DiaryPost> {
        self.insert(DiaryPost::new(title.trim(), content))
    }

    /// Insert a post keeping its `created_at`.
    pub fn insert(&self, post: DiaryPost) -> Result<DiaryPost> {
        post.validate()?;

        self.conn
            .execute(
                "INSERT INTO diary_posts (title, content, created_at) VALUES (?1, ?2, ?3)",
                params![post.title, post.content, post.created_at.to_rfc3339()],
            )
            .context("Failed to insert diary post")?;

        Ok(DiaryPost {
            id: Some(self.conn.last_insert_rowid()),
            ..post
        })
    }

    /// All posts, newest first. Posts with an unreadable timestamp are skipped.
    pub fn list_all(&self) -> Result<Vec<DiaryPost>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, created_at FROM diary_posts ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], row_to_raw_post)?;

        let mut posts = Vec::new();
        for row in rows {
            let row = row.context("Failed to fetch diary posts")?;
            if let Some(post) = normalize_post(row) {
                posts.push(post);
            }
        }

        Ok(posts)
    }

    /// One link per day that has a post. When a day has several posts the
    /// newest one is linked.
    pub fn diary_links(&self) -> Result<BTreeMap<NaiveDate, DiaryLink>> {
        let mut links = BTreeMap::new();
        for post in self.list_all()? {
            if let Some(link) = post.link() {
                links.entry(link.date).or_insert(link);
            }
        }
        Ok(links)
    }
}

struct RawDiaryRow {
    id: i64,
    title: String,
    content: String,
    created_at: String,
}

fn row_to_raw_post(row: &Row) -> Result<RawDiaryRow, rusqlite::Error> {
    Ok(RawDiaryRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn normalize_post(row: RawDiaryRow) -> Option<DiaryPost> {
    let created_at = match DateTime::parse_from_rfc3339(&row.created_at) {
        Ok(ts) => ts.with_timezone(&Local),
        Err(err) => {
            log::warn!(
                "Skipping diary post {} with bad timestamp '{}': {}",
                row.id,
                row.created_at,
                err
            );
            return None;
        }
    };

    Some(DiaryPost {
        id: Some(row.id),
        title: row.title,
        content: row.content,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;
    use chrono::TimeZone;

    fn setup() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn post_at(title: &str, y: i32, m: u32, d: u32, h: u32) -> DiaryPost {
        DiaryPost {
            id: None,
            title: title.to_string(),
            content: String::new(),
            created_at: Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_create_assigns_id() {
        let db = setup();
        let post = DiaryService::new(db.connection())
            .create("  First entry ", "hello")
            .unwrap();
        assert!(post.id.is_some());
        assert_eq!(post.title, "First entry");
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let db = setup();
        assert!(DiaryService::new(db.connection()).create("   ", "").is_err());
    }

    #[test]
    fn test_list_all_newest_first() {
        let db = setup();
        let service = DiaryService::new(db.connection());
        service.insert(post_at("older", 2024, 1, 2, 9)).unwrap();
        service.insert(post_at("newer", 2024, 2, 3, 9)).unwrap();

        let titles: Vec<String> = service.list_all().unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[test]
    fn test_diary_links_keyed_by_day_newest_wins() {
        let db = setup();
        let service = DiaryService::new(db.connection());
        service.insert(post_at("morning", 2024, 5, 1, 8)).unwrap();
        let evening = service.insert(post_at("evening", 2024, 5, 1, 20)).unwrap();
        service.insert(post_at("other day", 2024, 5, 3, 8)).unwrap();

        let links = service.diary_links().unwrap();
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[&may_first].title, "evening");
        assert_eq!(links[&may_first].url, evening.url().unwrap());
    }

    #[test]
    fn test_bad_timestamp_skips_only_that_post() {
        let db = setup();
        let service = DiaryService::new(db.connection());
        service.insert(post_at("kept", 2024, 6, 10, 9)).unwrap();
        db.connection()
            .execute(
                "INSERT INTO diary_posts (title, content, created_at) VALUES ('broken', '', 'last tuesday')",
                [],
            )
            .unwrap();

        let titles: Vec<String> = service.list_all().unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["kept"]);

        let links = service.diary_links().unwrap();
        assert_eq!(links.len(), 1);
        assert!(links.contains_key(&NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()));
    }
}
