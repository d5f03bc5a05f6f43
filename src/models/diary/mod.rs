//! Diary post model and the derived per-day diary link.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A diary post. Only the fields the heatmap needs are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryPost {
    /// Unique identifier (database primary key)
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl DiaryPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            created_at: Local::now(),
        }
    }

    /// Relative URL of the post page.
    pub fn url(&self) -> Option<String> {
        self.id.map(|id| format!("/post/{}", id))
    }

    /// The calendar day this post is filed under.
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Link shown on the heatmap cell for the post's day. Unsaved posts have none.
    pub fn link(&self) -> Option<DiaryLink> {
        Some(DiaryLink {
            date: self.date(),
            url: self.url()?,
            title: self.title.clone(),
        })
    }

    pub fn validate(&self) -> Result<(), DiaryValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DiaryValidationError::EmptyTitle);
        }
        if title.chars().count() > 200 {
            return Err(DiaryValidationError::TitleTooLong);
        }
        Ok(())
    }
}

/// Read-only cross reference from a calendar day to a diary post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryLink {
    pub date: NaiveDate,
    pub url: String,
    pub title: String,
}

impl DiaryLink {
    /// Resolves the relative post URL against the site base URL.
    pub fn absolute_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.url)
    }
}

/// Validation errors for DiaryPost.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiaryValidationError {
    #[error("Diary title cannot be empty")]
    EmptyTitle,
    #[error("Diary title must be 200 characters or less")]
    TitleTooLong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_on(id: Option<i64>, y: i32, m: u32, d: u32) -> DiaryPost {
        DiaryPost {
            id,
            title: "Spring walk".to_string(),
            content: String::new(),
            created_at: Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_link_uses_creation_day() {
        let link = post_on(Some(7), 2024, 4, 2).link().unwrap();
        assert_eq!(link.date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(link.url, "/post/7");
        assert_eq!(link.title, "Spring walk");
    }

    #[test]
    fn test_unsaved_post_has_no_link() {
        assert!(post_on(None, 2024, 4, 2).link().is_none());
    }

    #[test]
    fn test_absolute_url() {
        let link = post_on(Some(3), 2024, 1, 1).link().unwrap();
        assert_eq!(
            link.absolute_url("https://example.org/"),
            "https://example.org/post/3"
        );
        assert_eq!(
            link.absolute_url("https://example.org"),
            "https://example.org/post/3"
        );
    }

    #[test]
    fn test_validate_title() {
        let mut post = DiaryPost::new("  ", "");
        assert_eq!(post.validate(), Err(DiaryValidationError::EmptyTitle));
        post.title = "a".repeat(201);
        assert_eq!(post.validate(), Err(DiaryValidationError::TitleTooLong));
        post.title = "Fine".to_string();
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            DiaryValidationError::EmptyTitle.to_string(),
            "Diary title cannot be empty"
        );
        let err: anyhow::Error = DiaryValidationError::TitleTooLong.into();
        assert_eq!(err.to_string(), "Diary title must be 200 characters or less");
    }
}
