use crate::models::settings::Settings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<Settings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, theme, selected_year, show_diary_markers, reveal_animation
                 FROM settings WHERE id = 1",
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET theme = ?1, \
                 selected_year = ?2, \
                 show_diary_markers = ?3, \
                 reveal_animation = ?4, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (
                &settings.theme,
                settings.selected_year,
                settings.show_diary_markers as i32,
                settings.reveal_animation as i32,
            ),
        )
        .context("Failed to update settings")?;

        Ok(())
    }

    /// Persist only the selected year, leaving other preferences untouched.
    pub fn update_selected_year(&self, year: i32) -> Result<()> {
        self.db
            .connection()
            .execute(
                "UPDATE settings SET selected_year = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = 1",
                [year],
            )
            .context("Failed to update selected year")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_get_defaults() {
        let db = setup();
        let settings = SettingsService::new(&db).get().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_update_round_trip() {
        let db = setup();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.theme = "dark".to_string();
        settings.selected_year = Some(2023);
        settings.show_diary_markers = false;
        service.update(&settings).unwrap();

        assert_eq!(service.get().unwrap(), settings);
    }

    #[test]
    fn test_update_rejects_invalid_theme() {
        let db = setup();
        let service = SettingsService::new(&db);

        let settings = Settings {
            theme: "neon".to_string(),
            ..Settings::default()
        };
        assert!(service.update(&settings).is_err());
        assert_eq!(service.get().unwrap().theme, "light");
    }

    #[test]
    fn test_update_selected_year() {
        let db = setup();
        let service = SettingsService::new(&db);
        service.update_selected_year(2021).unwrap();
        assert_eq!(service.get().unwrap().selected_year, Some(2021));
    }
}
