use crate::config::AppConfig;
use crate::services::database::Database;
use crate::services::diary::DiaryService;
use crate::services::mood::MoodService;
use crate::services::settings::SettingsService;

/// Shared access point for services and resources that multiple app modules need.
pub struct AppContext {
    database: Database,
    config: AppConfig,
}

impl AppContext {
    pub fn new(database: Database, config: AppConfig) -> Self {
        Self { database, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn settings_service(&self) -> SettingsService<'_> {
        SettingsService::new(&self.database)
    }

    pub fn mood_service(&self) -> MoodService<'_> {
        MoodService::new(self.database.connection())
    }

    pub fn diary_service(&self) -> DiaryService<'_> {
        DiaryService::new(self.database.connection())
    }
}
