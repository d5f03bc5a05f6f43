// Settings module
// User-facing preferences persisted in the single-row settings table

use serde::{Deserialize, Serialize};

pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";
pub const THEME_SYSTEM: &str = "system";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub id: Option<i64>,
    pub theme: String,
    /// Year shown on the heatmap when the app was last closed
    pub selected_year: Option<i32>,
    pub show_diary_markers: bool,
    pub reveal_animation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            theme: THEME_LIGHT.to_string(),
            selected_year: None,
            show_diary_markers: true,
            reveal_animation: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        match self.theme.as_str() {
            THEME_LIGHT | THEME_DARK | THEME_SYSTEM => {}
            other => return Err(format!("Unknown theme '{}'", other)),
        }

        if let Some(year) = self.selected_year {
            if !(1900..=9999).contains(&year) {
                return Err(format!("Selected year {} is out of range", year));
            }
        }

        Ok(())
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme == THEME_DARK
    }
}
