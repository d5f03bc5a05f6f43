use crate::models::settings::Settings;
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<Settings, rusqlite::Error> {
    Ok(Settings {
        id: Some(row.get(0)?),
        theme: row.get(1)?,
        selected_year: row.get(2)?,
        show_diary_markers: row.get::<_, i32>(3)? != 0,
        reveal_animation: row.get::<_, i32>(4).unwrap_or(1) != 0,
    })
}
