use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    run_settings_migrations(conn)?;
    insert_default_settings(conn)?;
    create_mood_entries_table(conn)?;
    create_diary_posts_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            theme TEXT NOT NULL DEFAULT 'light',
            selected_year INTEGER,
            show_diary_markers INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn run_settings_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "settings",
        "reveal_animation",
        "ALTER TABLE settings ADD COLUMN reveal_animation INTEGER NOT NULL DEFAULT 1",
    )?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, theme, show_diary_markers, reveal_animation)
         VALUES (1, 'light', 1, 1)",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_mood_entries_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS mood_entries (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL UNIQUE,
            mood TEXT NOT NULL,
            intensity INTEGER NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )
    .context("Failed to create mood_entries table")?;

    Ok(())
}

fn create_diary_posts_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS diary_posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create diary_posts table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_diary_posts_created_at ON diary_posts(created_at)",
        [],
    )
    .context("Failed to create diary_posts index")?;

    Ok(())
}
