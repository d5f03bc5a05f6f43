// Database service module
// SQLite database connection and schema management

mod connection;
pub mod migrations;
mod schema;

pub use connection::Database;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn table_exists(db: &Database, name: &str) -> bool {
        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_str().unwrap();

        let db = Database::new(db_path_str).expect("Should create file-based database");
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
        assert_eq!(db.path(), db_path_str);
    }

    #[test]
    fn test_initialize_schema_creates_tables() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        assert!(table_exists(&db, "settings"));
        assert!(table_exists(&db, "mood_entries"));
        assert!(table_exists(&db, "diary_posts"));
    }

    #[test]
    fn test_initialize_schema_is_repeatable() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        assert!(db.initialize_schema().is_ok());
    }

    #[test]
    fn test_default_settings_inserted() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let (theme, markers): (String, i64) = db
            .connection()
            .query_row(
                "SELECT theme, show_diary_markers FROM settings WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert_eq!(theme, "light");
        assert_eq!(markers, 1);
    }

    #[test]
    fn test_mood_date_is_unique() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        let conn = db.connection();

        conn.execute(
            "INSERT INTO mood_entries (id, date, mood, intensity) VALUES ('a', '2024-01-01', 'joy', 2)",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO mood_entries (id, date, mood, intensity) VALUES ('b', '2024-01-01', 'calm', 1)",
            [],
        );

        assert!(duplicate.is_err(), "A second row for the same date must be rejected");
    }
}
