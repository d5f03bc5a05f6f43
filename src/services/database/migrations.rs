use anyhow::{Context, Result};
use rusqlite::Connection;

/// Checks whether a column exists on a table.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let exists: i32 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .context("Failed to inspect table info")?;

    Ok(exists > 0)
}

/// Adds a column if it does not already exist.
pub fn ensure_column(conn: &Connection, table: &str, column: &str, ddl: &str) -> Result<()> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }

    log::info!("Migrating schema: adding {}.{}", table, column);
    conn.execute(ddl, [])
        .with_context(|| format!("Failed to add {}.{}", table, column))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_column_adds_once() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE things (id INTEGER PRIMARY KEY)", [])
            .unwrap();

        assert!(!column_exists(&conn, "things", "label").unwrap());

        let ddl = "ALTER TABLE things ADD COLUMN label TEXT NOT NULL DEFAULT ''";
        ensure_column(&conn, "things", "label", ddl).unwrap();
        assert!(column_exists(&conn, "things", "label").unwrap());

        // Second call must be a no-op rather than a duplicate-column error
        ensure_column(&conn, "things", "label", ddl).unwrap();
    }
}
