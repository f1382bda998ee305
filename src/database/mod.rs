use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::models::StorageSettings;

pub mod schema;
pub mod queries;

pub fn init_database(settings: &StorageSettings) -> Result<Connection> {
    let db_path = &settings.db_path;
    if settings.create_missing_dirs {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("opening {}", db_path.display()))?;

    conn.pragma_update(None, "journal_mode", &settings.journal_mode)?;
    conn.pragma_update(None, "synchronous", &settings.synchronous)?;
    conn.pragma_update(None, "foreign_keys", &"ON")?;

    schema::create_tables(&conn)?;
    log::info!("Reminder database ready at {}", db_path.display());

    Ok(conn)
}

/// In-memory database with the full schema, for tests and throwaway sessions.
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.pragma_update(None, "foreign_keys", &"ON")?;
    schema::create_tables(&conn)?;
    Ok(conn)
}
