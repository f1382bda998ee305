use anyhow::{bail, Context, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::{ActivationSchedule, Category, NewReminder, Reminder};

const REMINDER_COLUMNS: &str = "id, category_id, content, time, created_at, updated_at";

pub fn add_category(conn: &Connection, name: &str) -> Result<i64> {
    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO categories (name, created_at) VALUES (?1, ?2)",
        rusqlite::params![name, now],
    )
    .with_context(|| format!("adding category '{}'", name))?;

    let id = conn.last_insert_rowid();
    log::debug!("Added category {} '{}'", id, name);
    Ok(id)
}

pub fn get_category_id(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM categories WHERE name = ?1 LIMIT 1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn get_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM categories ORDER BY id")?;

    let categories = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(categories)
}

/// Reminders in a deleted category keep existing without a category.
pub fn delete_category(conn: &Connection, id: i64) -> Result<()> {
    let removed = conn.execute("DELETE FROM categories WHERE id = ?1", [id])?;
    log::debug!("Deleted category {} ({} row)", id, removed);
    Ok(())
}

pub fn add_reminder(conn: &Connection, reminder: &NewReminder) -> Result<i64> {
    let now = chrono::Utc::now().timestamp();
    let time_blob = reminder.time.encode()?;

    conn.execute(
        "INSERT INTO reminders (category_id, content, time, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        rusqlite::params![reminder.category_id, &reminder.content, &time_blob, now],
    )
    .context("adding reminder")?;

    let id = conn.last_insert_rowid();
    log::info!("Added reminder {} ({})", id, reminder.time.classification());
    Ok(id)
}

pub fn get_reminder(conn: &Connection, id: i64) -> Result<Option<Reminder>> {
    let reminder = conn
        .query_row(
            &format!("SELECT {} FROM reminders WHERE id = ?1", REMINDER_COLUMNS),
            [id],
            reminder_from_row,
        )
        .optional()
        .with_context(|| format!("reading reminder {}", id))?;
    Ok(reminder)
}

pub fn get_reminders(conn: &Connection, category_id: Option<i64>) -> Result<Vec<Reminder>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}
         FROM reminders
         WHERE (?1 IS NULL OR category_id = ?1)
         ORDER BY id",
        REMINDER_COLUMNS
    ))?;

    let reminders = stmt
        .query_map([category_id], reminder_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reminders)
}

/// Replaces category, content and schedule of an existing reminder.
pub fn update_reminder(conn: &Connection, reminder: &Reminder) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    let time_blob = reminder.time.encode()?;

    let updated = conn.execute(
        "UPDATE reminders SET category_id = ?1, content = ?2, time = ?3, updated_at = ?4
         WHERE id = ?5",
        rusqlite::params![reminder.category_id, &reminder.content, &time_blob, now, reminder.id],
    )?;
    if updated == 0 {
        bail!("reminder {} does not exist", reminder.id);
    }

    log::debug!("Updated reminder {}", reminder.id);
    Ok(())
}

pub fn delete_reminder(conn: &Connection, id: i64) -> Result<()> {
    let removed = conn.execute("DELETE FROM reminders WHERE id = ?1", [id])?;
    log::debug!("Deleted reminder {} ({} row)", id, removed);
    Ok(())
}

fn reminder_from_row(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    let id: i64 = row.get(0)?;
    let time_blob: Vec<u8> = row.get(3)?;
    let time = ActivationSchedule::decode(&time_blob).map_err(|e| {
        log::warn!("Reminder {} has an unreadable schedule: {}", id, e);
        rusqlite::Error::FromSqlConversionFailure(3, Type::Blob, Box::new(e))
    })?;

    Ok(Reminder {
        id,
        category_id: row.get(1)?,
        content: row.get(2)?,
        time,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
