use crate::errors::{AppError, AppResult};
use crate::models::sheet::Sheet;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

pub fn find_sheet_by_name(conn: &Connection, name: &str) -> AppResult<Option<i64>> {
    let id = conn
        .query_row("SELECT id FROM sheets WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(id)
}

/// Sheets are created on first reference by name and never auto-deleted.
pub fn get_or_create_sheet(conn: &Connection, name: &str) -> AppResult<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidSheetName(name.to_string()));
    }

    if let Some(id) = find_sheet_by_name(conn, name)? {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO sheets (name, created_at) VALUES (?1, ?2)",
        params![name, Local::now().to_rfc3339()],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(sheet_id = id, name = %name, "created sheet");
    Ok(id)
}

pub fn list_sheets(conn: &Connection) -> AppResult<Vec<Sheet>> {
    let mut stmt = conn.prepare("SELECT id, name FROM sheets ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Sheet {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
