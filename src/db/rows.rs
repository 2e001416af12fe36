//! Row identity resolution and row listings.

use crate::errors::AppResult;
use crate::models::row::{RowKey, RowRecord};
use crate::models::section::{NO_SUBSECTION, Section};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<RowRecord> {
    Ok(RowRecord {
        id: row.get("id")?,
        sheet_id: row.get("sheet_id")?,
        section: row.get("section")?,
        subsection: row.get("subsection")?,
        row_order: row.get("row_order")?,
    })
}

/// Exact match on the persisted section/subsection strings.
pub fn find_row(conn: &Connection, sheet_id: i64, key: &RowKey) -> AppResult<Option<i64>> {
    let section = key.section().name();
    let id = match key.subsection() {
        None => conn
            .query_row(
                "SELECT id FROM rows
                 WHERE sheet_id = ?1 AND section = ?2 AND COALESCE(subsection, '') = ''",
                params![sheet_id, section],
                |row| row.get(0),
            )
            .optional()?,
        Some(sub) => conn
            .query_row(
                "SELECT id FROM rows
                 WHERE sheet_id = ?1 AND section = ?2 AND subsection = ?3",
                params![sheet_id, section, sub],
                |row| row.get(0),
            )
            .optional()?,
    };
    Ok(id)
}

/// Next display position for a sheet: max + 1, or 1 for an empty sheet.
pub fn next_row_order(conn: &Connection, sheet_id: i64) -> AppResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(row_order), 0) + 1 FROM rows WHERE sheet_id = ?1",
        [sheet_id],
        |row| row.get(0),
    )?;
    Ok(next)
}

/// Find or create the row backing `key`. Idempotent; existing rows keep
/// their position, new rows are appended after the last one.
pub fn resolve_row(conn: &Connection, sheet_id: i64, key: &RowKey) -> AppResult<i64> {
    if let Some(id) = find_row(conn, sheet_id, key)? {
        return Ok(id);
    }

    let order = next_row_order(conn, sheet_id)?;
    conn.execute(
        "INSERT INTO rows (sheet_id, section, subsection, row_order) VALUES (?1, ?2, ?3, ?4)",
        params![sheet_id, key.section().name(), key.subsection(), order],
    )?;
    let id = conn.last_insert_rowid();

    tracing::debug!(
        sheet_id,
        row_id = id,
        row_order = order,
        section = key.section().name(),
        subsection = key.subsection().unwrap_or(NO_SUBSECTION),
        "created row"
    );
    Ok(id)
}

/// All rows of a section, in display order. Section text is compared
/// trimmed and case-insensitively so hand-edited rows are still found.
pub fn rows_for_section(
    conn: &Connection,
    sheet_id: i64,
    section: Section,
) -> AppResult<Vec<RowRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, sheet_id, section, subsection, row_order
         FROM rows
         WHERE sheet_id = ?1
           AND LOWER(TRIM(section)) = LOWER(?2)
         ORDER BY row_order ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![sheet_id, section.name()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Distinct display subsections of a section; blank ones show as `(none)`.
pub fn distinct_subsections(
    conn: &Connection,
    sheet_id: i64,
    section: Section,
) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT COALESCE(NULLIF(TRIM(subsection), ''), ?3) AS ss
         FROM rows
         WHERE sheet_id = ?1
           AND LOWER(TRIM(section)) = LOWER(?2)
         ORDER BY 1",
    )?;

    let rows = stmt.query_map(params![sheet_id, section.name(), NO_SUBSECTION], |row| {
        row.get::<_, String>(0)
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
