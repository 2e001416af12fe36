use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

/// Tracked migrations, applied in order and recorded in `audit_log`.
const ROWS_IDENTITY_INDEX: &str = "20250901_0001_rows_identity_index";

/// Ensure that the `audit_log` table exists.
fn ensure_audit_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            actor      TEXT NOT NULL,
            action     TEXT NOT NULL,
            payload    TEXT NOT NULL DEFAULT '{}'
        );
        "#,
    )?;
    Ok(())
}

/// Create the sheet/row/cell tables with the current schema.
fn create_grid_tables(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sheets (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rows (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            sheet_id   INTEGER NOT NULL REFERENCES sheets(id) ON DELETE CASCADE,
            section    TEXT NOT NULL,
            subsection TEXT,
            row_order  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_rows_sheet_order ON rows(sheet_id, row_order);

        CREATE TABLE IF NOT EXISTS day_cells (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            row_id     INTEGER NOT NULL REFERENCES rows(id) ON DELETE CASCADE,
            day        INTEGER NOT NULL CHECK(day >= 1),
            task       TEXT,
            hours      REAL CHECK(hours IS NULL OR hours >= 0),
            labor_code TEXT,
            UNIQUE(row_id, day)
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM audit_log
         WHERE action = 'migration_applied' AND json_extract(payload, '$.version') = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    let payload = serde_json::json!({ "version": version, "message": message });
    conn.execute(
        "INSERT INTO audit_log (created_at, actor, action, payload)
         VALUES (?1, 'system', 'migration_applied', ?2)",
        params![chrono::Local::now().to_rfc3339(), payload.to_string()],
    )?;
    Ok(())
}

/// At most one row per (sheet, section, subsection). NULL and blank
/// subsections both mean "no subsection".
fn migrate_rows_identity_index(conn: &Connection) -> AppResult<()> {
    if migration_applied(conn, ROWS_IDENTITY_INDEX)? {
        return Ok(());
    }

    let duplicates: i64 = conn.query_row(
        "SELECT COUNT(*) FROM (
            SELECT 1 FROM rows
            GROUP BY sheet_id, section, COALESCE(subsection, '')
            HAVING COUNT(*) > 1
         )",
        [],
        |row| row.get(0),
    )?;
    if duplicates > 0 {
        return Err(AppError::Migration(format!(
            "{ROWS_IDENTITY_INDEX}: {duplicates} duplicated (sheet, section, subsection) groups must be merged first"
        )));
    }

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_rows_identity
         ON rows(sheet_id, section, COALESCE(subsection, ''));",
    )?;

    mark_applied(conn, ROWS_IDENTITY_INDEX, "unique row identity per sheet")?;
    tracing::info!(version = ROWS_IDENTITY_INDEX, "migration applied");

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(); safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_audit_table(conn)?;
    create_grid_tables(conn)?;
    migrate_rows_identity_index(conn)?;
    Ok(())
}
