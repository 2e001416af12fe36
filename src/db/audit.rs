use crate::errors::AppResult;
use crate::models::audit::AuditEntry;
use chrono::Local;
use rusqlite::{Connection, params};

/// Actor recorded when the caller did not identify itself.
pub const ANONYMOUS: &str = "anonymous";

/// Write one entry into the `audit_log` table.
pub fn write_audit(
    conn: &Connection,
    actor: &str,
    action: &str,
    payload: &serde_json::Value,
) -> AppResult<()> {
    // Timestamp locale, ISO 8601
    let now = Local::now().to_rfc3339();
    let actor = match actor.trim() {
        "" => ANONYMOUS,
        a => a,
    };

    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_log (created_at, actor, action, payload)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![now, actor, action, payload.to_string()])?;

    Ok(())
}

/// Record an audit entry outside any data transaction. Failures are logged
/// and swallowed: they never undo or fail the write being audited.
pub fn record_best_effort(conn: &Connection, actor: &str, action: &str, payload: &serde_json::Value) {
    if let Err(e) = write_audit(conn, actor, action, payload) {
        tracing::warn!(action, error = %e, "failed to write audit entry");
    }
}

pub fn list_audit(conn: &Connection) -> AppResult<Vec<AuditEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, created_at, actor, action, payload FROM audit_log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(AuditEntry {
            id: row.get(0)?,
            created_at: row.get(1)?,
            actor: row.get(2)?,
            action: row.get(3)?,
            payload: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
