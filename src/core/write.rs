use crate::db::audit::record_best_effort;
use crate::db::cells::bulk_upsert;
use crate::errors::AppResult;
use crate::models::cell::CellRecord;
use rusqlite::Connection;

pub struct WriteLogic;

impl WriteLogic {
    /// Live-editing write path: apply `records` atomically, then audit the
    /// batch under `actor`. An empty batch writes nothing and is not audited.
    pub fn bulk_upsert(conn: &mut Connection, actor: &str, records: &[CellRecord]) -> AppResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let updated = bulk_upsert(conn, records)?;
        tracing::info!(updated, actor, "bulk upsert committed");

        let payload = serde_json::json!({ "updated": updated, "records": records });
        record_best_effort(conn, actor, "bulk_upsert", &payload);

        Ok(updated)
    }
}
