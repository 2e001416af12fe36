//! Day cell persistence: atomic full-replace upserts and range loads.

use crate::errors::AppResult;
use crate::models::block::{DayRange, DayValue};
use crate::models::cell::CellRecord;
use rusqlite::{Connection, TransactionBehavior, params, params_from_iter};
use std::collections::HashMap;

/// Write one cell. All three fields are replaced together, nulls included;
/// a conflicting (row_id, day) is resolved by the store, last write wins.
pub fn upsert_cell(conn: &Connection, rec: &CellRecord) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO day_cells (row_id, day, task, hours, labor_code)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(row_id, day) DO UPDATE SET
             task = excluded.task,
             hours = excluded.hours,
             labor_code = excluded.labor_code",
    )?;
    stmt.execute(params![
        rec.row_id,
        rec.day,
        rec.task,
        rec.hours,
        rec.labor_code
    ])?;
    Ok(())
}

/// Apply a batch in one transaction: every record lands or none does.
/// Returns the number of records applied.
pub fn bulk_upsert(conn: &mut Connection, records: &[CellRecord]) -> AppResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for rec in records {
        upsert_cell(&tx, rec)?;
    }
    tx.commit()?;

    Ok(records.len())
}

/// Stored cells of the given rows inside `range`, keyed by (row_id, day).
pub fn load_cells(
    conn: &Connection,
    row_ids: &[i64],
    range: DayRange,
) -> AppResult<HashMap<(i64, u32), DayValue>> {
    let mut out = HashMap::new();
    if row_ids.is_empty() || range.is_empty() {
        return Ok(out);
    }

    let placeholders = vec!["?"; row_ids.len()].join(", ");
    let sql = format!(
        "SELECT row_id, day, task, hours, labor_code
         FROM day_cells
         WHERE day BETWEEN ? AND ?
           AND row_id IN ({placeholders})"
    );

    let mut bind: Vec<i64> = vec![i64::from(range.start), i64::from(range.end)];
    bind.extend_from_slice(row_ids);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(bind.iter()), |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, u32>(1)?,
            DayValue {
                task: row.get(2)?,
                hours: row.get(3)?,
                labor_code: row.get(4)?,
            },
        ))
    })?;

    for r in rows {
        let (row_id, day, value) = r?;
        out.insert((row_id, day), value);
    }
    Ok(out)
}
