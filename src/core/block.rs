use crate::db::cells::load_cells;
use crate::db::rows::rows_for_section;
use crate::errors::AppResult;
use crate::models::block::{Block, BlockQuery, BlockRow, DayValue};
use crate::models::row::RowRecord;
use crate::models::section::NO_SUBSECTION;
use crate::utils::text::norm_spaces;
use rusqlite::Connection;

pub struct BlockLogic;

impl BlockLogic {
    /// Rows × days view of one section. Missing cells come back as all-null
    /// days; an inverted day range yields no rows.
    pub fn read(conn: &Connection, query: &BlockQuery) -> AppResult<Block> {
        if query.range.is_empty() {
            return Ok(Block::default());
        }

        let rows: Vec<RowRecord> = rows_for_section(conn, query.sheet_id, query.section)?
            .into_iter()
            .filter(|r| query.section.is_singleton() || Self::matches_subsection(r, query))
            .collect();

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut cells = load_cells(conn, &ids, query.range)?;

        let out = rows
            .into_iter()
            .map(|r| {
                let subsection = if query.section.is_singleton() {
                    NO_SUBSECTION.to_string()
                } else {
                    r.display_subsection()
                };
                let days = query
                    .range
                    .days()
                    .map(|d| cells.remove(&(r.id, d)).unwrap_or_default())
                    .collect::<Vec<DayValue>>();

                BlockRow {
                    row_id: r.id,
                    section: r.section,
                    subsection,
                    start_day: query.range.start,
                    days,
                }
            })
            .collect();

        Ok(Block { rows: out })
    }

    /// Blank or `(none)` requests select every row of the section; otherwise
    /// compare display subsections ignoring case and whitespace runs.
    fn matches_subsection(row: &RowRecord, query: &BlockQuery) -> bool {
        let wanted = match query.subsection.as_deref().map(norm_spaces) {
            None => return true,
            Some(s) if s.is_empty() || s == NO_SUBSECTION => return true,
            Some(s) => s.to_lowercase(),
        };
        norm_spaces(&row.display_subsection()).to_lowercase() == wanted
    }
}
