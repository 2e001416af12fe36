use crate::db::audit::record_best_effort;
use crate::db::cells::upsert_cell;
use crate::db::rows::resolve_row;
use crate::db::sheets::get_or_create_sheet;
use crate::errors::AppResult;
use crate::import::columns::ColumnLayout;
use crate::import::table::RawTable;
use crate::models::cell::CellRecord;
use crate::models::row::RowKey;
use crate::models::section::{NO_SUBSECTION, Section};
use crate::ui::messages::info;
use crate::utils::text::{non_empty, norm_spaces, parse_hours};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub sheet_name: String,
    /// Forced label column (0-based); inferred when `None`.
    pub label_column: Option<usize>,
    pub dry_run: bool,
    pub debug_scan: bool,
    pub actor: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub sheet_id: i64,
    pub rows_scanned: usize,
    pub section_rows_seen: usize,
    pub sections_found: BTreeSet<Section>,
    pub data_rows_seen: usize,
    pub cells_written: usize,
    pub label_column: usize,
    pub dry_run: bool,
}

/// Section currently being filled while scanning down the sheet.
struct Cursor {
    section: Section,
    /// Row of a singleton section, resolved when its header is seen.
    single_row: Option<i64>,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Reconcile a raw table into `opts.sheet_name` in one transaction.
    ///
    /// Section header lines switch the current section; lines before the
    /// first header are ignored. Rows are resolved (or created) per line and
    /// only non-empty cells are upserted. A dry run scans everything and
    /// rolls back.
    pub fn run(conn: &mut Connection, table: &RawTable, opts: &ImportOptions) -> AppResult<ImportSummary> {
        let layout = ColumnLayout::detect(table, opts.label_column)?;

        let mut summary = ImportSummary {
            rows_scanned: table.rows.len(),
            label_column: layout.label_column,
            dry_run: opts.dry_run,
            ..ImportSummary::default()
        };

        // Write lock at BEGIN, through the busy handler.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        summary.sheet_id = get_or_create_sheet(&tx, &opts.sheet_name)?;

        let mut cursor: Option<Cursor> = None;

        for row in &table.rows {
            let name = norm_spaces(RawTable::cell(row, layout.label_column));

            if let Some(section) = Section::from_label(&name) {
                let single_row = if section.is_singleton() {
                    Some(resolve_row(&tx, summary.sheet_id, &RowKey::singleton(section))?)
                } else {
                    None
                };
                summary.sections_found.insert(section);
                summary.section_rows_seen += 1;
                if opts.debug_scan {
                    info(format!("[SECTION] -> '{section}' (from {name:?})"));
                }
                cursor = Some(Cursor { section, single_row });
                continue;
            }

            let Some(current) = &cursor else {
                continue;
            };

            let row_id = match current.single_row {
                Some(id) => id,
                None => {
                    let Some(key) = RowKey::new(current.section, Some(&name)) else {
                        continue;
                    };
                    summary.data_rows_seen += 1;
                    resolve_row(&tx, summary.sheet_id, &key)?
                }
            };

            for (&day, cols) in &layout.days {
                let rec = CellRecord::new(
                    row_id,
                    day,
                    non_empty(RawTable::cell(row, cols.task)),
                    cols.hours.and_then(|i| parse_hours(RawTable::cell(row, i))),
                    cols.labor.and_then(|i| non_empty(RawTable::cell(row, i))),
                );
                if rec.is_empty() {
                    continue;
                }

                if opts.debug_scan {
                    let sub = if current.single_row.is_some() { NO_SUBSECTION } else { name.as_str() };
                    info(format!(
                        "[{row_id}] {} / {sub} -> day {day}: task={:?} hrs={:?} labor={:?}",
                        current.section, rec.task, rec.hours, rec.labor_code
                    ));
                }
                summary.cells_written += 1;
                if !opts.dry_run {
                    upsert_cell(&tx, &rec)?;
                }
            }
        }

        if opts.dry_run {
            tx.rollback()?;
            tracing::info!(cells = summary.cells_written, "dry run rolled back");
            return Ok(summary);
        }

        tx.commit()?;
        tracing::info!(
            sheet_id = summary.sheet_id,
            cells = summary.cells_written,
            "import committed"
        );

        let payload = serde_json::json!({
            "sheet": opts.sheet_name,
            "summary": &summary,
        });
        record_best_effort(conn, &opts.actor, "csv_import", &payload);

        Ok(summary)
    }
}
