use crate::cli::commands::{actor, open_db};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::labels::canonicalize;
use crate::errors::AppResult;
use crate::import::{ColumnLayout, ImportLogic, ImportOptions, ImportSummary, RawTable};
use crate::ui::messages::{header, success, warning};
use crate::utils::path::expand_tilde;
use crate::utils::text::norm_spaces;

/// Handle the `import` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        csv,
        sheet,
        dry,
        debug_scan,
        print_headers,
        dump_names,
        name_col_index,
        user,
    } = cmd
    {
        //
        // 1. Read the whole file; empty input aborts here
        //
        let table = RawTable::from_path(&expand_tilde(csv))?;

        //
        // 2. Diagnostics only: no database access
        //
        if *print_headers {
            let layout = ColumnLayout::scan(&table, *name_col_index)?;
            print_layout(&table, &layout);
            return Ok(());
        }

        if let Some(n) = dump_names.filter(|n| *n > 0) {
            let layout = ColumnLayout::scan(&table, *name_col_index)?;
            dump_label_column(&table, layout.label_column, n);
            return Ok(());
        }

        //
        // 3. Reconcile inside one transaction
        //
        let opts = ImportOptions {
            sheet_name: sheet.clone(),
            label_column: *name_col_index,
            dry_run: *dry,
            debug_scan: *debug_scan,
            actor: actor(user, cfg),
        };

        let mut pool = open_db(cfg)?;
        let summary = ImportLogic::run(&mut pool.conn, &table, &opts)?;
        print_summary(&summary);
    }

    Ok(())
}

fn print_layout(table: &RawTable, layout: &ColumnLayout) {
    header("Header columns");
    for (i, h) in table.header.iter().enumerate() {
        println!("  [{i}] {h:?}");
    }

    let how = if layout.label_inferred { "inferred" } else { "forced" };
    println!("\nChosen label/section column index: {} ({how})", layout.label_column);

    if layout.days.is_empty() {
        warning("No 'Day N' columns recognized.");
    }

    header("Day/Time/Labor columns discovered");
    for (day, cols) in &layout.days {
        println!(
            "  Day {day}: day_idx={}, time_idx={:?}, labor_idx={:?}",
            cols.task, cols.hours, cols.labor
        );
    }
}

fn dump_label_column(table: &RawTable, column: usize, n: usize) {
    println!("Dumping first {n} names from column {column}:");
    for (i, row) in table.rows.iter().take(n).enumerate() {
        let raw = norm_spaces(RawTable::cell(row, column));
        println!("[{i}] {raw:?} -> {:?}", canonicalize(&raw));
    }
}

fn print_summary(summary: &ImportSummary) {
    let sections = if summary.sections_found.is_empty() {
        "NONE".to_string()
    } else {
        summary
            .sections_found
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("Sheet id: {}", summary.sheet_id);
    println!("Label column: {}", summary.label_column);
    println!("Scanned rows: {}", summary.rows_scanned);
    println!(
        "Section header rows seen: {} -> {}",
        summary.section_rows_seen, sections
    );
    println!(
        "Data rows seen (non-single sections): {}",
        summary.data_rows_seen
    );

    if summary.sections_found.is_empty() {
        warning(
            "No section headers recognized; check which column holds them (use --print-headers / --dump-names).",
        );
    }

    if summary.dry_run {
        println!("DRY RUN: would upsert {} day-cells", summary.cells_written);
    } else {
        success(format!("Done. Upserted {} day-cells.", summary.cells_written));
    }
}
