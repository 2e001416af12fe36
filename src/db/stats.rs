use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let n = pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(n)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TABLE COUNTS
    //
    for (label, table) in [
        ("Sheets", "sheets"),
        ("Rows", "rows"),
        ("Day cells", "day_cells"),
        ("Audit entries", "audit_log"),
    ] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) DAY SPAN
    //
    let (first, last): (Option<i64>, Option<i64>) = pool.conn.query_row(
        "SELECT MIN(day), MAX(day) FROM day_cells",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    if let (Some(f), Some(l)) = (first, last) {
        println!("{}• Day span:{} {} → {}", CYAN, RESET, f, l);
    }

    println!();
    Ok(())
}
