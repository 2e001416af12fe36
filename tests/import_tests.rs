mod common;
use common::{SCHEDULE_CSV, TestDb, memory_db, sg};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use sitegrid::core::block::BlockLogic;
use sitegrid::errors::AppError;
use sitegrid::import::{ImportLogic, ImportOptions, RawTable};
use sitegrid::models::block::{BlockQuery, DayRange};
use sitegrid::models::section::Section;

fn options(sheet: &str) -> ImportOptions {
    ImportOptions {
        sheet_name: sheet.to_string(),
        label_column: None,
        dry_run: false,
        debug_scan: false,
        actor: "tester".to_string(),
    }
}

fn table(csv: &str) -> RawTable {
    RawTable::from_reader(csv.as_bytes()).expect("parse csv")
}

fn query(sheet_id: i64, section: Section, start: u32, end: u32) -> BlockQuery {
    BlockQuery {
        sheet_id,
        section,
        subsection: None,
        range: DayRange::new(start, end).expect("range"),
    }
}

#[test]
fn test_section_header_line_creates_no_row() {
    let mut pool = memory_db();
    let csv = "Name, Day 1, Time 1, Labor 1\nOutside,,,\nEntry,Demo,4.5,L1\n";

    let summary = ImportLogic::run(&mut pool.conn, &table(csv), &options("Job A")).expect("import");

    assert_eq!(summary.rows_scanned, 2);
    assert_eq!(summary.section_rows_seen, 1);
    assert_eq!(summary.data_rows_seen, 1);
    assert_eq!(summary.cells_written, 1);

    let rows: Vec<(String, Option<String>)> = {
        let mut stmt = pool
            .conn
            .prepare("SELECT section, subsection FROM rows ORDER BY id")
            .expect("prepare");
        stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .expect("query")
            .map(|r| r.expect("row"))
            .collect()
    };
    assert_eq!(rows, vec![("Outside".to_string(), Some("Entry".to_string()))]);

    let block = BlockLogic::read(&pool.conn, &query(summary.sheet_id, Section::Outside, 1, 1))
        .expect("block");
    assert_eq!(block.rows.len(), 1);
    let day1 = block.rows[0].day(1).expect("day 1");
    assert_eq!(day1.task.as_deref(), Some("Demo"));
    assert_eq!(day1.hours, Some(4.5));
    assert_eq!(day1.labor_code.as_deref(), Some("L1"));
}

#[test]
fn test_import_round_trip_reproduces_cells() {
    let mut pool = memory_db();
    let summary =
        ImportLogic::run(&mut pool.conn, &table(SCHEDULE_CSV), &options("Job B")).expect("import");

    assert_eq!(summary.cells_written, 6);
    assert_eq!(
        summary.sections_found.iter().copied().collect::<Vec<_>>(),
        vec![Section::Outside, Section::GroundFloor, Section::Roof]
    );

    let outside = BlockLogic::read(&pool.conn, &query(summary.sheet_id, Section::Outside, 1, 2))
        .expect("outside block");
    let subs: Vec<&str> = outside.rows.iter().map(|r| r.subsection.as_str()).collect();
    assert_eq!(subs, vec!["Entry", "Driveway"]);

    let driveway = &outside.rows[1];
    let d1 = driveway.day(1).expect("day 1");
    assert_eq!(d1.task.as_deref(), Some("Grade"));
    assert!((d1.hours.expect("hours") - 1000.0).abs() < 1e-9);
    assert_eq!(d1.labor_code.as_deref(), Some("L2"));
    let d2 = driveway.day(2).expect("day 2");
    assert_eq!(d2.task.as_deref(), Some("Pour"));
    assert!((d2.hours.expect("hours") - 6.0).abs() < 1e-9);

    // Entry has nothing on day 2: all-null gap
    let gap = outside.rows[0].day(2).expect("day 2");
    assert!(gap.task.is_none() && gap.hours.is_none() && gap.labor_code.is_none());

    let roof = BlockLogic::read(&pool.conn, &query(summary.sheet_id, Section::Roof, 1, 2))
        .expect("roof block");
    assert_eq!(roof.rows.len(), 1);
    assert_eq!(roof.rows[0].subsection, "(none)");
    assert_eq!(roof.rows[0].day(1).and_then(|d| d.task.clone()).as_deref(), Some("Tear off"));
    assert_eq!(roof.rows[0].day(2).and_then(|d| d.hours), Some(7.5));
}

#[test]
fn test_reimport_is_idempotent_and_keeps_order() {
    let mut pool = memory_db();
    let t = table(SCHEDULE_CSV);
    ImportLogic::run(&mut pool.conn, &t, &options("Job C")).expect("first import");

    let snapshot = |conn: &rusqlite::Connection| -> Vec<(i64, String, i64)> {
        let mut stmt = conn
            .prepare("SELECT id, section, row_order FROM rows ORDER BY id")
            .expect("prepare");
        stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
            .expect("query")
            .map(|r| r.expect("row"))
            .collect()
    };
    let before = snapshot(&pool.conn);
    let orders: Vec<i64> = before.iter().map(|r| r.2).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);

    // A later export adds one line item under Outside
    let grown = SCHEDULE_CSV.replace("Roof,,,,,,", "Fence,Posts,2,F1,,,\nRoof,,,,,,");
    ImportLogic::run(&mut pool.conn, &t, &options("Job C")).expect("second import");
    ImportLogic::run(&mut pool.conn, &table(&grown), &options("Job C")).expect("third import");

    let after = snapshot(&pool.conn);
    assert_eq!(&after[..4], &before[..]);
    assert_eq!(after.len(), 5);
    assert_eq!(after[4].1, "Outside");
    assert_eq!(after[4].2, 5);

    let cells: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM day_cells", [], |r| r.get(0))
        .expect("count");
    assert_eq!(cells, 7);
}

#[test]
fn test_roof_ignores_subsection_labels() {
    let mut pool = memory_db();
    let csv = "Name,Day 1,Time 1,Labor 1\nroof:,,,\nNorth slope,Felt,2,R1\nSouth slope,Felt,3,R1\n";
    let summary = ImportLogic::run(&mut pool.conn, &table(csv), &options("Job D")).expect("import");

    assert_eq!(summary.data_rows_seen, 0);
    let (rows, subsection): (i64, Option<String>) = pool
        .conn
        .query_row(
            "SELECT COUNT(*), MAX(subsection) FROM rows WHERE section = 'Roof'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("roof rows");
    assert_eq!(rows, 1);
    assert_eq!(subsection, None);

    // both lines hit the same cell, the later one wins
    let hours: f64 = pool
        .conn
        .query_row("SELECT hours FROM day_cells WHERE day = 1", [], |r| r.get(0))
        .expect("cell");
    assert_eq!(hours, 3.0);
}

#[test]
fn test_blank_subsection_and_unparseable_hours() {
    let mut pool = memory_db();
    let csv = "Name,Day 1,Time 1,Labor 1\nWaste Removal,,,\n,Haul,2,W1\nSkip bin,Swap,two,\nEmpty line,,,\n";
    let summary = ImportLogic::run(&mut pool.conn, &table(csv), &options("Job E")).expect("import");

    // blank label skipped; the all-empty line still gets its row
    assert_eq!(summary.data_rows_seen, 2);
    assert_eq!(summary.cells_written, 1);

    let (task, hours, labor): (Option<String>, Option<f64>, Option<String>) = pool
        .conn
        .query_row("SELECT task, hours, labor_code FROM day_cells", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
        })
        .expect("cell");
    assert_eq!(task.as_deref(), Some("Swap"));
    assert_eq!(hours, None);
    assert_eq!(labor, None);
}

#[test]
fn test_missing_day_columns_aborts_before_writing() {
    let mut pool = memory_db();
    let csv = "Name,Task,Hours\nOutside,,\nEntry,Demo,4\n";
    let err = ImportLogic::run(&mut pool.conn, &table(csv), &options("Job F")).unwrap_err();
    assert!(matches!(err, AppError::NoDayColumns));

    let sheets: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM sheets", [], |r| r.get(0))
        .expect("count");
    assert_eq!(sheets, 0);
}

#[test]
fn test_empty_input_is_rejected() {
    let err = RawTable::from_reader("".as_bytes()).unwrap_err();
    assert!(matches!(err, AppError::EmptyInput(_)));
}

#[test]
fn test_dry_run_leaves_nothing_behind() {
    let mut pool = memory_db();
    let mut opts = options("Dry");
    opts.dry_run = true;
    let summary = ImportLogic::run(&mut pool.conn, &table(SCHEDULE_CSV), &opts).expect("dry run");
    assert_eq!(summary.cells_written, 6);

    for tbl in ["sheets", "rows", "day_cells"] {
        let n: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {tbl}"), [], |r| r.get(0))
            .expect("count");
        assert_eq!(n, 0, "{tbl} should be empty after a dry run");
    }
}

#[test]
fn test_label_column_inferred_and_forced() {
    let mut pool = memory_db();
    let csv = "Code,Name,Day 1\n1,Outside,\n2,Entry,Demo\n";
    let summary = ImportLogic::run(&mut pool.conn, &table(csv), &options("Inferred")).expect("import");
    assert_eq!(summary.label_column, 1);
    assert_eq!(summary.cells_written, 1);

    let mut forced = options("Forced");
    forced.label_column = Some(0);
    let summary = ImportLogic::run(&mut pool.conn, &table(csv), &forced).expect("import");
    assert_eq!(summary.section_rows_seen, 0);
    assert_eq!(summary.cells_written, 0);

    forced.label_column = Some(9);
    let err = ImportLogic::run(&mut pool.conn, &table(csv), &forced).unwrap_err();
    assert!(matches!(err, AppError::InvalidLabelColumn { index: 9, width: 3 }));
}

#[test]
fn test_import_is_audited() {
    let mut pool = memory_db();
    ImportLogic::run(&mut pool.conn, &table(SCHEDULE_CSV), &options("Audited")).expect("import");

    let (actor, payload): (String, String) = pool
        .conn
        .query_row(
            "SELECT actor, payload FROM audit_log WHERE action = 'csv_import'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("audit entry");
    assert_eq!(actor, "tester");
    let payload: serde_json::Value = serde_json::from_str(&payload).expect("json payload");
    assert_eq!(payload["summary"]["cells_written"], 6);
    assert_eq!(payload["summary"]["sections_found"][0], "Outside");
}

#[test]
fn test_cli_import_prints_summary() {
    let db = TestDb::initialized();
    let csv = db.write_file("schedule.csv", SCHEDULE_CSV);

    sg().args(["--db", &db.path, "import", "--csv", &csv, "--sheet", "Main St"])
        .assert()
        .success()
        .stdout(contains("Scanned rows: 8"))
        .stdout(contains("Section header rows seen: 3 -> Outside, Ground Floor, Roof"))
        .stdout(contains("Upserted 6 day-cells"));

    assert_eq!(db.count("SELECT COUNT(*) FROM day_cells"), 6);
    assert_eq!(db.count("SELECT COUNT(*) FROM sheets WHERE name = 'Main St'"), 1);
}

#[test]
fn test_cli_import_dry_run() {
    let db = TestDb::initialized();
    let csv = db.write_file("schedule.csv", SCHEDULE_CSV);

    sg().args(["--db", &db.path, "import", "--csv", &csv, "--sheet", "Main St", "--dry"])
        .assert()
        .success()
        .stdout(contains("DRY RUN: would upsert 6 day-cells"));

    assert_eq!(db.count("SELECT COUNT(*) FROM day_cells"), 0);
}

#[test]
fn test_cli_import_without_day_columns_fails() {
    let db = TestDb::initialized();
    let csv = db.write_file("bad.csv", "Name,Notes\nOutside,\nEntry,x\n");

    sg().args(["--db", &db.path, "import", "--csv", &csv, "--sheet", "Bad"])
        .assert()
        .failure()
        .stderr(contains("Day N"));

    assert_eq!(db.count("SELECT COUNT(*) FROM sheets"), 0);
}

#[test]
fn test_cli_print_headers_and_dump_names() {
    let db = TestDb::initialized();
    let csv = db.write_file("schedule.csv", SCHEDULE_CSV);

    sg().args(["--db", &db.path, "import", "--csv", &csv, "--sheet", "X", "--print-headers"])
        .assert()
        .success()
        .stdout(contains("Chosen label/section column index: 0 (inferred)"))
        .stdout(contains("Day 2: day_idx=4, time_idx=Some(5), labor_idx=Some(6)"));

    sg().args(["--db", &db.path, "import", "--csv", &csv, "--sheet", "X", "--dump-names", "2"])
        .assert()
        .success()
        .stdout(contains("[0] \"Outside\" -> \"outside\"").and(contains("[1] \"Entry\"")));

    assert_eq!(db.count("SELECT COUNT(*) FROM sheets"), 0);
}

#[test]
fn test_cli_dump_names_zero_still_imports() {
    let db = TestDb::initialized();
    let csv = db.write_file("schedule.csv", SCHEDULE_CSV);

    sg().args([
        "--db", &db.path, "import", "--csv", &csv, "--sheet", "Main St", "--dump-names", "0",
    ])
    .assert()
    .success()
    .stdout(contains("Upserted 6 day-cells"));

    assert_eq!(db.count("SELECT COUNT(*) FROM day_cells"), 6);
}
