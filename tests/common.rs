#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use sitegrid::db::initialize::init_db;
use sitegrid::db::pool::DbPool;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The CLI under test, isolated from any real `SITEGRID_DB`.
pub fn sg() -> Command {
    let mut cmd = cargo_bin_cmd!("sitegrid");
    cmd.env_remove("SITEGRID_DB").env("RUST_LOG", "off");
    cmd
}

/// A scratch directory holding one database file (and any input files).
pub struct TestDb {
    pub dir: TempDir,
    pub path: String,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir
            .path()
            .join("sitegrid.sqlite")
            .to_string_lossy()
            .to_string();
        Self { dir, path }
    }

    /// Same as `new`, with the schema created through `init`.
    pub fn initialized() -> Self {
        let db = Self::new();
        sg().args(["--db", &db.path, "--test", "init"])
            .assert()
            .success();
        db
    }

    /// Write `content` next to the database and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> String {
        let p: PathBuf = self.dir.path().join(name);
        fs::write(&p, content).expect("write input file");
        p.to_string_lossy().to_string()
    }

    pub fn open(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(&self.path).expect("open db")
    }

    pub fn count(&self, sql: &str) -> i64 {
        self.open()
            .query_row(sql, [], |row| row.get(0))
            .expect("count query")
    }
}

/// Fresh in-memory database with the full schema.
pub fn memory_db() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Small schedule export: two Outside line items, a Roof block and a
/// Ground Floor block, two days wide.
pub const SCHEDULE_CSV: &str = "\
Name,Day 1,Time 1,Labor 1,Day 2,Time 2,Labor 2
Outside,,,,,,
Entry,Demo,4.5,L1,,,
Driveway,Grade,\"1,000\",L2,Pour,6,L3
Roof,,,,,,
Shingles,Tear off,8,R1,,,
,,,,Install,7.5,R2
Ground Floor,,,,,,
Kitchen,Cabinets,3,C1,,,
";
