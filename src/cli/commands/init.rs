use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::audit;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing sitegrid…");
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    success(format!("Database initialized at {}", &db_path));

    // audit entry (non-blocking)
    let payload = serde_json::json!({ "database": &db_path });
    if let Err(e) = audit::write_audit(&pool.conn, "system", "init", &payload) {
        warning(format!("Failed to write audit entry: {}", e));
    }

    Ok(())
}
