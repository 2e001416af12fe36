use crate::cli::commands::{actor, open_db};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::write::WriteLogic;
use crate::errors::AppResult;
use crate::models::cell::BulkPayload;
use crate::ui::messages::print_json;
use crate::utils::path::expand_tilde;
use std::fs;
use std::io::{self, Read};

/// Handle the `write` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Write { file, user } = cmd {
        let body = if file == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(expand_tilde(file))?
        };

        // Malformed input is rejected before the database is touched.
        let payload: BulkPayload = serde_json::from_str(&body)?;

        let mut pool = open_db(cfg)?;
        let updated = WriteLogic::bulk_upsert(&mut pool.conn, &actor(user, cfg), &payload.records)?;

        print_json(&serde_json::json!({ "updated": updated }))?;
    }

    Ok(())
}
