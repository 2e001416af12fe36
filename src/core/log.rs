use crate::db::audit::list_audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));

/// Widest payload shown before truncation.
const PAYLOAD_W: usize = 60;

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Colour per audited action
fn color_for_action(action: &str) -> Colour {
    match action {
        "bulk_upsert" => Colour::Green,
        "csv_import" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t = s.chars().take(max - 3).collect::<String>();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_audit_log(pool: &DbPool) -> AppResult<()> {
        let entries = list_audit(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Audit log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.created_at.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| e.action.len() + e.actor.len() + 3)
            .max()
            .unwrap_or(10);

        println!("📜 Audit log:\n");

        for e in entries {
            let colored = format!(
                "{} ({})",
                color_for_action(&e.action).paint(e.action.as_str()),
                e.actor
            );

            // padding computed on the visible text, without ANSI codes
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.created_at,
                colored,
                padding,
                truncate(&e.payload, PAYLOAD_W),
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
