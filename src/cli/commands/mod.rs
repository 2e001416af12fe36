pub mod block;
pub mod catalog;
pub mod config;
pub mod db;
pub mod import;
pub mod init;
pub mod log;
pub mod write;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::section::Section;

/// Open the configured database with its schema up to date.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Resolve a section name typed by the user through the canonicalizer.
pub(crate) fn parse_section(raw: &str) -> AppResult<Section> {
    Section::from_label(raw).ok_or_else(|| {
        AppError::InvalidSection(format!(
            "'{}' (expected one of: {})",
            raw,
            Section::names().join(", ")
        ))
    })
}

/// Caller identity for audit entries: flag, else the configured default.
pub(crate) fn actor(user: &Option<String>, cfg: &Config) -> String {
    user.clone()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| cfg.default_actor.clone())
}
