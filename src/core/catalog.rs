use crate::db::rows::distinct_subsections;
use crate::db::sheets;
use crate::errors::AppResult;
use crate::models::section::{NO_SUBSECTION, Section};
use crate::models::sheet::Sheet;
use rusqlite::Connection;

/// Listings backing the editor's sheet/section/subsection pickers.
pub struct CatalogLogic;

impl CatalogLogic {
    pub fn list_sheets(conn: &Connection) -> AppResult<Vec<Sheet>> {
        sheets::list_sheets(conn)
    }

    /// Always the full registry, whatever rows the sheet holds.
    pub fn list_sections() -> Vec<&'static str> {
        Section::names()
    }

    pub fn list_subsections(
        conn: &Connection,
        sheet_id: i64,
        section: Section,
    ) -> AppResult<Vec<String>> {
        if section.is_singleton() {
            return Ok(vec![NO_SUBSECTION.to_string()]);
        }
        distinct_subsections(conn, sheet_id, section)
    }
}
