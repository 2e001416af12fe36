use crate::cli::commands::{open_db, parse_section};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::errors::AppResult;
use crate::ui::messages::print_json;

/// Handle the `sheets`, `sections` and `subsections` listings.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Sheets => {
            let pool = open_db(cfg)?;
            print_json(&CatalogLogic::list_sheets(&pool.conn)?)
        }
        Commands::Sections { .. } => print_json(&CatalogLogic::list_sections()),
        Commands::Subsections { sheet, section } => {
            let section = parse_section(section)?;
            let pool = open_db(cfg)?;
            print_json(&CatalogLogic::list_subsections(&pool.conn, *sheet, section)?)
        }
        _ => Ok(()),
    }
}
