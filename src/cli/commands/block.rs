use crate::cli::commands::{open_db, parse_section};
use crate::cli::parser::{Commands, OutputFormat};
use crate::config::Config;
use crate::core::block::BlockLogic;
use crate::errors::AppResult;
use crate::models::block::{Block, BlockQuery, DayRange};
use crate::ui::messages::print_json;
use crate::utils::table::{Column, Table};
use crate::utils::text::format_hours;

/// Handle the `block` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Block {
        sheet,
        section,
        subsection,
        start,
        end,
        format,
    } = cmd
    {
        let query = BlockQuery {
            sheet_id: *sheet,
            section: parse_section(section)?,
            subsection: subsection.clone(),
            range: DayRange::new(
                start.unwrap_or(cfg.default_start_day),
                end.unwrap_or(cfg.default_end_day),
            )?,
        };

        let pool = open_db(cfg)?;
        let block = BlockLogic::read(&pool.conn, &query)?;

        match format {
            OutputFormat::Json => print_json(&block)?,
            OutputFormat::Table => print!("{}", render_table(&block, &query)),
        }
    }

    Ok(())
}

/// One line per row and day; missing values show as `--`.
fn render_table(block: &Block, query: &BlockQuery) -> String {
    let mut table = Table::new(vec![
        Column::new("Row"),
        Column::new("Subsection"),
        Column::new("Day"),
        Column::new("Task"),
        Column::new("Hours"),
        Column::new("Labor"),
    ]);

    for row in &block.rows {
        for day in query.range.days() {
            let Some(v) = row.day(day) else {
                continue;
            };
            let empty = "--".to_string();
            table.add_row(vec![
                row.row_id.to_string(),
                row.subsection.clone(),
                day.to_string(),
                v.task.clone().unwrap_or_else(|| empty.clone()),
                v.hours.map(format_hours).unwrap_or_else(|| empty.clone()),
                v.labor_code.clone().unwrap_or(empty),
            ]);
        }
    }

    table.render()
}
