//! CSV backfill: raw table reading, column layout discovery and the
//! reconciliation pass that writes rows and cells.

pub mod columns;
pub mod logic;
pub mod table;

pub use columns::{ColumnLayout, DayColumns};
pub use logic::{ImportLogic, ImportOptions, ImportSummary};
pub use table::RawTable;
