//! Rectangular rows × days view of a sheet section.

use crate::errors::{AppError, AppResult};
use crate::models::section::Section;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Widest window a single block read may span.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Inclusive, 1-based day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: u32,
    pub end: u32,
}

impl DayRange {
    /// Both bounds must be at least 1 and the window at most
    /// [`MAX_WINDOW_DAYS`] wide. `start > end` is legal and yields no days.
    pub fn new(start: u32, end: u32) -> AppResult<Self> {
        if start == 0 || end == 0 {
            return Err(AppError::InvalidDayRange(format!(
                "days are 1-based (got start={start}, end={end})"
            )));
        }
        if end >= start && end - start >= MAX_WINDOW_DAYS {
            return Err(AppError::InvalidDayRange(format!(
                "window {start}..{end} is wider than {MAX_WINDOW_DAYS} days"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn days(self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

#[derive(Debug, Clone)]
pub struct BlockQuery {
    pub sheet_id: i64,
    pub section: Section,
    /// Blank or `(none)` selects every row of the section.
    pub subsection: Option<String>,
    pub range: DayRange,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayValue {
    pub task: Option<String>,
    pub hours: Option<f64>,
    pub labor_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BlockRow {
    pub row_id: i64,
    pub section: String,
    pub subsection: String,
    pub start_day: u32,
    /// One entry per day of the range, starting at `start_day`.
    pub days: Vec<DayValue>,
}

impl BlockRow {
    pub fn day(&self, day: u32) -> Option<&DayValue> {
        day.checked_sub(self.start_day)
            .and_then(|offset| self.days.get(offset as usize))
    }
}

/// Flat `day_{d}_task` / `day_{d}_time` / `day_{d}_labor` keys, matching the
/// grid editor's column naming.
impl Serialize for BlockRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.days.len() * 3))?;
        map.serialize_entry("row_id", &self.row_id)?;
        map.serialize_entry("section", &self.section)?;
        map.serialize_entry("subsection", &self.subsection)?;
        for (offset, value) in self.days.iter().enumerate() {
            let d = self.start_day as usize + offset;
            map.serialize_entry(&format!("day_{d}_task"), &value.task)?;
            map.serialize_entry(&format!("day_{d}_time"), &value.hours)?;
            map.serialize_entry(&format!("day_{d}_labor"), &value.labor_code)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Block {
    pub rows: Vec<BlockRow>,
}
