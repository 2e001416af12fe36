//! Header inspection: which columns carry the per-day triples and which one
//! carries section/subsection labels.

use crate::core::labels::is_section_label;
use crate::errors::{AppError, AppResult};
use crate::import::table::RawTable;
use crate::utils::text::norm_spaces;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Body rows sampled when guessing the label column.
pub const LABEL_SCAN_LIMIT: usize = 300;

static TRIPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(day|time|labor)\s*(\d+)\s*$").expect("valid header pattern")
});

/// Column indices for one day. Only the task column is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumns {
    pub task: usize,
    pub hours: Option<usize>,
    pub labor: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub days: BTreeMap<u32, DayColumns>,
    pub label_column: usize,
    /// False when the label column was forced by the caller.
    pub label_inferred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Day,
    Time,
    Labor,
}

fn classify(header: &str) -> Option<(Kind, u32)> {
    let caps = TRIPLE_RE.captures(header)?;
    let n: u32 = caps[2].parse().ok().filter(|n| *n > 0)?;
    let kind = match caps[1].to_ascii_lowercase().as_str() {
        "day" => Kind::Day,
        "time" => Kind::Time,
        _ => Kind::Labor,
    };
    Some((kind, n))
}

/// Map day number → columns. `Time N` / `Labor N` without a matching
/// `Day N` are ignored; a repeated header keeps its last occurrence.
pub fn map_day_columns(header: &[String]) -> BTreeMap<u32, DayColumns> {
    let mut tasks = BTreeMap::new();
    let mut hours = BTreeMap::new();
    let mut labor = BTreeMap::new();

    for (idx, h) in header.iter().enumerate() {
        match classify(&norm_spaces(h)) {
            Some((Kind::Day, d)) => {
                tasks.insert(d, idx);
            }
            Some((Kind::Time, d)) => {
                hours.insert(d, idx);
            }
            Some((Kind::Labor, d)) => {
                labor.insert(d, idx);
            }
            None => {}
        }
    }

    tasks
        .into_iter()
        .map(|(d, task)| {
            let cols = DayColumns {
                task,
                hours: hours.get(&d).copied(),
                labor: labor.get(&d).copied(),
            };
            (d, cols)
        })
        .collect()
}

/// Best-effort guess: the column whose first [`LABEL_SCAN_LIMIT`] body cells
/// name the most registry sections. Ties go to the lowest index.
pub fn infer_label_column(width: usize, rows: &[Vec<String>]) -> usize {
    let sample = &rows[..rows.len().min(LABEL_SCAN_LIMIT)];

    let mut best = (0, 0usize);
    for col in 0..width {
        let hits = sample
            .iter()
            .filter(|row| is_section_label(RawTable::cell(row, col)))
            .count();
        if hits > best.1 {
            best = (col, hits);
        }
    }

    tracing::debug!(column = best.0, hits = best.1, "inferred label column");
    best.0
}

impl ColumnLayout {
    /// Inspect the table layout. Fails before anything is written when no
    /// `Day N` column exists or a forced label column is out of range.
    pub fn detect(table: &RawTable, label_override: Option<usize>) -> AppResult<Self> {
        let layout = Self::scan(table, label_override)?;
        if layout.days.is_empty() {
            return Err(AppError::NoDayColumns);
        }
        Ok(layout)
    }

    /// Like [`ColumnLayout::detect`] but an empty day map is not an error;
    /// used by the header diagnostics.
    pub fn scan(table: &RawTable, label_override: Option<usize>) -> AppResult<Self> {
        let width = table.header.len();

        let (label_column, label_inferred) = match label_override {
            Some(index) if index >= width => {
                return Err(AppError::InvalidLabelColumn { index, width });
            }
            Some(index) => (index, false),
            None => (infer_label_column(width, &table.rows), true),
        };

        Ok(Self {
            days: map_day_columns(&table.header),
            label_column,
            label_inferred,
        })
    }
}
