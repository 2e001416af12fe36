//! Raw tabular input: a header row plus ragged body rows of text.

use crate::errors::{AppError, AppResult};
use crate::utils::text::norm_spaces;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Whitespace-normalized header cells.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read CSV without header interpretation. Rows may differ in width;
    /// invalid UTF-8 is replaced rather than rejected.
    pub fn from_reader<R: Read>(rdr: R) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(rdr);

        let mut records = Vec::new();
        for rec in reader.byte_records() {
            let rec = rec?;
            let fields: Vec<String> = rec
                .iter()
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect();
            records.push(fields);
        }

        let mut records = records.into_iter();
        let header = records
            .next()
            .ok_or_else(|| AppError::EmptyInput("no header row".to_string()))?;

        let header = header
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    norm_spaces(h.trim_start_matches(BOM))
                } else {
                    norm_spaces(h)
                }
            })
            .collect();

        Ok(Self {
            header,
            rows: records.collect(),
        })
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Cell text, or "" past the end of a short row.
    pub fn cell(row: &[String], idx: usize) -> &str {
        row.get(idx).map(String::as_str).unwrap_or("")
    }
}
