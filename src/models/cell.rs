use serde::{Deserialize, Serialize};

/// One full-replace write of a day cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row_id: i64,
    pub day: u32,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub labor_code: Option<String>,
}

impl CellRecord {
    pub fn new(
        row_id: i64,
        day: u32,
        task: Option<String>,
        hours: Option<f64>,
        labor_code: Option<String>,
    ) -> Self {
        Self {
            row_id,
            day,
            task,
            hours,
            labor_code,
        }
    }

    /// All three fields null.
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.hours.is_none() && self.labor_code.is_none()
    }
}

/// Body of a bulk write request.
#[derive(Debug, Default, Deserialize)]
pub struct BulkPayload {
    #[serde(default)]
    pub records: Vec<CellRecord>,
}
