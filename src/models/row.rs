//! Row identity within a sheet.

use crate::models::section::{NO_SUBSECTION, Section};
use crate::utils::text::norm_spaces;
use serde::Serialize;

/// The (section, subsection) pair that identifies one row of a sheet.
///
/// Singleton sections never carry a subsection; every other section carries
/// a trimmed, non-blank one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowKey {
    section: Section,
    subsection: Option<String>,
}

impl RowKey {
    /// Build the key for an imported line. Returns `None` when a non-singleton
    /// section has a blank label: such lines have no usable row.
    pub fn new(section: Section, subsection: Option<&str>) -> Option<Self> {
        if section.is_singleton() {
            return Some(Self::singleton(section));
        }

        let sub = norm_spaces(subsection.unwrap_or_default());
        if sub.is_empty() {
            return None;
        }

        Some(Self {
            section,
            subsection: Some(sub),
        })
    }

    /// Key without a subsection: the single row of a singleton section.
    pub fn singleton(section: Section) -> Self {
        Self {
            section,
            subsection: None,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn subsection(&self) -> Option<&str> {
        self.subsection.as_deref()
    }
}

/// A persisted row, as listed by the catalog and block queries.
#[derive(Debug, Clone, Serialize)]
pub struct RowRecord {
    pub id: i64,
    pub sheet_id: i64,
    pub section: String,
    pub subsection: Option<String>,
    pub row_order: i64,
}

impl RowRecord {
    /// Subsection as shown to users: trimmed, or `(none)` when blank.
    pub fn display_subsection(&self) -> String {
        match self.subsection.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => NO_SUBSECTION.to_string(),
        }
    }
}
