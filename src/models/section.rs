use crate::core::labels::canonicalize;
use serde::{Serialize, Serializer};
use std::fmt;

/// Display placeholder for rows without a usable subsection.
pub const NO_SUBSECTION: &str = "(none)";

/// The fixed registry of top-level schedule sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Outside,
    GroundFloor,
    FirstFloor,
    Roof,
    WasteRemoval,
    StaffingExpenses,
    StaffingNeeded,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Outside,
        Section::GroundFloor,
        Section::FirstFloor,
        Section::Roof,
        Section::WasteRemoval,
        Section::StaffingExpenses,
        Section::StaffingNeeded,
    ];

    /// Registry name, also the value persisted in `rows.section`.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Outside => "Outside",
            Section::GroundFloor => "Ground Floor",
            Section::FirstFloor => "1st Floor",
            Section::Roof => "Roof",
            Section::WasteRemoval => "Waste Removal",
            Section::StaffingExpenses => "Staffing expenses",
            Section::StaffingNeeded => "Staffing Needed",
        }
    }

    /// Singleton sections have no subsection axis: one row per sheet.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Section::Roof | Section::StaffingExpenses)
    }

    pub fn canonical_key(&self) -> String {
        canonicalize(self.name())
    }

    /// Match raw label text (spreadsheet cell, CLI argument) against the registry.
    pub fn from_label(text: &str) -> Option<Self> {
        let key = canonicalize(text);
        if key.is_empty() {
            return None;
        }
        Section::ALL.into_iter().find(|s| s.canonical_key() == key)
    }

    pub fn names() -> Vec<&'static str> {
        Section::ALL.iter().map(Section::name).collect()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serialized as its registry name.
impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
