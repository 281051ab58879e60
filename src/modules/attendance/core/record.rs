// Attendance data extracted from one uploaded spreadsheet.
//
// Purpose
// - Cell is the grid value handed over by a spreadsheet reader.
// - AttendanceRecord is one accepted row, AttendanceTable the lookup structure built from all rows.
//
// Boundaries
// - No input or output. The table is filled once during ingestion and shared read-only afterwards.

use crate::modules::attendance::core::identifier::normalize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Text as displayed in a sheet, trimmed. Integral numbers render without a fraction.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.trim().to_string(),
            Cell::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                format!("{}", *value as i64)
            }
            Cell::Number(value) => value.to_string(),
            Cell::Bool(value) => value.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(_) | Cell::Bool(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub identifier: String,
    pub normalized_identifier: String,
    pub percentage: f64,
    pub subject_breakdown: BTreeMap<String, String>,
}

impl AttendanceRecord {
    pub fn new(
        identifier: impl Into<String>,
        percentage: f64,
        subject_breakdown: BTreeMap<String, String>,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            normalized_identifier: normalize(&identifier),
            identifier,
            percentage,
            subject_breakdown,
        }
    }
}

/// What happens when a sheet lists the same identifier twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later row replaces the earlier one but keeps its position.
    #[default]
    LastRowWins,
    FirstRowWins,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last-row-wins" => Ok(DuplicatePolicy::LastRowWins),
            "first-row-wins" => Ok(DuplicatePolicy::FirstRowWins),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

/// Records keyed by normalized identifier, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceTable {
    records: Vec<AttendanceRecord>,
    index: HashMap<String, usize>,
}

impl AttendanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the record was a duplicate that the policy discarded.
    pub fn insert(&mut self, record: AttendanceRecord, policy: DuplicatePolicy) -> bool {
        match self.index.get(&record.normalized_identifier) {
            Some(&position) => match policy {
                DuplicatePolicy::LastRowWins => {
                    self.records[position] = record;
                    true
                }
                DuplicatePolicy::FirstRowWins => false,
            },
            None => {
                self.index
                    .insert(record.normalized_identifier.clone(), self.records.len());
                self.records.push(record);
                true
            }
        }
    }

    pub fn get(&self, normalized_identifier: &str) -> Option<&AttendanceRecord> {
        self.index
            .get(normalized_identifier)
            .map(|&position| &self.records[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<AttendanceRecord> for AttendanceTable {
    fn from_iter<T: IntoIterator<Item = AttendanceRecord>>(iter: T) -> Self {
        let mut table = AttendanceTable::new();
        for record in iter {
            table.insert(record, DuplicatePolicy::LastRowWins);
        }
        table
    }
}
