// Resolves a participation's student identifier against the attendance table.
//
// Order: exact key, then first key ending with the identifier, then first key containing it.
// Ties go to the first key in table order. Substring search needs at least
// MIN_SUBSTRING_LEN characters.

use crate::modules::attendance::core::identifier::normalize;
use crate::modules::attendance::core::record::AttendanceTable;
use serde::Serialize;

pub const MIN_SUBSTRING_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Exact,
    Suffix,
    Substring,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub key: String,
    pub percentage: f64,
    pub strategy: MatchStrategy,
}

pub fn resolve(student_identifier: &str, table: &AttendanceTable) -> Option<Match> {
    let needle = normalize(student_identifier);
    if needle.is_empty() {
        return None;
    }

    if let Some(record) = table.get(&needle) {
        return Some(Match {
            key: record.normalized_identifier.clone(),
            percentage: record.percentage,
            strategy: MatchStrategy::Exact,
        });
    }

    first_match(table, MatchStrategy::Suffix, |key| key.ends_with(&needle)).or_else(|| {
        if needle.len() >= MIN_SUBSTRING_LEN {
            first_match(table, MatchStrategy::Substring, |key| key.contains(&needle))
        } else {
            None
        }
    })
}

fn first_match(
    table: &AttendanceTable,
    strategy: MatchStrategy,
    hit: impl Fn(&str) -> bool,
) -> Option<Match> {
    table
        .iter()
        .find(|record| hit(&record.normalized_identifier))
        .map(|record| Match {
            key: record.normalized_identifier.clone(),
            percentage: record.percentage,
            strategy,
        })
}
