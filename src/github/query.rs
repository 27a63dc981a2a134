//! GitHub search query construction

use crate::types::SearchFilter;

/// Build the GitHub search DSL string for a filter
///
/// Clauses are space separated in a fixed order: language, stars, forks.
/// A range clause is `field:min..max` when a maximum is given,
/// `field:>=min` when only a non-zero minimum is given, and omitted
/// otherwise.
pub fn build_query(filter: &SearchFilter) -> String {
    let mut parts = vec![format!("language:{}", filter.language)];

    if let Some(clause) = range_clause("stars", filter.stars_min, filter.stars_max) {
        parts.push(clause);
    }
    if let Some(clause) = range_clause("forks", filter.forks_min, filter.forks_max) {
        parts.push(clause);
    }

    parts.join(" ")
}

fn range_clause(field: &str, min: u64, max: Option<u64>) -> Option<String> {
    match max {
        Some(max) => Some(format!("{field}:{min}..{max}")),
        None if min > 0 => Some(format!("{field}:>={min}")),
        None => None,
    }
}
