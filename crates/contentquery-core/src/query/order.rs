//! ORDER BY / LIMIT clause synthesis.
//!
//! A provider receives a single sort-order fragment that is spliced after
//! `ORDER BY`. Its grammar is
//!
//! ```text
//! clause := (sortColumn | "1") " " ["DESC "] ["LIMIT " n]
//! ```
//!
//! and no fragment is produced when neither a sort column nor a limit is set.

use super::spec::{Limit, QuerySpec};

/// Synthesizes the sort-order fragment for the given fields.
///
/// ```rust
/// use contentquery_core::query::{synthesize_order_clause, Limit};
///
/// assert_eq!(
///     synthesize_order_clause(Some("name"), false, Limit::Unbounded).as_deref(),
///     Some("name DESC ")
/// );
/// assert_eq!(
///     synthesize_order_clause(None, false, Limit::Rows(5)).as_deref(),
///     Some("1 DESC LIMIT 5")
/// );
/// assert_eq!(synthesize_order_clause(None, true, Limit::Unbounded), None);
/// ```
pub fn synthesize_order_clause(
    sort_column: Option<&str>,
    ascending: bool,
    limit: Limit,
) -> Option<String> {
    if sort_column.is_none() && !limit.is_bounded() {
        return None;
    }

    let mut clause = String::new();
    match sort_column {
        Some(column) => clause.push_str(column),
        // LIMIT is only accepted after an ORDER BY term; order by the first
        // result column.
        None => clause.push('1'),
    }
    clause.push(' ');

    if !ascending {
        clause.push_str("DESC ");
    }

    if let Limit::Rows(rows) = limit {
        clause.push_str("LIMIT ");
        clause.push_str(&rows.to_string());
    }

    Some(clause)
}

impl QuerySpec {
    /// The sort-order fragment handed to the provider.
    pub fn order_clause(&self) -> Option<String> {
        synthesize_order_clause(self.sort_column(), self.is_ascending(), self.limit())
    }
}
