//! Immutable query specification.

use super::builder::QueryBuilder;
use crate::uri::ContentUri;
use std::fmt;

/// Row cap of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Limit {
    /// No cap
    #[default]
    Unbounded,
    /// At most this many rows
    Rows(u32),
}

/// The "no limit" sentinel.
pub const NO_LIMIT: Limit = Limit::Unbounded;

impl Limit {
    /// The row cap, if any.
    pub fn rows(self) -> Option<u32> {
        match self {
            Limit::Unbounded => None,
            Limit::Rows(n) => Some(n),
        }
    }

    /// True when a row cap is set.
    pub fn is_bounded(self) -> bool {
        matches!(self, Limit::Rows(_))
    }
}

impl From<u32> for Limit {
    fn from(rows: u32) -> Self {
        Limit::Rows(rows)
    }
}

impl From<Option<u32>> for Limit {
    fn from(rows: Option<u32>) -> Self {
        rows.map_or(Limit::Unbounded, Limit::Rows)
    }
}

/// Description of one read: target, projection, predicate, arguments,
/// ordering and row cap.
///
/// Built once by [`QueryBuilder`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub(super) target: Option<ContentUri>,
    pub(super) projection: Option<Vec<String>>,
    pub(super) predicate: Option<String>,
    pub(super) arguments: Vec<String>,
    pub(super) sort_column: Option<String>,
    pub(super) ascending: bool,
    pub(super) limit: Limit,
}

impl QuerySpec {
    /// Starts a builder with every field unset.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// Table or row the query reads.
    pub fn target(&self) -> Option<&ContentUri> {
        self.target.as_ref()
    }

    /// Requested columns, `None` for all columns.
    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    /// Filter with positional `?` placeholders.
    pub fn predicate(&self) -> Option<&str> {
        self.predicate.as_deref()
    }

    /// Arguments in their coerced string form.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Column to sort on.
    pub fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    /// Sort direction, `false` (descending) unless set.
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Row cap.
    pub fn limit(&self) -> Limit {
        self.limit
    }
}

fn or_null<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let projection = self.projection.as_ref().map(|p| p.join(", "));
        writeln!(f, "QuerySpec {{")?;
        writeln!(f, "  target: {}", or_null(self.target.as_ref()))?;
        writeln!(f, "  projection: [{}]", or_null(projection))?;
        writeln!(f, "  predicate: {}", or_null(self.predicate.as_ref()))?;
        writeln!(f, "  arguments: [{}]", self.arguments.join(", "))?;
        writeln!(f, "  sort: {}", or_null(self.sort_column.as_ref()))?;
        writeln!(f, "  ascending: {}", self.ascending)?;
        writeln!(f, "  limit: {}", or_null(self.limit.rows()))?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_conversions() {
        assert_eq!(Limit::from(10), Limit::Rows(10));
        assert_eq!(Limit::from(None), NO_LIMIT);
        assert_eq!(Limit::default(), NO_LIMIT);
        assert_eq!(Limit::Rows(3).rows(), Some(3));
        assert!(!NO_LIMIT.is_bounded());
    }

    #[test]
    fn test_display_lists_every_field() {
        let spec = QuerySpec::builder()
            .predicate("parent=?")
            .arguments([7])
            .limit(2)
            .build();
        let text = spec.to_string();
        assert!(text.contains("target: null"));
        assert!(text.contains("predicate: parent=?"));
        assert!(text.contains("arguments: [7]"));
        assert!(text.contains("limit: 2"));
    }
}
