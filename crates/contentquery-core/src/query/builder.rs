//! Fluent construction of [`QuerySpec`].

use super::args::{coerce_nullable, Argument};
use super::spec::{Limit, QuerySpec};
use crate::error::Result;
use crate::uri::ContentUri;

/// Accumulates query fields. Setting a field twice keeps the last value.
///
/// `build` performs no validation: it snapshots whatever has been set so far
/// and leaves the builder usable.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    target: Option<ContentUri>,
    projection: Option<Vec<String>>,
    predicate: Option<String>,
    arguments: Vec<String>,
    sort_column: Option<String>,
    ascending: bool,
    limit: Limit,
}

impl QueryBuilder {
    /// Creates a builder with every field unset, descending order and no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table or row URI to read.
    pub fn target(mut self, uri: ContentUri) -> Self {
        self.target = Some(uri);
        self
    }

    /// Sets the requested columns.
    pub fn projection<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the filter expression. Use `?` for each argument.
    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Sets the placeholder arguments, coercing each to its string form.
    ///
    /// ```rust
    /// use contentquery_core::{args, QuerySpec};
    ///
    /// let spec = QuerySpec::builder()
    ///     .predicate("media_type=? or media_type=?")
    ///     .arguments(args![1, 3])
    ///     .build();
    /// assert_eq!(spec.arguments(), ["1", "3"]);
    /// ```
    pub fn arguments<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Argument>,
    {
        self.arguments = values
            .into_iter()
            .map(|value| value.into().into_string())
            .collect();
        self
    }

    /// Like [`arguments`](Self::arguments) for values that may be null.
    ///
    /// Fails with [`Error::ArgumentCoercion`](crate::Error::ArgumentCoercion)
    /// on the first `None`; the builder is consumed either way.
    pub fn try_arguments<I, T>(mut self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<Argument>,
    {
        self.arguments = coerce_nullable(values)?
            .into_iter()
            .map(Argument::into_string)
            .collect();
        Ok(self)
    }

    /// Sets the column to sort on.
    pub fn sort(mut self, column: impl Into<String>) -> Self {
        self.sort_column = Some(column.into());
        self
    }

    /// Sets the sort direction.
    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    /// Caps the number of rows returned.
    pub fn limit(mut self, limit: impl Into<Limit>) -> Self {
        self.limit = limit.into();
        self
    }

    /// Removes any row cap.
    pub fn no_limit(mut self) -> Self {
        self.limit = Limit::Unbounded;
        self
    }

    /// Snapshots the current fields into a [`QuerySpec`].
    pub fn build(&self) -> QuerySpec {
        QuerySpec {
            target: self.target.clone(),
            projection: self.projection.clone(),
            predicate: self.predicate.clone(),
            arguments: self.arguments.clone(),
            sort_column: self.sort_column.clone(),
            ascending: self.ascending,
            limit: self.limit,
        }
    }
}
