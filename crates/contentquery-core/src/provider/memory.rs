//! In-memory provider backed by the fragment engine.

use super::observer::{ChangeCallback, ObserverId, ObserverRegistry};
use super::{ObservableProvider, Provider, QueryRequest};
use crate::cursor::Cursor;
use crate::engine::{
    BinaryOperator, Executor, Expression, Literal, LogicalOperator, Parser, Planner, ReadQuery,
    Table,
};
use crate::error::{Error, ProviderError, Result};
use crate::uri::ContentUri;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace, warn};

const ID_COLUMN: &str = "_id";

/// Provider behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Reject requests whose argument count differs from the placeholders
    pub strict_arguments: bool,
    /// Make LIKE compare case-sensitively
    pub case_sensitive_like: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            strict_arguments: true,
            case_sensitive_like: false,
        }
    }
}

impl ProviderConfig {
    /// Sets [`strict_arguments`](Self::strict_arguments).
    pub fn with_strict_arguments(mut self, strict: bool) -> Self {
        self.strict_arguments = strict;
        self
    }

    /// Sets [`case_sensitive_like`](Self::case_sensitive_like).
    pub fn with_case_sensitive_like(mut self, enabled: bool) -> Self {
        self.case_sensitive_like = enabled;
        self
    }
}

/// Tables held in memory, one per content URI.
///
/// Cloning yields another handle to the same tables and observers.
#[derive(Clone, Debug)]
pub struct MemoryProvider {
    inner: Arc<ProviderInner>,
}

#[derive(Debug)]
struct ProviderInner {
    config: ProviderConfig,
    tables: RwLock<HashMap<ContentUri, Table>>,
    observers: ObserverRegistry,
}

impl MemoryProvider {
    /// Creates an empty provider with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProviderConfig::default())
    }

    /// Creates an empty provider.
    pub fn with_config(config: ProviderConfig) -> Self {
        MemoryProvider {
            inner: Arc::new(ProviderInner {
                config,
                tables: RwLock::new(HashMap::new()),
                observers: ObserverRegistry::new(),
            }),
        }
    }

    /// The provider's configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.inner.config
    }

    /// Registers an empty table under `uri`.
    pub fn create_table<I, S>(&self, uri: &ContentUri, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tables = self.inner.tables.write().map_err(|_| Error::LockPoisoned)?;
        if tables.contains_key(uri) {
            return Err(ProviderError::DuplicateTable(uri.to_string()).into());
        }
        let columns = columns.into_iter().map(Into::into).collect();
        tables.insert(uri.clone(), Table::new(columns));
        Ok(())
    }

    /// Appends a row and notifies observers of `uri`.
    ///
    /// Returns the row's `_id` when the table has an integer `_id` column,
    /// otherwise its 1-based row number.
    pub fn insert<I>(&self, uri: &ContentUri, values: I) -> Result<i64>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let id = {
            let mut tables = self.inner.tables.write().map_err(|_| Error::LockPoisoned)?;
            let table = tables
                .get_mut(uri)
                .ok_or_else(|| ProviderError::UnknownTable(uri.to_string()))?;

            if values.len() != table.columns.len() {
                return Err(ProviderError::RowWidth {
                    expected: table.columns.len(),
                    found: values.len(),
                }
                .into());
            }

            let id = table
                .columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(ID_COLUMN))
                .and_then(|i| values[i].as_i64());
            table.rows.push(values);
            id.unwrap_or(table.rows.len() as i64)
        };

        self.notify_change(uri)?;
        Ok(id)
    }

    /// Invokes the observers matching `uri`, returning how many ran.
    pub fn notify_change(&self, uri: &ContentUri) -> Result<usize> {
        let notified = self.inner.observers.notify(uri)?;
        debug!(uri = %uri, observers = notified, "change notified");
        Ok(notified)
    }

    /// Number of rows in the table at `uri`.
    pub fn row_count(&self, uri: &ContentUri) -> Result<usize> {
        let tables = self.inner.tables.read().map_err(|_| Error::LockPoisoned)?;
        tables
            .get(uri)
            .map(|t| t.rows.len())
            .ok_or_else(|| ProviderError::UnknownTable(uri.to_string()).into())
    }

    fn bind_arguments(&self, parameters: usize, args: &[String]) -> Result<Vec<Value>> {
        if args.len() != parameters {
            if self.inner.config.strict_arguments {
                return Err(ProviderError::ArgumentCount {
                    expected: parameters,
                    found: args.len(),
                }
                .into());
            }
            warn!(
                expected = parameters,
                found = args.len(),
                "argument count mismatch, binding leniently"
            );
        }
        Ok(args
            .iter()
            .take(parameters)
            .map(|arg| Value::Text(arg.clone()))
            .collect())
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the table for `uri`, or for its parent when `uri` names one row.
fn resolve_table<'t>(
    tables: &'t HashMap<ContentUri, Table>,
    uri: &ContentUri,
) -> Result<(&'t Table, Option<i64>)> {
    if let Some(table) = tables.get(uri) {
        return Ok((table, None));
    }
    if let (Some(id), Some(parent)) = (uri.last_id(), uri.parent()) {
        if let Some(table) = tables.get(&parent) {
            return Ok((table, Some(id)));
        }
    }
    Err(ProviderError::UnknownTable(uri.to_string()).into())
}

fn parse_fragment(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

impl Provider for MemoryProvider {
    fn query(&self, request: &QueryRequest<'_>) -> Result<Cursor> {
        let uri = request.uri.ok_or(ProviderError::MissingTarget)?;
        let tables = self.inner.tables.read().map_err(|_| Error::LockPoisoned)?;
        let (table, row_id) = resolve_table(&tables, uri)?;

        let mut query = ReadQuery {
            projection: request.projection.map(<[String]>::to_vec),
            ..Default::default()
        };

        let mut parameters = 0;
        if let Some(selection) = parse_fragment(request.selection) {
            let mut parser = Parser::new(selection).map_err(ProviderError::from)?;
            query.selection = Some(parser.parse_selection().map_err(ProviderError::from)?);
            parameters = parser.parameter_count();
        }

        if let Some(id) = row_id {
            let by_id = Expression::BinaryOp {
                left: Box::new(Expression::Column(ID_COLUMN.to_string())),
                op: BinaryOperator::Eq,
                right: Box::new(Expression::Literal(Literal::Integer(id))),
            };
            query.selection = Some(match query.selection.take() {
                Some(selection) => Expression::LogicalOp {
                    left: Box::new(by_id),
                    op: LogicalOperator::And,
                    right: Box::new(selection),
                },
                None => by_id,
            });
        }

        if let Some(sort_order) = parse_fragment(request.sort_order) {
            let mut parser = Parser::new(sort_order).map_err(ProviderError::from)?;
            query.sort_order = Some(parser.parse_sort_order().map_err(ProviderError::from)?);
        }

        let arguments = self.bind_arguments(parameters, request.selection_args)?;
        let plan = Planner::new(&table.columns)
            .plan(uri.as_str(), &query)
            .map_err(ProviderError::from)?;
        trace!(plan = %plan, arguments = arguments.len(), "executing provider read");

        let rows = Executor::new(table, &arguments)
            .with_case_sensitive_like(self.inner.config.case_sensitive_like)
            .execute(&plan)?;
        Ok(Cursor::new(plan.output, rows))
    }
}

impl ObservableProvider for MemoryProvider {
    fn register_observer(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        callback: ChangeCallback,
    ) -> Result<ObserverId> {
        let id = self
            .inner
            .observers
            .register(uri, notify_for_descendants, callback)?;
        debug!(uri = %uri, descendants = notify_for_descendants, "observer registered");
        Ok(id)
    }

    fn unregister_observer(&self, id: ObserverId) -> Result<bool> {
        self.inner.observers.unregister(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryExecutor, QuerySpec};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn files() -> ContentUri {
        ContentUri::parse("content://media/external/files").unwrap()
    }

    fn provider_with(config: ProviderConfig) -> MemoryProvider {
        let provider = MemoryProvider::with_config(config);
        provider
            .create_table(&files(), ["_id", "name", "size", "media_type"])
            .unwrap();
        let rows: [(i64, Option<&str>, i64, i64); 4] = [
            (1, Some("beach.jpg"), 300, 1),
            (2, Some("Clip.mp4"), 900, 3),
            (3, None, 100, 1),
            (4, Some("notes.txt"), 50, 0),
        ];
        for (id, name, size, media_type) in rows {
            provider
                .insert(
                    &files(),
                    [
                        Value::from(id),
                        Value::from(name),
                        Value::from(size),
                        Value::from(media_type),
                    ],
                )
                .unwrap();
        }
        provider
    }

    fn provider() -> MemoryProvider {
        provider_with(ProviderConfig::default())
    }

    fn ids(provider: &MemoryProvider, spec: &QuerySpec) -> Result<Vec<i64>> {
        QueryExecutor::new(provider).query_results(spec, |c| c.get_long(0))
    }

    #[test]
    fn test_filter_sort_limit() {
        let provider = provider();
        let spec = QuerySpec::builder()
            .target(files())
            .projection(["_id"])
            .predicate("media_type=? or media_type=?")
            .arguments([1, 3])
            .sort("size")
            .limit(2)
            .build();
        assert_eq!(ids(&provider, &spec).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_limit_without_sort_uses_first_column() {
        let provider = provider();
        let spec = QuerySpec::builder()
            .target(files())
            .projection(["_id", "name"])
            .limit(3)
            .build();
        assert_eq!(ids(&provider, &spec).unwrap(), vec![4, 3, 2]);

        let spec = QuerySpec::builder()
            .target(files())
            .projection(["_id"])
            .ascending(true)
            .limit(0)
            .build();
        assert!(ids(&provider, &spec).unwrap().is_empty());
    }

    #[test]
    fn test_ascending_sort_puts_null_first() {
        // Text compares bytewise, so "Clip.mp4" sorts before "beach.jpg".
        let provider = provider();
        let spec = QuerySpec::builder()
            .target(files())
            .projection(["_id"])
            .sort("name")
            .ascending(true)
            .build();
        assert_eq!(ids(&provider, &spec).unwrap(), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_item_uri_selects_one_row() {
        let provider = provider();
        let spec = QuerySpec::builder()
            .target(files().with_appended_id(2))
            .projection(["name"])
            .build();
        let names = QueryExecutor::new(&provider)
            .query_results(&spec, |c| c.get_string(0))
            .unwrap();
        assert_eq!(names, vec![Some("Clip.mp4".to_string())]);
    }

    #[test]
    fn test_unknown_sort_column_passes_through() {
        let provider = provider();
        let spec = QuerySpec::builder().target(files()).sort("bogus").build();
        let err = ids(&provider, &spec).unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::UnknownColumn(ref c)) if c == "bogus"
        ));
    }

    #[test]
    fn test_unknown_table_and_missing_target() {
        let provider = provider();
        let other = ContentUri::parse("content://media/external/audio").unwrap();
        let err = ids(&provider, &QuerySpec::builder().target(other).build()).unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::UnknownTable(_))
        ));

        let err = ids(&provider, &QuerySpec::builder().build()).unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::MissingTarget)
        ));
    }

    #[test]
    fn test_strict_argument_count() {
        let provider = provider();
        let spec = QuerySpec::builder()
            .target(files())
            .predicate("media_type=?")
            .arguments([1, 3])
            .build();
        let err = ids(&provider, &spec).unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::ArgumentCount {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_lenient_argument_count() {
        let provider = provider_with(ProviderConfig::default().with_strict_arguments(false));
        let spec = QuerySpec::builder()
            .target(files())
            .projection(["_id"])
            .predicate("media_type=?")
            .arguments([3, 1])
            .build();
        assert_eq!(ids(&provider, &spec).unwrap(), vec![2]);

        // A missing argument binds NULL, which matches nothing.
        let spec = QuerySpec::builder()
            .target(files())
            .predicate("media_type=?")
            .build();
        assert!(ids(&provider, &spec).unwrap().is_empty());
    }

    #[test]
    fn test_like_case_sensitivity() {
        let spec = QuerySpec::builder()
            .target(files())
            .projection(["_id"])
            .predicate("name LIKE ?")
            .arguments(["clip%"])
            .build();

        assert_eq!(ids(&provider(), &spec).unwrap(), vec![2]);

        let strict = provider_with(ProviderConfig::default().with_case_sensitive_like(true));
        assert!(ids(&strict, &spec).unwrap().is_empty());
    }

    #[test]
    fn test_syntax_errors() {
        let provider = provider();
        let bad_selection = QuerySpec::builder()
            .target(files())
            .predicate("size >")
            .build();
        assert!(matches!(
            ids(&provider, &bad_selection).unwrap_err(),
            Error::Provider(ProviderError::Syntax(_))
        ));

        let request = QueryRequest {
            uri: Some(&files()),
            sort_order: Some("LIMIT 5"),
            ..Default::default()
        };
        assert!(matches!(
            provider.query(&request).unwrap_err(),
            Error::Provider(ProviderError::Syntax(_))
        ));
    }

    #[test]
    fn test_insert_ids_and_width() {
        let provider = MemoryProvider::new();
        let plain = ContentUri::parse("content://settings/system").unwrap();
        provider.create_table(&plain, ["key", "value"]).unwrap();
        assert_eq!(provider.insert(&plain, ["a", "1"]).unwrap(), 1);
        assert_eq!(provider.insert(&plain, ["b", "2"]).unwrap(), 2);
        assert_eq!(provider.row_count(&plain).unwrap(), 2);

        let err = provider.insert(&plain, ["only one"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::RowWidth {
                expected: 2,
                found: 1
            })
        ));

        let err = provider.create_table(&plain, ["x"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::DuplicateTable(_))
        ));
    }

    #[test]
    fn test_insert_notifies_observers() {
        let provider = provider();
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let id = provider
            .register_observer(
                &files(),
                true,
                Arc::new(move |_: &ContentUri| {
                    seen.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        provider
            .insert(&files(), [Value::from(5), "x".into(), 1.into(), 1.into()])
            .unwrap();
        provider.notify_change(&files().with_appended_id(5)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert!(provider.unregister_observer(id).unwrap());
        provider.notify_change(&files()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
