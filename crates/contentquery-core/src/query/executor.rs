//! Runs a [`QuerySpec`] against a [`Provider`].

use super::spec::QuerySpec;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::provider::{Provider, QueryRequest};
use tracing::debug;

/// Issues query specs against one provider.
///
/// Provider failures are returned unchanged.
#[derive(Debug, Clone)]
pub struct QueryExecutor<P> {
    provider: P,
}

impl<P: Provider> QueryExecutor<P> {
    /// Wraps a provider. Pass `&provider` to keep ownership.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Issues one request and returns the provider's cursor.
    pub fn execute(&self, spec: &QuerySpec) -> Result<Cursor> {
        let sort_order = spec.order_clause();
        let request = QueryRequest {
            uri: spec.target(),
            projection: spec.projection(),
            selection: spec.predicate(),
            selection_args: spec.arguments(),
            sort_order: sort_order.as_deref(),
        };

        debug!(
            uri = spec.target().map(|u| u.as_str()).unwrap_or("<none>"),
            selection = spec.predicate().unwrap_or(""),
            arguments = spec.arguments().len(),
            sort_order = sort_order.as_deref().unwrap_or(""),
            "issuing query"
        );

        self.provider.query(&request)
    }

    /// Issues one request and maps every row, in cursor order.
    ///
    /// The mapper sees the cursor positioned on each row in turn. The first
    /// mapper error stops iteration and is returned.
    pub fn query_results<T, F>(&self, spec: &QuerySpec, mut mapper: F) -> Result<Vec<T>>
    where
        F: FnMut(&Cursor) -> Result<T>,
    {
        let mut cursor = self.execute(spec)?;
        let mut results = Vec::with_capacity(cursor.count());
        while cursor.move_to_next() {
            results.push(mapper(&cursor)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ProviderError};
    use crate::uri::ContentUri;
    use crate::value::Value;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Recorded {
        uri: Option<String>,
        projection: Option<Vec<String>>,
        selection: Option<String>,
        selection_args: Vec<String>,
        sort_order: Option<String>,
    }

    #[derive(Default)]
    struct RecordingProvider {
        requests: Mutex<Vec<Recorded>>,
        fail: bool,
    }

    impl Provider for RecordingProvider {
        fn query(&self, request: &QueryRequest<'_>) -> Result<Cursor> {
            self.requests.lock().unwrap().push(Recorded {
                uri: request.uri.map(|u| u.to_string()),
                projection: request.projection.map(<[String]>::to_vec),
                selection: request.selection.map(str::to_string),
                selection_args: request.selection_args.to_vec(),
                sort_order: request.sort_order.map(str::to_string),
            });
            if self.fail {
                return Err(ProviderError::UnknownColumn("bogus".into()).into());
            }
            Ok(Cursor::new(
                vec!["n".into()],
                vec![
                    vec![Value::Integer(1)],
                    vec![Value::Integer(2)],
                    vec![Value::Integer(3)],
                ],
            ))
        }
    }

    #[test]
    fn test_request_carries_spec_fields() {
        let provider = RecordingProvider::default();
        let spec = QuerySpec::builder()
            .target(ContentUri::parse("content://media/external/files").unwrap())
            .projection(["_id"])
            .predicate("media_type=?")
            .arguments([1])
            .sort("_size")
            .limit(4)
            .build();

        QueryExecutor::new(&provider).execute(&spec).unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            Recorded {
                uri: Some("content://media/external/files".into()),
                projection: Some(vec!["_id".into()]),
                selection: Some("media_type=?".into()),
                selection_args: vec!["1".into()],
                sort_order: Some("_size DESC LIMIT 4".into()),
            }
        );
    }

    #[test]
    fn test_empty_spec_sends_nothing_optional() {
        let provider = RecordingProvider::default();
        QueryExecutor::new(&provider)
            .execute(&QuerySpec::builder().build())
            .unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].sort_order, None);
        assert_eq!(requests[0].uri, None);
        assert!(requests[0].selection_args.is_empty());
    }

    #[test]
    fn test_provider_error_passes_through() {
        let provider = RecordingProvider {
            fail: true,
            ..Default::default()
        };
        let err = QueryExecutor::new(&provider)
            .execute(&QuerySpec::builder().sort("bogus").build())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::UnknownColumn(ref c)) if c == "bogus"
        ));
    }

    #[test]
    fn test_query_results_maps_in_order() {
        let provider = RecordingProvider::default();
        let values = QueryExecutor::new(&provider)
            .query_results(&QuerySpec::builder().build(), |c| c.get_long(0))
            .unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_mapper_error_stops_iteration() {
        let provider = RecordingProvider::default();
        let mut seen = 0;
        let err = QueryExecutor::new(&provider)
            .query_results(&QuerySpec::builder().build(), |c| {
                seen += 1;
                match c.get_long(0)? {
                    2 => Err(Error::Mapping("two".into())),
                    n => Ok(n),
                }
            })
            .unwrap_err();
        assert!(matches!(err, Error::Mapping(_)));
        assert_eq!(seen, 2);
    }
}
