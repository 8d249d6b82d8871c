//! # contentquery
//!
//! Parameterized read queries against content providers.
//!
//! A [`QuerySpec`] describes one read: target URI, projection, predicate with
//! `?` placeholders, arguments, sort column, direction and row cap. The
//! [`QueryExecutor`] turns the sort column, direction and cap into the single
//! sort-order fragment providers accept, issues the request and maps each
//! returned row through a closure.
//!
//! ## Quick Start
//!
//! ```rust
//! use contentquery::{args, ContentUri, MemoryProvider, QueryExecutor, QuerySpec, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files: ContentUri = "content://media/external/files".parse()?;
//!     let provider = MemoryProvider::new();
//!     provider.create_table(&files, ["_id", "_display_name", "_size"])?;
//!     provider.insert(&files, [Value::from(1), "a.jpg".into(), 300.into()])?;
//!     provider.insert(&files, [Value::from(2), "b.jpg".into(), 900.into()])?;
//!
//!     let spec = QuerySpec::builder()
//!         .target(files)
//!         .projection(["_display_name"])
//!         .predicate("_size > ?")
//!         .arguments(args![100])
//!         .sort("_size")
//!         .limit(1)
//!         .build();
//!     assert_eq!(spec.order_clause().as_deref(), Some("_size DESC LIMIT 1"));
//!
//!     let names = QueryExecutor::new(&provider)
//!         .query_results(&spec, |cursor| cursor.get_string(0))?;
//!     assert_eq!(names, vec![Some("b.jpg".to_string())]);
//!     Ok(())
//! }
//! ```
//!
//! ## Media catalog
//!
//! ```rust
//! use contentquery::media::{FilterMode, MediaProvider, MediaRequest};
//! use contentquery::MemoryProvider;
//!
//! let catalog = MediaProvider::new(MemoryProvider::new())?;
//! let spec = catalog.media_query(&MediaRequest::default().with_filter(FilterMode::Video));
//! assert_eq!(spec.predicate(), Some("media_type=?"));
//! # Ok::<(), contentquery::Error>(())
//! ```

#![warn(missing_docs)]

// Re-export core types
pub use contentquery_core::{
    args, Argument, ChangeCallback, ContentUri, Cursor, Error, Limit, MemoryProvider,
    ObservableProvider, ObserverId, Provider, ProviderConfig, ProviderError, QueryBuilder,
    QueryExecutor, QueryRequest, QuerySpec, Result, Value, NO_LIMIT,
};

/// Order clause synthesis
pub use contentquery_core::query::synthesize_order_clause;

/// Local media catalog
pub mod media {
    pub use contentquery_media::*;
}

pub mod logging;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
