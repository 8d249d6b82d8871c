//! # contentquery core
//!
//! Query specifications for content providers: a fluent builder, the
//! ORDER BY / LIMIT fragment synthesized from it, and an executor that hands
//! the result to a [`Provider`] and maps the returned cursor.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod engine;
pub mod error;
pub mod provider;
pub mod query;
pub mod uri;
pub mod value;

pub use cursor::Cursor;
pub use error::{Error, ProviderError, Result};
pub use provider::{
    ChangeCallback, MemoryProvider, ObservableProvider, ObserverId, Provider, ProviderConfig,
    QueryRequest,
};
pub use query::{Argument, Limit, QueryBuilder, QueryExecutor, QuerySpec, NO_LIMIT};
pub use uri::ContentUri;
pub use value::Value;
