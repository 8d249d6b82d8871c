//! Query specification, building and execution.

mod args;
mod builder;
mod executor;
mod order;
mod spec;

pub use args::Argument;
pub use builder::QueryBuilder;
pub use executor::QueryExecutor;
pub use order::synthesize_order_clause;
pub use spec::{Limit, QuerySpec, NO_LIMIT};
