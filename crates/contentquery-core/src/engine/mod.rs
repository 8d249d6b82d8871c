//! Provider-side query engine.
//!
//! Parses the selection and sort-order fragments a provider receives, plans
//! the read against one table and executes it.

/// Abstract Syntax Tree types
#[allow(missing_docs)]
pub mod ast;
/// Query executor
#[allow(missing_docs)]
pub mod executor;
/// Fragment lexer
#[allow(missing_docs)]
pub mod lexer;
/// Fragment parser
#[allow(missing_docs)]
pub mod parser;
/// Query planner
#[allow(missing_docs)]
pub mod planner;

// Re-export main types
pub use ast::*;
pub use executor::{Executor, Table};
pub use lexer::{Lexer, LexerError, Token};
pub use parser::{ParseError, Parser};
pub use planner::{PhysicalOperator, PhysicalPlan, PlanError, Planner, ReadQuery, SortKey};

use crate::error::ProviderError;

impl From<ParseError> for ProviderError {
    fn from(err: ParseError) -> Self {
        ProviderError::Syntax(err.to_string())
    }
}

impl From<LexerError> for ProviderError {
    fn from(err: LexerError) -> Self {
        ProviderError::Syntax(err.to_string())
    }
}

impl From<PlanError> for ProviderError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::UnknownColumn(name) => ProviderError::UnknownColumn(name),
            PlanError::OrdinalOutOfRange { ordinal, columns } => {
                ProviderError::OrdinalOutOfRange { ordinal, columns }
            }
        }
    }
}
