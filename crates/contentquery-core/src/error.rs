//! Error types for contentquery.

use std::fmt;

/// Failures reported by a provider's query engine.
///
/// The query executor never produces these itself; it hands them back to the
/// caller exactly as the provider returned them.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The request carried no target URI
    MissingTarget,

    /// No table is registered under the URI
    UnknownTable(String),

    /// A table with this URI already exists
    DuplicateTable(String),

    /// A projection, selection or sort term named a column the table lacks
    UnknownColumn(String),

    /// Selection or sort-order text could not be parsed
    Syntax(String),

    /// Bound arguments do not match the `?` placeholders in the selection
    ArgumentCount {
        /// Placeholders found in the selection
        expected: usize,
        /// Arguments supplied with the request
        found: usize,
    },

    /// An ORDER BY ordinal points outside the result columns
    OrdinalOutOfRange {
        /// The 1-based ordinal from the sort order
        ordinal: usize,
        /// Number of result columns
        columns: usize,
    },

    /// An inserted row does not have one value per column
    RowWidth {
        /// Columns in the table
        expected: usize,
        /// Values in the row
        found: usize,
    },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingTarget => write!(f, "Query has no target URI"),
            ProviderError::UnknownTable(uri) => write!(f, "Unknown URI: {}", uri),
            ProviderError::DuplicateTable(uri) => write!(f, "Table already exists: {}", uri),
            ProviderError::UnknownColumn(name) => write!(f, "No such column: {}", name),
            ProviderError::Syntax(msg) => write!(f, "Syntax error: {}", msg),
            ProviderError::ArgumentCount { expected, found } => write!(
                f,
                "Cannot bind {} arguments, the statement has {} parameters",
                found, expected
            ),
            ProviderError::OrdinalOutOfRange { ordinal, columns } => write!(
                f,
                "ORDER BY term {} out of range, should be between 1 and {}",
                ordinal, columns
            ),
            ProviderError::RowWidth { expected, found } => write!(
                f,
                "Row has {} values but the table has {} columns",
                found, expected
            ),
        }
    }
}

impl std::error::Error for ProviderError {}

/// The main error type for contentquery operations.
#[derive(Debug)]
pub enum Error {
    /// A lock was poisoned (internal error)
    LockPoisoned,

    /// Failure reported by the provider, passed through unchanged
    Provider(ProviderError),

    /// A query argument has no string form (null)
    ArgumentCoercion {
        /// Zero-based position in the argument list
        position: usize,
        /// What was wrong with the value
        reason: String,
    },

    /// Malformed content URI
    InvalidUri(String),

    /// Cursor column index outside the result columns
    ColumnOutOfRange {
        /// Requested index
        index: usize,
        /// Number of columns in the cursor
        count: usize,
    },

    /// Cursor is before the first row or past the last one
    CursorNotPositioned,

    /// Cursor value cannot be read as the requested type
    TypeMismatch {
        /// Column name
        column: String,
        /// Requested type
        expected: &'static str,
    },

    /// Serialization/deserialization error
    Serialization(String),

    /// A row mapper rejected a row
    Mapping(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LockPoisoned => write!(f, "Lock poisoned"),
            Error::Provider(e) => write!(f, "Provider error: {}", e),
            Error::ArgumentCoercion { position, reason } => {
                write!(f, "Argument {} cannot be bound: {}", position, reason)
            }
            Error::InvalidUri(uri) => write!(f, "Invalid content URI: {}", uri),
            Error::ColumnOutOfRange { index, count } => write!(
                f,
                "Column index {} out of range, cursor has {} columns",
                index, count
            ),
            Error::CursorNotPositioned => write!(f, "Cursor is not positioned on a row"),
            Error::TypeMismatch { column, expected } => {
                write!(f, "Column {} cannot be read as {}", column, expected)
            }
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Mapping(msg) => write!(f, "Row mapping error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Provider(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        Error::Provider(err)
    }
}

/// A specialized `Result` type for contentquery operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::ArgumentCount {
            expected: 2,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot bind 3 arguments, the statement has 2 parameters"
        );
    }

    #[test]
    fn test_provider_error_is_source() {
        let err = Error::from(ProviderError::UnknownColumn("title".to_string()));
        assert!(matches!(err, Error::Provider(ProviderError::UnknownColumn(_))));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Provider error: No such column: title");
    }
}
