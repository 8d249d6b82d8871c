//! Sort options for media queries.

use crate::columns::files;

/// Column media is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortingMode {
    /// Capture time
    #[default]
    Date,
    /// Display name
    Name,
    /// File size
    Size,
}

impl SortingMode {
    /// The column this mode sorts on.
    pub fn media_column(self) -> &'static str {
        match self {
            SortingMode::Date => files::DATE_TAKEN,
            SortingMode::Name => files::DISPLAY_NAME,
            SortingMode::Size => files::SIZE,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortingOrder {
    /// Smallest first
    Ascending,
    /// Largest first
    #[default]
    Descending,
}

impl SortingOrder {
    /// True for [`SortingOrder::Ascending`].
    pub fn is_ascending(self) -> bool {
        matches!(self, SortingOrder::Ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_columns() {
        assert_eq!(SortingMode::Date.media_column(), "datetaken");
        assert_eq!(SortingMode::Name.media_column(), "_display_name");
        assert_eq!(SortingMode::Size.media_column(), "_size");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SortingMode::default(), SortingMode::Date);
        assert!(!SortingOrder::default().is_ascending());
        assert!(SortingOrder::Ascending.is_ascending());
    }
}
