//! Row cursors returned by providers.

use crate::error::{Error, Result};
use crate::value::Value;

/// Owned, forward-positioned result set.
///
/// A fresh cursor sits before the first row; call [`Cursor::move_to_next`]
/// before reading. The cursor owns its rows, so dropping it releases the
/// result.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: Option<usize>,
}

impl Cursor {
    /// Creates a cursor positioned before the first row.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            position: None,
        }
    }

    /// Result column names, in projection order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of result columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of the named column, failing when it is absent.
    pub fn column_index_or_err(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| Error::Mapping(format!("cursor has no column {}", name)))
    }

    /// Number of rows.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Current row index, `None` before the first row.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Advances to the next row. Returns false once past the last row.
    pub fn move_to_next(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        self.position = Some(next.min(self.rows.len()));
        next < self.rows.len()
    }

    /// Moves to the first row. Returns false when the cursor is empty.
    pub fn move_to_first(&mut self) -> bool {
        self.position = Some(0);
        !self.rows.is_empty()
    }

    /// Moves back before the first row.
    pub fn reset(&mut self) {
        self.position = None;
    }

    fn current_row(&self) -> Result<&[Value]> {
        self.position
            .and_then(|p| self.rows.get(p))
            .map(Vec::as_slice)
            .ok_or(Error::CursorNotPositioned)
    }

    /// Raw value of `column` in the current row.
    pub fn get_value(&self, column: usize) -> Result<&Value> {
        let row = self.current_row()?;
        row.get(column).ok_or(Error::ColumnOutOfRange {
            index: column,
            count: self.columns.len(),
        })
    }

    /// True when the value is NULL.
    pub fn is_null(&self, column: usize) -> Result<bool> {
        Ok(self.get_value(column)?.is_null())
    }

    /// Reads an integer. NULL reads as 0, text is parsed.
    pub fn get_long(&self, column: usize) -> Result<i64> {
        match self.get_value(column)? {
            Value::Null => Ok(0),
            value => value.as_i64().ok_or_else(|| self.mismatch(column, "i64")),
        }
    }

    /// Reads a 32-bit integer, truncating like a C cast.
    pub fn get_int(&self, column: usize) -> Result<i32> {
        self.get_long(column).map(|v| v as i32)
    }

    /// Reads a float. NULL reads as 0.0, text is parsed.
    pub fn get_double(&self, column: usize) -> Result<f64> {
        match self.get_value(column)? {
            Value::Null => Ok(0.0),
            value => value.as_f64().ok_or_else(|| self.mismatch(column, "f64")),
        }
    }

    /// Reads the text form of a value, `None` for NULL.
    pub fn get_string(&self, column: usize) -> Result<Option<String>> {
        Ok(self.get_value(column)?.as_text())
    }

    fn mismatch(&self, column: usize, expected: &'static str) -> Error {
        Error::TypeMismatch {
            column: self.columns.get(column).cloned().unwrap_or_default(),
            expected,
        }
    }

    /// Consumes the cursor, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }
}
