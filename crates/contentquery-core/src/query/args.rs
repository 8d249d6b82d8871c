//! Query argument coercion.
//!
//! Arguments bound to `?` placeholders always travel as strings. Every value
//! is converted through its natural `Display` form at the moment it enters a
//! builder, so `1`, `true` and `"x"` become `"1"`, `"true"` and `"x"` no
//! matter how they were typed.

use crate::error::{Error, Result};
use std::fmt;

/// A query argument already coerced to its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Argument(String);

impl Argument {
    /// Coerces any displayable value.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Argument(value.to_string())
    }

    /// The coerced string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the argument, returning the coerced string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! argument_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Argument {
                fn from(value: $t) -> Self {
                    Argument(value.to_string())
                }
            }
        )*
    };
}

argument_from_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, &str,
    &String
);

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument(value)
    }
}

/// Coerces a list of nullable values, failing on the first `None`.
pub(crate) fn coerce_nullable<I, T>(values: I) -> Result<Vec<Argument>>
where
    I: IntoIterator<Item = Option<T>>,
    T: Into<Argument>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(position, value)| {
            value.map(Into::into).ok_or_else(|| Error::ArgumentCoercion {
                position,
                reason: "null has no string form".to_string(),
            })
        })
        .collect()
}

/// Builds a `Vec<Argument>` from values of mixed types.
///
/// ```rust
/// use contentquery_core::args;
///
/// let args = args![1, true, "x", 2.5];
/// let strings: Vec<&str> = args.iter().map(|a| a.as_str()).collect();
/// assert_eq!(strings, ["1", "true", "x", "2.5"]);
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {{
        let arguments: ::std::vec::Vec<$crate::query::Argument> =
            ::std::vec![$($crate::query::Argument::from($value)),*];
        arguments
    }};
}
