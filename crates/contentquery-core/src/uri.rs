//! Content URIs identifying provider tables and rows.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "content://";

/// Opaque locator of a provider table (`content://media/external/files`) or of
/// a single row in it (`content://media/external/files/42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri {
    authority: String,
    segments: Vec<String>,
    text: String,
}

impl ContentUri {
    /// Parses `content://<authority>[/<segment>...]`.
    ///
    /// Empty segments (double or trailing slashes) are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contentquery_core::ContentUri;
    ///
    /// let uri = ContentUri::parse("content://media/external/files")?;
    /// assert_eq!(uri.authority(), "media");
    /// assert_eq!(uri.with_appended_id(7).to_string(), "content://media/external/files/7");
    /// # Ok::<(), contentquery_core::Error>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::InvalidUri(input.to_string()))?;

        let mut parts = rest.split('/');
        let authority = parts.next().unwrap_or_default();
        if authority.is_empty() || authority.chars().any(char::is_whitespace) {
            return Err(Error::InvalidUri(input.to_string()));
        }

        let segments = parts
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self::from_parts(authority.to_string(), segments))
    }

    fn from_parts(authority: String, segments: Vec<String>) -> Self {
        let mut text = format!("{}{}", SCHEME, authority);
        for segment in &segments {
            text.push('/');
            text.push_str(segment);
        }
        Self {
            authority,
            segments,
            text,
        }
    }

    /// The authority (provider name).
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Path segments after the authority.
    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    /// Normalized string form.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns a URI addressing the row with `id` under this one.
    pub fn with_appended_id(&self, id: i64) -> ContentUri {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Self::from_parts(self.authority.clone(), segments)
    }

    /// Numeric last segment, if any.
    pub fn last_id(&self) -> Option<i64> {
        self.segments.last().and_then(|s| s.parse::<i64>().ok())
    }

    /// The URI with its last segment removed, `None` at the authority root.
    pub fn parent(&self) -> Option<ContentUri> {
        if self.segments.is_empty() {
            return None;
        }
        let segments = self.segments[..self.segments.len() - 1].to_vec();
        Some(Self::from_parts(self.authority.clone(), segments))
    }

    /// True when `other` lies strictly below this URI.
    pub fn is_ancestor_of(&self, other: &ContentUri) -> bool {
        self.authority == other.authority
            && other.segments.len() > self.segments.len()
            && other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for ContentUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
