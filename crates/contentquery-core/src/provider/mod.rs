//! The provider contract.
//!
//! A provider owns tabular data addressed by [`ContentUri`]s and answers one
//! call: a query made of projection, selection, selection arguments and a
//! sort-order fragment. Everything the provider rejects comes back as
//! [`Error::Provider`](crate::Error::Provider).

mod memory;
mod observer;

pub use memory::{MemoryProvider, ProviderConfig};
pub use observer::{ChangeCallback, ObserverId, ObserverRegistry};

use crate::cursor::Cursor;
use crate::error::Result;
use crate::uri::ContentUri;
use std::sync::Arc;

/// One query as the provider receives it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QueryRequest<'a> {
    /// Table or row to read
    pub uri: Option<&'a ContentUri>,
    /// Columns to return, `None` for all
    pub projection: Option<&'a [String]>,
    /// Filter with `?` placeholders
    pub selection: Option<&'a str>,
    /// Values for the placeholders, in order
    pub selection_args: &'a [String],
    /// Fragment spliced after `ORDER BY`
    pub sort_order: Option<&'a str>,
}

/// Source of rows.
pub trait Provider {
    /// Runs one query and returns its rows.
    fn query(&self, request: &QueryRequest<'_>) -> Result<Cursor>;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn query(&self, request: &QueryRequest<'_>) -> Result<Cursor> {
        (**self).query(request)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn query(&self, request: &QueryRequest<'_>) -> Result<Cursor> {
        (**self).query(request)
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn query(&self, request: &QueryRequest<'_>) -> Result<Cursor> {
        (**self).query(request)
    }
}

/// A provider that reports changes to the data behind its URIs.
pub trait ObservableProvider: Provider {
    /// Calls `callback` whenever data at `uri` changes. With
    /// `notify_for_descendants`, changes below `uri` are reported too.
    fn register_observer(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        callback: ChangeCallback,
    ) -> Result<ObserverId>;

    /// Removes an observer. Returns `false` if it was not registered.
    fn unregister_observer(&self, id: ObserverId) -> Result<bool>;
}

impl<P: ObservableProvider + ?Sized> ObservableProvider for &P {
    fn register_observer(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        callback: ChangeCallback,
    ) -> Result<ObserverId> {
        (**self).register_observer(uri, notify_for_descendants, callback)
    }

    fn unregister_observer(&self, id: ObserverId) -> Result<bool> {
        (**self).unregister_observer(id)
    }
}

impl<P: ObservableProvider + ?Sized> ObservableProvider for Arc<P> {
    fn register_observer(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        callback: ChangeCallback,
    ) -> Result<ObserverId> {
        (**self).register_observer(uri, notify_for_descendants, callback)
    }

    fn unregister_observer(&self, id: ObserverId) -> Result<bool> {
        (**self).unregister_observer(id)
    }
}
