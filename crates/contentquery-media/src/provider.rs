//! Media catalog queries over a content provider.

use crate::columns::{
    is_valid_folder, EXTERNAL_FILES_URI, EXTERNAL_IMAGES_URI, INTERNAL_IMAGES_URI, NO_FOLDER_ID,
};
use crate::filter::FilterMode;
use crate::folder::MediaFolder;
use crate::local_media::LocalMedia;
use crate::sort::{SortingMode, SortingOrder};
use contentquery_core::{
    ChangeCallback, ContentUri, Error, Limit, ObservableProvider, ObserverId, Provider,
    QueryExecutor, QuerySpec, Result,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Where the catalog reads and what it watches.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaConfig {
    /// Files table queried for media
    pub content_uri: ContentUri,
    /// URIs watched by the updates callback, including descendants
    pub observed_uris: Vec<ContentUri>,
}

impl MediaConfig {
    /// The external files table, watching internal and external images.
    pub fn new() -> Result<Self> {
        Ok(MediaConfig {
            content_uri: ContentUri::parse(EXTERNAL_FILES_URI)?,
            observed_uris: vec![
                ContentUri::parse(INTERNAL_IMAGES_URI)?,
                ContentUri::parse(EXTERNAL_IMAGES_URI)?,
            ],
        })
    }
}

/// Parameters of one media listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaRequest {
    /// Folder to list, [`NO_FOLDER_ID`] (or lower) for all folders
    pub folder_id: i64,
    /// Row cap
    pub limit: Limit,
    /// Media kinds
    pub filter: FilterMode,
    /// Sort column
    pub sorting_mode: SortingMode,
    /// Sort direction
    pub sorting_order: SortingOrder,
}

impl Default for MediaRequest {
    fn default() -> Self {
        MediaRequest {
            folder_id: NO_FOLDER_ID,
            limit: Limit::Unbounded,
            filter: FilterMode::All,
            sorting_mode: SortingMode::Date,
            sorting_order: SortingOrder::Descending,
        }
    }
}

impl MediaRequest {
    /// Restricts the listing to one folder.
    pub fn in_folder(mut self, folder_id: i64) -> Self {
        self.folder_id = folder_id;
        self
    }

    /// Caps the number of results.
    pub fn with_limit(mut self, limit: impl Into<Limit>) -> Self {
        self.limit = limit.into();
        self
    }

    /// Selects media kinds.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Selects the sort column and direction.
    pub fn sorted_by(mut self, mode: SortingMode, order: SortingOrder) -> Self {
        self.sorting_mode = mode;
        self.sorting_order = order;
        self
    }
}

/// Lists local images and videos through a [`Provider`].
pub struct MediaProvider<P> {
    executor: QueryExecutor<P>,
    config: MediaConfig,
    registrations: Mutex<Vec<ObserverId>>,
}

impl<P: Provider> MediaProvider<P> {
    /// Uses the default [`MediaConfig`].
    pub fn new(provider: P) -> Result<Self> {
        Ok(Self::with_config(provider, MediaConfig::new()?))
    }

    /// Creates a catalog with an explicit configuration.
    pub fn with_config(provider: P, config: MediaConfig) -> Self {
        MediaProvider {
            executor: QueryExecutor::new(provider),
            config,
            registrations: Mutex::new(Vec::new()),
        }
    }

    /// The catalog's configuration.
    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        self.executor.provider()
    }

    /// The query issued for `request`.
    pub fn media_query(&self, request: &MediaRequest) -> QuerySpec {
        let folder_id = if is_valid_folder(request.folder_id) {
            request.folder_id
        } else {
            NO_FOLDER_ID
        };

        QuerySpec::builder()
            .target(self.config.content_uri.clone())
            .projection(LocalMedia::PROJECTION)
            .predicate(request.filter.selection(folder_id))
            .arguments(request.filter.arguments(folder_id))
            .sort(request.sorting_mode.media_column())
            .ascending(request.sorting_order.is_ascending())
            .limit(request.limit)
            .build()
    }

    /// Lists media matching `request`, in the requested order.
    pub fn get_local_media(&self, request: &MediaRequest) -> Result<Vec<LocalMedia>> {
        let spec = self.media_query(request);
        let content_uri = &self.config.content_uri;
        let media = self
            .executor
            .query_results(&spec, |cursor| LocalMedia::from_cursor(cursor, content_uri))?;
        debug!(count = media.len(), folder_id = request.folder_id, "loaded local media");
        Ok(media)
    }

    /// Lists folders holding media of the given kinds, newest first.
    pub fn get_media_folders(&self, filter: FilterMode) -> Result<Vec<MediaFolder>> {
        let media = self.get_local_media(&MediaRequest::default().with_filter(filter))?;
        Ok(MediaFolder::group(&media))
    }
}

impl<P: ObservableProvider> MediaProvider<P> {
    /// Calls `callback` whenever a watched URI changes. A previous callback
    /// is replaced.
    pub fn register_media_updates_callback<F>(&self, callback: F) -> Result<()>
    where
        F: Fn(&ContentUri) + Send + Sync + 'static,
    {
        let mut registrations = self.registrations.lock().map_err(|_| Error::LockPoisoned)?;
        self.release(&mut registrations)?;

        let callback: ChangeCallback = Arc::new(callback);
        for uri in &self.config.observed_uris {
            let id = self
                .provider()
                .register_observer(uri, true, Arc::clone(&callback))?;
            registrations.push(id);
        }
        info!(uris = self.config.observed_uris.len(), "media updates callback registered");
        Ok(())
    }

    /// Drops the updates callback. Returns `false` if none was registered.
    pub fn unregister_media_updates_callback(&self) -> Result<bool> {
        let mut registrations = self.registrations.lock().map_err(|_| Error::LockPoisoned)?;
        if registrations.is_empty() {
            return Ok(false);
        }
        self.release(&mut registrations)?;
        Ok(true)
    }

    /// Unregisters every tracked observer. Ids the provider fails to drop stay
    /// tracked so a later call can retry them; the first failure is returned.
    fn release(&self, registrations: &mut Vec<ObserverId>) -> Result<()> {
        let mut first_error = None;
        registrations.retain(|&id| match self.provider().unregister_observer(id) {
            Ok(_) => false,
            Err(e) => {
                warn!(?id, error = %e, "failed to unregister media observer");
                first_error.get_or_insert(e);
                true
            }
        });
        first_error.map_or(Ok(()), Err)
    }
}
