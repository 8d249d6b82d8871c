//! # contentquery media
//!
//! Local image and video catalog built on contentquery query specs: filter
//! and sort options, row mapping into [`LocalMedia`], folder grouping and
//! change notifications.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod columns;
pub mod filter;
pub mod folder;
pub mod local_media;
pub mod provider;
pub mod sort;

pub use columns::{MEDIA_TYPE_IMAGE, MEDIA_TYPE_VIDEO, NO_FOLDER_ID};
pub use filter::FilterMode;
pub use folder::MediaFolder;
pub use local_media::LocalMedia;
pub use provider::{MediaConfig, MediaProvider, MediaRequest};
pub use sort::{SortingMode, SortingOrder};
