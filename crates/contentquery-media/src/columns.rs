//! Column names and constants of the media files table.

/// Columns of `content://media/<volume>/files`.
pub mod files {
    /// Row id
    pub const ID: &str = "_id";
    /// Capture time in milliseconds
    pub const DATE_TAKEN: &str = "datetaken";
    /// MIME type, e.g. `image/jpeg`
    pub const MIME_TYPE: &str = "mime_type";
    /// Size in bytes
    pub const SIZE: &str = "_size";
    /// Rotation in degrees
    pub const ORIENTATION: &str = "orientation";
    /// Width in pixels
    pub const WIDTH: &str = "width";
    /// Height in pixels
    pub const HEIGHT: &str = "height";
    /// File name shown to the user
    pub const DISPLAY_NAME: &str = "_display_name";
    /// Id of the containing folder
    pub const PARENT: &str = "parent";
    /// Name of the containing folder
    pub const BUCKET_DISPLAY_NAME: &str = "bucket_display_name";
    /// One of the `MEDIA_TYPE_*` values
    pub const MEDIA_TYPE: &str = "media_type";
}

/// `media_type` of a non-media file.
pub const MEDIA_TYPE_NONE: i64 = 0;
/// `media_type` of an image.
pub const MEDIA_TYPE_IMAGE: i64 = 1;
/// `media_type` of a video.
pub const MEDIA_TYPE_VIDEO: i64 = 3;

/// Folder id meaning "every folder". Any id at or below it is treated the same.
pub const NO_FOLDER_ID: i64 = -1;

/// Files table of the external volume.
pub const EXTERNAL_FILES_URI: &str = "content://media/external/files";
/// Images of the internal volume.
pub const INTERNAL_IMAGES_URI: &str = "content://media/internal/images/media";
/// Images of the external volume.
pub const EXTERNAL_IMAGES_URI: &str = "content://media/external/images/media";

/// True when `folder_id` names a real folder.
pub fn is_valid_folder(folder_id: i64) -> bool {
    folder_id > NO_FOLDER_ID
}
