//! A single image or video from the media files table.

use crate::columns::files;
use contentquery_core::{ContentUri, Cursor, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

const FOLDER_NAME_ROOT: &str = "/";
const FOLDER_NAME_0: &str = "0";

/// One media file.
///
/// Two values are equal when they point at the same row URI.
#[derive(Debug, Clone)]
pub struct LocalMedia {
    /// Row id
    pub id: i64,
    /// Display name, or the id when the provider has none
    pub file_name: String,
    /// MIME type, if known
    pub mime_type: Option<String>,
    /// Size in bytes
    pub file_size: i64,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Rotation in degrees
    pub orientation: i32,
    /// Capture time in milliseconds
    pub date_modified: i64,
    /// Id of the containing folder
    pub folder_id: i64,
    /// Name of the containing folder, `/` for the volume root
    pub folder_name: String,
    /// Row URI under the files table
    pub uri: ContentUri,
}

/// Fields written by [`LocalMedia::to_parcel`]. The URI is rebuilt on read.
#[derive(Serialize, Deserialize)]
struct Parcel {
    id: i64,
    file_name: String,
    mime_type: Option<String>,
    file_size: i64,
    width: i32,
    height: i32,
    orientation: i32,
    date_modified: i64,
    folder_id: i64,
    folder_name: String,
}

impl LocalMedia {
    /// Columns [`LocalMedia::from_cursor`] reads.
    pub const PROJECTION: [&'static str; 10] = [
        files::ID,
        files::DATE_TAKEN,
        files::MIME_TYPE,
        files::SIZE,
        files::ORIENTATION,
        files::WIDTH,
        files::HEIGHT,
        files::DISPLAY_NAME,
        files::PARENT,
        files::BUCKET_DISPLAY_NAME,
    ];

    /// Reads the cursor's current row. `content_uri` is the files table the
    /// row came from.
    pub fn from_cursor(cursor: &Cursor, content_uri: &ContentUri) -> Result<Self> {
        let column = |name: &str| cursor.column_index_or_err(name);

        let id = cursor.get_long(column(files::ID)?)?;
        let file_name = cursor
            .get_string(column(files::DISPLAY_NAME)?)?
            .unwrap_or_else(|| id.to_string());
        let folder_name = match cursor.get_string(column(files::BUCKET_DISPLAY_NAME)?)? {
            Some(name) if name != FOLDER_NAME_0 => name,
            _ => FOLDER_NAME_ROOT.to_string(),
        };

        Ok(LocalMedia {
            id,
            file_name,
            mime_type: cursor.get_string(column(files::MIME_TYPE)?)?,
            file_size: cursor.get_long(column(files::SIZE)?)?,
            width: cursor.get_int(column(files::WIDTH)?)?,
            height: cursor.get_int(column(files::HEIGHT)?)?,
            orientation: cursor.get_int(column(files::ORIENTATION)?)?,
            date_modified: cursor.get_long(column(files::DATE_TAKEN)?)?,
            folder_id: cursor.get_long(column(files::PARENT)?)?,
            folder_name,
            uri: content_uri.with_appended_id(id),
        })
    }

    /// Serializes everything but the URI.
    pub fn to_parcel(&self) -> Result<Vec<u8>> {
        let parcel = Parcel {
            id: self.id,
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            file_size: self.file_size,
            width: self.width,
            height: self.height,
            orientation: self.orientation,
            date_modified: self.date_modified,
            folder_id: self.folder_id,
            folder_name: self.folder_name.clone(),
        };
        bincode::serialize(&parcel).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Reads a value written by [`to_parcel`](Self::to_parcel), rebuilding
    /// its URI under `content_uri`.
    pub fn from_parcel(bytes: &[u8], content_uri: &ContentUri) -> Result<Self> {
        let parcel: Parcel =
            bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(LocalMedia {
            uri: content_uri.with_appended_id(parcel.id),
            id: parcel.id,
            file_name: parcel.file_name,
            mime_type: parcel.mime_type,
            file_size: parcel.file_size,
            width: parcel.width,
            height: parcel.height,
            orientation: parcel.orientation,
            date_modified: parcel.date_modified,
            folder_id: parcel.folder_id,
            folder_name: parcel.folder_name,
        })
    }
}

impl PartialEq for LocalMedia {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for LocalMedia {}

impl Hash for LocalMedia {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl fmt::Display for LocalMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LocalMedia({} {} {}x{} in {})",
            self.id, self.file_name, self.width, self.height, self.folder_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentquery_core::Value;
    use std::collections::HashSet;

    fn files_uri() -> ContentUri {
        ContentUri::parse("content://media/external/files").unwrap()
    }

    fn cursor(display_name: Value, bucket: Value) -> Cursor {
        let columns = LocalMedia::PROJECTION.iter().map(|c| c.to_string()).collect();
        let row = vec![
            Value::from(12),
            Value::from(1_700_000_000_000i64),
            Value::from("image/png"),
            Value::from(2048),
            Value::from(90),
            Value::from(640),
            Value::from(480),
            display_name,
            Value::from(7),
            bucket,
        ];
        let mut cursor = Cursor::new(columns, vec![row]);
        assert!(cursor.move_to_next());
        cursor
    }

    #[test]
    fn test_from_cursor() {
        let media =
            LocalMedia::from_cursor(&cursor("cat.png".into(), "Camera".into()), &files_uri())
                .unwrap();
        assert_eq!(media.id, 12);
        assert_eq!(media.file_name, "cat.png");
        assert_eq!(media.mime_type.as_deref(), Some("image/png"));
        assert_eq!(media.file_size, 2048);
        assert_eq!((media.width, media.height, media.orientation), (640, 480, 90));
        assert_eq!(media.date_modified, 1_700_000_000_000);
        assert_eq!(media.folder_id, 7);
        assert_eq!(media.folder_name, "Camera");
        assert_eq!(media.uri.as_str(), "content://media/external/files/12");
    }

    #[test]
    fn test_missing_names_fall_back() {
        let media =
            LocalMedia::from_cursor(&cursor(Value::Null, Value::Null), &files_uri()).unwrap();
        assert_eq!(media.file_name, "12");
        assert_eq!(media.folder_name, "/");

        let media = LocalMedia::from_cursor(&cursor("a".into(), "0".into()), &files_uri()).unwrap();
        assert_eq!(media.folder_name, "/");
    }

    #[test]
    fn test_missing_column_is_mapping_error() {
        let mut cursor = Cursor::new(vec!["_id".into()], vec![vec![Value::from(1)]]);
        cursor.move_to_next();
        assert!(matches!(
            LocalMedia::from_cursor(&cursor, &files_uri()),
            Err(Error::Mapping(_))
        ));
    }

    #[test]
    fn test_equality_by_uri() {
        let a = LocalMedia::from_cursor(&cursor("a".into(), "x".into()), &files_uri()).unwrap();
        let mut b = a.clone();
        b.file_name = "renamed".into();
        assert_eq!(a, b);

        let set: HashSet<LocalMedia> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_parcel_restores_fields_and_uri() {
        let media =
            LocalMedia::from_cursor(&cursor(Value::Null, "DCIM".into()), &files_uri()).unwrap();
        let bytes = media.to_parcel().unwrap();
        let restored = LocalMedia::from_parcel(&bytes, &files_uri()).unwrap();

        assert_eq!(restored, media);
        assert_eq!(restored.file_name, media.file_name);
        assert_eq!(restored.folder_name, "DCIM");
        assert_eq!(restored.mime_type, media.mime_type);

        assert!(matches!(
            LocalMedia::from_parcel(&bytes[..3], &files_uri()),
            Err(Error::Serialization(_))
        ));
    }
}
