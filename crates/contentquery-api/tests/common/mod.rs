//! Shared fixtures for integration tests.

#![allow(dead_code)]

use contentquery::media::columns::{files, EXTERNAL_FILES_URI, MEDIA_TYPE_IMAGE, MEDIA_TYPE_VIDEO};
use contentquery::{ContentUri, MemoryProvider, Value};

pub const CAMERA: i64 = 100;
pub const SCREENSHOTS: i64 = 200;
pub const DOWNLOADS: i64 = 300;

pub fn files_uri() -> ContentUri {
    ContentUri::parse(EXTERNAL_FILES_URI).unwrap()
}

/// One row of the files table.
pub struct FileRow {
    pub id: i64,
    pub name: Option<&'static str>,
    pub media_type: i64,
    pub size: i64,
    pub date_taken: i64,
    pub folder_id: i64,
    pub folder_name: Option<&'static str>,
}

impl FileRow {
    fn values(&self) -> Vec<Value> {
        let mime = match self.media_type {
            MEDIA_TYPE_IMAGE => Some("image/jpeg"),
            MEDIA_TYPE_VIDEO => Some("video/mp4"),
            _ => None,
        };
        vec![
            Value::from(self.id),
            Value::from(self.date_taken),
            Value::from(mime),
            Value::from(self.size),
            Value::from(0),
            Value::from(1920),
            Value::from(1080),
            Value::from(self.name),
            Value::from(self.folder_id),
            Value::from(self.folder_name),
            Value::from(self.media_type),
        ]
    }
}

pub fn file_columns() -> Vec<&'static str> {
    vec![
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
        files::MEDIA_TYPE,
    ]
}

pub fn sample_rows() -> Vec<FileRow> {
    vec![
        FileRow {
            id: 1,
            name: Some("beach.jpg"),
            media_type: MEDIA_TYPE_IMAGE,
            size: 3_000,
            date_taken: 1_000,
            folder_id: CAMERA,
            folder_name: Some("Camera"),
        },
        FileRow {
            id: 2,
            name: Some("party.mp4"),
            media_type: MEDIA_TYPE_VIDEO,
            size: 90_000,
            date_taken: 5_000,
            folder_id: CAMERA,
            folder_name: Some("Camera"),
        },
        FileRow {
            id: 3,
            name: None,
            media_type: MEDIA_TYPE_IMAGE,
            size: 500,
            date_taken: 4_000,
            folder_id: SCREENSHOTS,
            folder_name: Some("Screenshots"),
        },
        FileRow {
            id: 4,
            name: Some("report.pdf"),
            media_type: 0,
            size: 12_000,
            date_taken: 9_000,
            folder_id: DOWNLOADS,
            folder_name: Some("Download"),
        },
        FileRow {
            id: 5,
            name: Some("sunset.jpg"),
            media_type: MEDIA_TYPE_IMAGE,
            size: 7_000,
            date_taken: 3_000,
            folder_id: 0,
            folder_name: Some("0"),
        },
    ]
}

/// A provider holding the sample files table.
pub fn media_store() -> MemoryProvider {
    let provider = MemoryProvider::new();
    seed(&provider, sample_rows());
    provider
}

pub fn seed(provider: &MemoryProvider, rows: Vec<FileRow>) {
    let uri = files_uri();
    provider.create_table(&uri, file_columns()).unwrap();
    for row in rows {
        provider.insert(&uri, row.values()).unwrap();
    }
}
