//! Folders derived from a media listing.

use crate::local_media::LocalMedia;
use std::collections::HashMap;

/// A folder holding at least one media file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaFolder {
    /// Folder id (`parent` of its files)
    pub id: i64,
    /// Folder name
    pub name: String,
    /// Newest capture time among its files
    pub date_modified: i64,
    /// Number of files
    pub media_count: usize,
}

impl MediaFolder {
    /// Groups media by folder id.
    ///
    /// Folders keep the order in which their first file appears, so a
    /// listing sorted by date yields folders sorted by their newest file.
    pub fn group(media: &[LocalMedia]) -> Vec<MediaFolder> {
        let mut folders: Vec<MediaFolder> = Vec::new();
        let mut positions: HashMap<i64, usize> = HashMap::new();

        for item in media {
            match positions.get(&item.folder_id) {
                Some(&index) => {
                    let folder = &mut folders[index];
                    folder.media_count += 1;
                    folder.date_modified = folder.date_modified.max(item.date_modified);
                }
                None => {
                    positions.insert(item.folder_id, folders.len());
                    folders.push(MediaFolder {
                        id: item.folder_id,
                        name: item.folder_name.clone(),
                        date_modified: item.date_modified,
                        media_count: 1,
                    });
                }
            }
        }

        folders
    }
}
