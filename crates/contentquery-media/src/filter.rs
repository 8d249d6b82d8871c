//! Which media kinds a query returns.

use crate::columns::{is_valid_folder, MEDIA_TYPE_IMAGE, MEDIA_TYPE_VIDEO};
use contentquery_core::{args, Argument};

/// Media kinds to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Images and videos
    #[default]
    All,
    /// Images only
    Images,
    /// Videos only
    Video,
}

impl FilterMode {
    /// Selection for this mode, narrowed to `folder_id` when it is valid.
    pub fn selection(self, folder_id: i64) -> &'static str {
        match (self, is_valid_folder(folder_id)) {
            (FilterMode::All, true) => "(media_type=? or media_type=?) and parent=?",
            (FilterMode::All, false) => "media_type=? or media_type=?",
            (_, true) => "media_type=? and parent=?",
            (_, false) => "media_type=?",
        }
    }

    /// Arguments matching the placeholders of [`selection`](Self::selection).
    pub fn arguments(self, folder_id: i64) -> Vec<Argument> {
        let mut arguments = match self {
            FilterMode::All => args![MEDIA_TYPE_IMAGE, MEDIA_TYPE_VIDEO],
            FilterMode::Images => args![MEDIA_TYPE_IMAGE],
            FilterMode::Video => args![MEDIA_TYPE_VIDEO],
        };
        if is_valid_folder(folder_id) {
            arguments.push(Argument::from(folder_id));
        }
        arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::NO_FOLDER_ID;

    fn strings(args: Vec<Argument>) -> Vec<String> {
        args.into_iter().map(Argument::into_string).collect()
    }

    #[test]
    fn test_all_without_folder() {
        assert_eq!(
            FilterMode::All.selection(NO_FOLDER_ID),
            "media_type=? or media_type=?"
        );
        assert_eq!(strings(FilterMode::All.arguments(NO_FOLDER_ID)), ["1", "3"]);
    }

    #[test]
    fn test_all_in_folder() {
        assert_eq!(
            FilterMode::All.selection(42),
            "(media_type=? or media_type=?) and parent=?"
        );
        assert_eq!(strings(FilterMode::All.arguments(42)), ["1", "3", "42"]);
    }

    #[test]
    fn test_single_kind() {
        assert_eq!(FilterMode::Images.selection(-5), "media_type=?");
        assert_eq!(strings(FilterMode::Images.arguments(-5)), ["1"]);
        assert_eq!(FilterMode::Video.selection(0), "media_type=? and parent=?");
        assert_eq!(strings(FilterMode::Video.arguments(0)), ["3", "0"]);
    }

    #[test]
    fn test_placeholders_match_arguments() {
        for mode in [FilterMode::All, FilterMode::Images, FilterMode::Video] {
            for folder in [NO_FOLDER_ID, 7] {
                let placeholders = mode.selection(folder).matches('?').count();
                assert_eq!(placeholders, mode.arguments(folder).len());
            }
        }
    }
}
