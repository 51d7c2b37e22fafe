//! Media resolver
//!
//! Picks the preview image, detail gallery and premium media for one feed
//! row. The detail gallery is never empty: the placeholder fills in when
//! the row has nothing usable.

use serde::{Deserialize, Serialize};

use crate::feed::RawRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSet {
    pub preview_image: Option<String>,
    pub detail_images: Vec<String>,
    /// `None` means the feed carries no premium images for this row at all,
    /// which is distinct from an empty list.
    pub premium_images: Option<Vec<String>>,
    pub premium_videos: Option<Vec<String>>,
}

pub fn resolve_media(row: &RawRow<'_>, placeholder: &str) -> MediaSet {
    MediaSet {
        preview_image: row.preview_image().map(str::to_string),
        detail_images: detail_images(row, placeholder),
        premium_images: row.premium_images().map(non_blank),
        premium_videos: row.premium_videos().map(non_blank),
    }
}

fn detail_images(row: &RawRow<'_>, placeholder: &str) -> Vec<String> {
    let from_list = row.detail_images().map(non_blank).unwrap_or_default();
    if !from_list.is_empty() {
        return from_list;
    }

    let from_csv: Vec<String> = row
        .detail_images_csv()
        .map(|csv| {
            csv.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if !from_csv.is_empty() {
        return from_csv;
    }

    vec![placeholder.to_string()]
}

fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
