/// Plex API response types for deserialization.
///
/// These structures mirror the JSON the Plex server returns when requests
/// carry an `Accept: application/json` header. Every payload is wrapped in
/// a single `MediaContainer` object.
use serde::Deserialize;

/// Response of the `/library/sections` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct SectionsResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: SectionsContainer,
}

/// Container listing the server's library sections.
#[derive(Debug, Deserialize)]
pub(super) struct SectionsContainer {
    /// One entry per library section; absent when the server has none
    #[serde(rename = "Directory", default)]
    pub directories: Vec<PlexDirectory>,
}

/// A single library section.
#[derive(Debug, Deserialize)]
pub(super) struct PlexDirectory {
    /// Section key used to address the section in further requests
    pub key: String,
    /// Section title as shown in the library UI
    pub title: String,
}

/// Response of the item-listing endpoints (`/all`, `/allLeaves`).
#[derive(Debug, Deserialize)]
pub(super) struct ItemsResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: ItemsContainer,
}

/// Container listing media items (shows or episodes).
#[derive(Debug, Deserialize)]
pub(super) struct ItemsContainer {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<PlexItem>,
}

/// A single media item.
#[derive(Debug, Deserialize)]
pub(super) struct PlexItem {
    /// The server's identifier for this item
    #[serde(rename = "ratingKey")]
    pub rating_key: String,
    /// Item title
    pub title: String,
    /// Server-relative poster path (may be absent for items without artwork)
    pub thumb: Option<String>,
    /// Media streams of the item; only present on episodes
    #[serde(rename = "Media", default)]
    pub media: Vec<PlexMedia>,
}

/// One media stream of an item.
#[derive(Debug, Deserialize)]
pub(super) struct PlexMedia {
    /// The files making up this media stream
    #[serde(rename = "Part", default)]
    pub parts: Vec<PlexPart>,
}

/// A single file of a media stream.
#[derive(Debug, Deserialize)]
pub(super) struct PlexPart {
    /// Absolute path of the file on the server's filesystem
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_response() {
        let response: SectionsResponse = serde_json::from_str(
            r#"{
                "MediaContainer": {
                    "size": 2,
                    "Directory": [
                        {"key": "1", "title": "Movies", "type": "movie"},
                        {"key": "2", "title": "TV Shows", "type": "show"}
                    ]
                }
            }"#,
        )
        .unwrap();

        let directories = response.media_container.directories;
        assert_eq!(directories.len(), 2);
        assert_eq!(directories[1].key, "2");
        assert_eq!(directories[1].title, "TV Shows");
    }

    #[test]
    fn test_parse_episode_item() {
        let response: ItemsResponse = serde_json::from_str(
            r#"{
                "MediaContainer": {
                    "size": 1,
                    "Metadata": [
                        {
                            "ratingKey": "456",
                            "title": "Pilot",
                            "thumb": "/library/metadata/456/thumb/789",
                            "Media": [
                                {"Part": [{"file": "/tv/Foo/Pilot.mkv"}]}
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap();

        let items = response.media_container.metadata;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].rating_key, "456");
        assert_eq!(items[0].thumb.as_deref(), Some("/library/metadata/456/thumb/789"));
        assert_eq!(
            items[0].media[0].parts[0].file.as_deref(),
            Some("/tv/Foo/Pilot.mkv")
        );
    }

    #[test]
    fn test_parse_item_without_thumb_or_media() {
        let response: ItemsResponse = serde_json::from_str(
            r#"{
                "MediaContainer": {
                    "Metadata": [
                        {"ratingKey": "123", "title": "Foo"}
                    ]
                }
            }"#,
        )
        .unwrap();

        let items = response.media_container.metadata;
        assert_eq!(items[0].thumb, None);
        assert!(items[0].media.is_empty());
    }

    #[test]
    fn test_parse_empty_container() {
        let response: ItemsResponse =
            serde_json::from_str(r#"{"MediaContainer": {"size": 0}}"#).unwrap();
        assert!(response.media_container.metadata.is_empty());
    }
}
