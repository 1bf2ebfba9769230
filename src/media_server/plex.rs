/// Plex media server client implementation.
use super::plex_types::{ItemsResponse, PlexItem, SectionsResponse};
use super::{Episode, MediaServer, MediaServerError, Show};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Client for a Plex media server's REST interface.
///
/// Requests are authenticated with the `X-Plex-Token` header and ask for
/// JSON responses, which the server wraps in a `MediaContainer` object.
pub struct PlexServer {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl PlexServer {
    /// Creates a new client for the server at `base_url`.
    ///
    /// A trailing slash on the base URL is stripped so server-relative
    /// paths can be appended directly.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Performs a GET request against a server-relative path and decodes
    /// the JSON response.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MediaServerError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| MediaServerError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaServerError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        response
            .json()
            .map_err(|e| MediaServerError::ParseError(e.to_string()))
    }

    /// Resolves a library section title to its section key.
    fn section_key(&self, library_name: &str) -> Result<String, MediaServerError> {
        let sections: SectionsResponse = self.get_json("/library/sections")?;

        sections
            .media_container
            .directories
            .into_iter()
            .find(|directory| directory.title == library_name)
            .map(|directory| directory.key)
            .ok_or_else(|| MediaServerError::LibraryNotFound(library_name.to_string()))
    }

    /// Builds the full poster URL for a server-relative thumb path.
    ///
    /// The token is carried as a query parameter so the URL is fetchable
    /// on its own, the way the server hands poster URLs to its own clients.
    fn poster_url(&self, thumb: &str) -> String {
        format!("{}{}?X-Plex-Token={}", self.base_url, thumb, self.token)
    }

    /// Converts a Plex metadata item to our internal Episode structure.
    fn convert_episode(&self, item: PlexItem) -> Episode {
        let poster_url = item.thumb.map(|thumb| self.poster_url(&thumb));

        let locations: Vec<PathBuf> = item
            .media
            .into_iter()
            .flat_map(|media| media.parts)
            .filter_map(|part| part.file)
            .map(PathBuf::from)
            .collect();

        Episode {
            rating_key: item.rating_key,
            title: item.title,
            poster_url,
            locations,
        }
    }
}

impl MediaServer for PlexServer {
    fn list_shows(&self, library_name: &str) -> Result<Vec<Show>, MediaServerError> {
        let key = self.section_key(library_name)?;

        let response: ItemsResponse = self.get_json(&format!("/library/sections/{}/all", key))?;

        Ok(response
            .media_container
            .metadata
            .into_iter()
            .map(|item| Show {
                rating_key: item.rating_key,
                title: item.title,
            })
            .collect())
    }

    fn list_episodes(&self, show: &Show) -> Result<Vec<Episode>, MediaServerError> {
        // allLeaves flattens the show's seasons into a single episode list
        let response: ItemsResponse =
            self.get_json(&format!("/library/metadata/{}/allLeaves", show.rating_key))?;

        Ok(response
            .media_container
            .metadata
            .into_iter()
            .map(|item| self.convert_episode(item))
            .collect())
    }

    fn refresh_metadata(&self, episode: &Episode) -> Result<(), MediaServerError> {
        let url = format!(
            "{}/library/metadata/{}/refresh",
            self.base_url, episode.rating_key
        );

        let response = self
            .client
            .put(&url)
            .header("X-Plex-Token", &self.token)
            .send()
            .map_err(|e| MediaServerError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaServerError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url_includes_token() {
        let server = PlexServer::new("http://plex.local:32400", "secret");
        assert_eq!(
            server.poster_url("/library/metadata/456/thumb/789"),
            "http://plex.local:32400/library/metadata/456/thumb/789?X-Plex-Token=secret"
        );
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let server = PlexServer::new("http://plex.local:32400/", "secret");
        assert_eq!(
            server.poster_url("/library/metadata/456/thumb/789"),
            "http://plex.local:32400/library/metadata/456/thumb/789?X-Plex-Token=secret"
        );
    }

    #[test]
    fn test_convert_episode_maps_thumb_and_locations() {
        let server = PlexServer::new("http://plex.local:32400", "secret");

        let item: PlexItem = serde_json::from_str(
            r#"{
                "ratingKey": "456",
                "title": "Pilot",
                "thumb": "/library/metadata/456/thumb/789",
                "Media": [{"Part": [{"file": "/tv/Foo/Pilot.mkv"}]}]
            }"#,
        )
        .unwrap();

        let episode = server.convert_episode(item);

        assert_eq!(episode.rating_key, "456");
        assert_eq!(episode.title, "Pilot");
        assert_eq!(
            episode.poster_url.as_deref(),
            Some("http://plex.local:32400/library/metadata/456/thumb/789?X-Plex-Token=secret")
        );
        assert_eq!(episode.locations, vec![PathBuf::from("/tv/Foo/Pilot.mkv")]);
    }

    #[test]
    fn test_convert_episode_without_thumb() {
        let server = PlexServer::new("http://plex.local:32400", "secret");

        let item: PlexItem =
            serde_json::from_str(r#"{"ratingKey": "456", "title": "Pilot"}"#).unwrap();

        let episode = server.convert_episode(item);

        assert_eq!(episode.poster_url, None);
        assert!(episode.locations.is_empty());
    }
}
