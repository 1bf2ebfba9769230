//! Media server access
//!
//! This module provides structures to represent the shows and episodes of a
//! TV library section, as well as a trait for implementing media server
//! clients.

mod plex;
mod plex_types;

pub use plex::PlexServer;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the media server.
#[derive(Debug, Error)]
pub enum MediaServerError {
    /// Request to the server failed at the transport level
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The server answered with an unexpected HTTP status
    #[error("Server returned HTTP {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Failed to parse the server's JSON response
    #[error("Failed to parse server response: {0}")]
    ParseError(String),

    /// No library section with the requested name exists on the server
    #[error("Library section not found: {0}")]
    LibraryNotFound(String),
}

/// A TV show in the audited library section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// The server's identifier for this show
    pub rating_key: String,
    /// The show title
    pub title: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// The server's identifier for this episode
    pub rating_key: String,
    /// The episode title
    pub title: String,
    /// Full URL of the episode's poster image, if the server knows one
    pub poster_url: Option<String>,
    /// Local filesystem paths of the episode's media files
    pub locations: Vec<PathBuf>,
}

/// Trait for media server clients that can enumerate a TV library.
///
/// Implementors of this trait expose the three server capabilities the audit
/// needs: listing the shows of a named library section, listing the episodes
/// of a show, and asking the server to re-scan an item's metadata.
pub trait MediaServer {
    /// Fetches all shows in the named library section.
    ///
    /// # Arguments
    ///
    /// * `library_name` - Title of the library section, e.g. "TV Shows"
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no section with that name
    /// exists on the server.
    fn list_shows(&self, library_name: &str) -> Result<Vec<Show>, MediaServerError>;

    /// Fetches all episodes of the given show, across all seasons.
    fn list_episodes(&self, show: &Show) -> Result<Vec<Episode>, MediaServerError>;

    /// Asks the server to re-scan the episode's local metadata and artwork.
    fn refresh_metadata(&self, episode: &Episode) -> Result<(), MediaServerError>;
}
