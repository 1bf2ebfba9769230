//! poster_patrol - Audit a TV library for missing episode thumbnails
//!
//! This library provides the core functionality for walking a media
//! server's TV library, checking every episode for a reachable poster
//! image, and generating a replacement thumbnail from the episode's video
//! file when the poster is missing.

mod config;
mod media_server;
mod poster_check;
mod thumbnail;

pub use config::{Config, ConfigError};
pub use media_server::{Episode, MediaServer, MediaServerError, PlexServer, Show};
pub use poster_check::{HttpPosterChecker, PosterCheckError, PosterChecker};
pub use thumbnail::{FfmpegExtractor, FrameExtractor, ThumbnailError, generate_thumbnail};

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Run mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only report episodes with missing posters
    Report,
    /// Report missing posters and generate replacement thumbnails
    Create,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Report => write!(f, "REPORT"),
            Mode::Create => write!(f, "CREATE"),
        }
    }
}

/// Aggregate counts of a completed audit run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuditSummary {
    /// Number of shows in the audited library section
    pub shows: usize,
    /// Number of episodes inspected across all shows
    pub episodes: usize,
    /// Number of episodes whose poster URL answered 404
    pub missing: usize,
    /// Number of thumbnails written (always 0 in report mode)
    pub generated: usize,
}

/// Progress event emitted during an audit run
///
/// These events allow library users to track progress and provide feedback
/// while the library is walked.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Audit started
    Started { library_name: String, mode: Mode },

    /// A show's episode list was fetched
    ShowScanned { title: String, episode_count: usize },

    /// An episode's poster URL answered 404
    PosterMissing { stem: String },

    /// A replacement thumbnail was written next to the video file
    ThumbnailGenerated { stem: String, path: PathBuf },

    /// Audit complete
    Finished { summary: AuditSummary },
}

/// Top-level error type for audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    /// Error while talking to the media server
    #[error("Media server error: {0}")]
    MediaServer(#[from] MediaServerError),

    /// Error while checking a poster URL
    #[error("Poster check error: {0}")]
    PosterCheck(#[from] PosterCheckError),

    /// Error while generating a thumbnail
    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),

    /// The server returned an episode without any file locations
    #[error("Episode has no file locations: {title}")]
    NoFileLocation { title: String },
}

/// Returns the file name of a path without its extension.
fn file_stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Audits a TV library section for episodes with missing posters
///
/// Every show of the named library section is fetched from the media
/// server, and every episode's poster URL is checked with a single GET
/// request. A 404 answer marks the poster as missing; any other status
/// counts as present. Episodes without a poster URL are skipped entirely.
///
/// In [`Mode::Create`] a missing poster is replaced by extracting the frame
/// at the video's temporal midpoint into `<video_dir>/<video_stem>.png`,
/// after which the server is asked to refresh the episode's metadata so it
/// picks up the new artwork. In [`Mode::Report`] nothing is written.
///
/// Progress events are emitted through the provided callback, allowing
/// library users to track progress, display status, or remain silent.
///
/// # Arguments
///
/// * `server` - Media server client used to enumerate the library
/// * `poster_checker` - HTTP checker for poster URLs
/// * `extractor` - Frame extractor used in create mode
/// * `library_name` - Title of the library section to audit
/// * `mode` - Whether to only report or also generate thumbnails
/// * `progress_callback` - Closure called with progress events
///
/// # Errors
///
/// The first failing server call, poster check, or frame extraction aborts
/// the run; nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use poster_patrol::{
///     audit_library, FfmpegExtractor, HttpPosterChecker, Mode, PlexServer,
/// };
///
/// let server = PlexServer::new("http://plex.local:32400", "token");
/// let summary = audit_library(
///     &server,
///     &HttpPosterChecker::new(),
///     &FfmpegExtractor::new(),
///     "TV Shows",
///     Mode::Report,
///     |_| {}, // Ignore all progress events
/// )
/// .unwrap();
///
/// println!("{} missing poster(s)", summary.missing);
/// ```
pub fn audit_library<M, P, X, F>(
    server: &M,
    poster_checker: &P,
    extractor: &X,
    library_name: &str,
    mode: Mode,
    mut progress_callback: F,
) -> Result<AuditSummary, AuditError>
where
    M: MediaServer,
    P: PosterChecker,
    X: FrameExtractor,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::Started {
        library_name: library_name.to_string(),
        mode,
    });

    let mut summary = AuditSummary::default();

    let shows = server.list_shows(library_name)?;
    summary.shows = shows.len();

    for show in &shows {
        let episodes = server.list_episodes(show)?;
        summary.episodes += episodes.len();

        progress_callback(ProgressEvent::ShowScanned {
            title: show.title.clone(),
            episode_count: episodes.len(),
        });

        for episode in &episodes {
            // Episodes the server knows no poster URL for are not checked
            let Some(poster_url) = episode.poster_url.as_deref() else {
                continue;
            };

            // Only a 404 marks the poster as missing; every other status
            // counts as present, auth failures and 5xx included
            if poster_checker.status(poster_url)? != 404 {
                continue;
            }

            let video = episode
                .locations
                .first()
                .ok_or_else(|| AuditError::NoFileLocation {
                    title: episode.title.clone(),
                })?;
            let stem = file_stem_of(video);

            summary.missing += 1;
            progress_callback(ProgressEvent::PosterMissing { stem: stem.clone() });

            if mode == Mode::Create {
                let path = generate_thumbnail(extractor, video)?;
                summary.generated += 1;

                progress_callback(ProgressEvent::ThumbnailGenerated { stem, path });

                // Let the server pick up the freshly written artwork
                server.refresh_metadata(episode)?;
            }
        }
    }

    progress_callback(ProgressEvent::Finished { summary });

    Ok(summary)
}
