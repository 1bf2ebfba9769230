//! Poster existence checking
//!
//! A poster counts as missing only when its URL answers with HTTP 404.

use thiserror::Error;

/// Errors that can occur while checking a poster URL
#[derive(Debug, Error)]
pub enum PosterCheckError {
    /// The request did not complete at the transport level
    #[error("Poster request failed for {url}: {reason}")]
    RequestFailed { url: String, reason: String },
}

/// Trait for checking whether a poster image exists at a URL.
///
/// Implementors issue a single GET request and surface only the HTTP
/// status code; the caller decides what the code means.
pub trait PosterChecker {
    /// Fetches the URL and returns the response's HTTP status code.
    fn status(&self, url: &str) -> Result<u16, PosterCheckError>;
}

/// Poster checker backed by a blocking HTTP client.
pub struct HttpPosterChecker {
    client: reqwest::blocking::Client,
}

impl HttpPosterChecker {
    /// Creates a new checker with default client settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl PosterChecker for HttpPosterChecker {
    fn status(&self, url: &str) -> Result<u16, PosterCheckError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| PosterCheckError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(response.status().as_u16())
    }
}
