//! Thumbnail generation
//!
//! This module extracts a still frame from an episode's video file using
//! ffmpeg and saves it as a PNG next to the video.

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during thumbnail generation
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// The episode's video file is not present on local disk
    #[error("Video file does not exist: {0}")]
    VideoNotFound(PathBuf),

    /// The ffmpeg process could not be spawned or driven
    #[error("Failed to run ffmpeg: {0}")]
    FfmpegFailed(String),

    /// ffmpeg did not report a duration for the video
    #[error("Could not determine duration of {0}")]
    DurationUnavailable(PathBuf),

    /// ffmpeg exited unsuccessfully while extracting the frame
    #[error("Frame extraction failed for {path}: {reason}")]
    ExtractionFailed { path: PathBuf, reason: String },
}

/// Trait for probing videos and extracting single frames.
///
/// Implementors provide the two video capabilities thumbnail generation
/// needs: reading a video's total duration and saving the frame at a given
/// timestamp as an image file.
pub trait FrameExtractor {
    /// Returns the video's total duration in seconds.
    fn probe_duration(&self, video: &Path) -> Result<f64, ThumbnailError>;

    /// Saves the frame at `timestamp_secs` as an image file at `output`.
    ///
    /// The image format is derived from the output path's extension.
    fn save_frame(
        &self,
        video: &Path,
        timestamp_secs: f64,
        output: &Path,
    ) -> Result<(), ThumbnailError>;
}

/// Generates a thumbnail for a video file
///
/// The frame at the video's temporal midpoint is saved as a PNG with the
/// same base name as the video, in the same directory.
///
/// # Arguments
///
/// * `extractor` - The frame extractor to use
/// * `video` - Path to the video file
///
/// # Returns
///
/// The path of the written image file.
pub fn generate_thumbnail<X>(extractor: &X, video: &Path) -> Result<PathBuf, ThumbnailError>
where
    X: FrameExtractor,
{
    let duration = extractor.probe_duration(video)?;
    let output = video.with_extension("png");

    extractor.save_frame(video, duration / 2.0, &output)?;

    Ok(output)
}

/// Frame extractor backed by the ffmpeg binary.
pub struct FfmpegExtractor;

impl FfmpegExtractor {
    /// Creates a new extractor using the ffmpeg binary from the PATH.
    pub fn new() -> Self {
        Self
    }

    /// Checks if the ffmpeg binary is installed and reachable.
    pub fn is_ffmpeg_installed() -> bool {
        ffmpeg_sidecar::command::ffmpeg_is_installed()
    }
}

impl FrameExtractor for FfmpegExtractor {
    fn probe_duration(&self, video: &Path) -> Result<f64, ThumbnailError> {
        if !video.is_file() {
            return Err(ThumbnailError::VideoNotFound(video.to_path_buf()));
        }

        let input = video.to_string_lossy();

        // Without an output ffmpeg exits unsuccessfully, but it still prints
        // the input metadata carrying the duration we need.
        let mut child = FfmpegCommand::new()
            .input(input.as_ref())
            .spawn()
            .map_err(|e| ThumbnailError::FfmpegFailed(e.to_string()))?;

        let mut duration = None;

        let events = child
            .iter()
            .map_err(|e| ThumbnailError::FfmpegFailed(e.to_string()))?;

        for event in events {
            if let FfmpegEvent::ParsedDuration(parsed) = event {
                duration = Some(parsed.duration);
            }
        }

        // The probe run always exits unsuccessfully; only reap the process
        let _ = child.wait();

        duration.ok_or_else(|| ThumbnailError::DurationUnavailable(video.to_path_buf()))
    }

    fn save_frame(
        &self,
        video: &Path,
        timestamp_secs: f64,
        output: &Path,
    ) -> Result<(), ThumbnailError> {
        let input = video.to_string_lossy();
        let output_arg = output.to_string_lossy();

        // Seeking before the input keeps extraction fast on long videos
        let mut child = FfmpegCommand::new()
            .arg("-ss")
            .arg(format!("{:.3}", timestamp_secs))
            .input(input.as_ref())
            .arg("-frames:v")
            .arg("1")
            .overwrite()
            .output(output_arg.as_ref())
            .spawn()
            .map_err(|e| ThumbnailError::FfmpegFailed(e.to_string()))?;

        let events = child
            .iter()
            .map_err(|e| ThumbnailError::FfmpegFailed(e.to_string()))?;

        let mut error_lines = Vec::new();

        for event in events {
            if let FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) = event {
                error_lines.push(line);
            }
        }

        let status = child
            .wait()
            .map_err(|e| ThumbnailError::FfmpegFailed(e.to_string()))?;

        if !status.success() {
            return Err(ThumbnailError::ExtractionFailed {
                path: video.to_path_buf(),
                reason: error_lines.join("; "),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingExtractor {
        duration: f64,
        frames: RefCell<Vec<(PathBuf, f64, PathBuf)>>,
    }

    impl RecordingExtractor {
        fn new(duration: f64) -> Self {
            Self {
                duration,
                frames: RefCell::new(Vec::new()),
            }
        }
    }

    impl FrameExtractor for RecordingExtractor {
        fn probe_duration(&self, _video: &Path) -> Result<f64, ThumbnailError> {
            Ok(self.duration)
        }

        fn save_frame(
            &self,
            video: &Path,
            timestamp_secs: f64,
            output: &Path,
        ) -> Result<(), ThumbnailError> {
            self.frames.borrow_mut().push((
                video.to_path_buf(),
                timestamp_secs,
                output.to_path_buf(),
            ));
            Ok(())
        }
    }

    #[test]
    fn test_thumbnail_is_written_beside_the_video() {
        let extractor = RecordingExtractor::new(1200.0);

        let output = generate_thumbnail(&extractor, Path::new("/tv/Foo/Pilot.mkv")).unwrap();

        assert_eq!(output, PathBuf::from("/tv/Foo/Pilot.png"));
    }

    #[test]
    fn test_frame_is_taken_at_the_midpoint() {
        let extractor = RecordingExtractor::new(1200.0);

        generate_thumbnail(&extractor, Path::new("/tv/Foo/Pilot.mkv")).unwrap();

        let frames = extractor.frames.borrow();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].1, 600.0);
    }

    #[test]
    fn test_probe_failure_skips_extraction() {
        struct FailingProbe;

        impl FrameExtractor for FailingProbe {
            fn probe_duration(&self, video: &Path) -> Result<f64, ThumbnailError> {
                Err(ThumbnailError::VideoNotFound(video.to_path_buf()))
            }

            fn save_frame(
                &self,
                _video: &Path,
                _timestamp_secs: f64,
                _output: &Path,
            ) -> Result<(), ThumbnailError> {
                panic!("save_frame must not be called when probing fails");
            }
        }

        let result = generate_thumbnail(&FailingProbe, Path::new("/tv/Foo/Pilot.mkv"));
        assert!(matches!(result, Err(ThumbnailError::VideoNotFound(_))));
    }
}
