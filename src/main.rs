use clap::{Parser, ValueEnum};
use poster_patrol::{
    AuditSummary, Config, FfmpegExtractor, HttpPosterChecker, Mode, PlexServer, ProgressEvent,
    audit_library,
};
use std::path::PathBuf;
use std::process;

/// Checks a TV Show library for missing thumbnails
///
/// Connects to the Plex server from the configuration file, walks every
/// episode of the configured library section, and reports episodes whose
/// poster image is missing. In CREATE mode the missing thumbnails are
/// generated from the video files.
#[derive(Debug, Parser)]
#[command(name = "poster_patrol", version, about)]
struct Cli {
    /// Extraction mode, REPORT/CREATE
    #[arg(short, long, value_enum, ignore_case = true)]
    mode: ModeArg,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

/// Mode flag values accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Only print which episodes have missing thumbnails
    Report,
    /// Generate thumbnails for episodes that are missing them
    ///
    /// "WRITE" is kept as an alias for invocations of the old script.
    #[value(alias = "write")]
    Create,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Report => Mode::Report,
            ModeArg::Create => Mode::Create,
        }
    }
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Started { library_name, mode } => {
            println!("--Starting--");
            println!("Processing - {}", library_name);
            println!("Mode = {}", mode);
        }
        ProgressEvent::ShowScanned {
            title,
            episode_count,
        } => {
            println!("{}, episodes = {}", title, episode_count);
        }
        ProgressEvent::PosterMissing { stem } => {
            println!("Poster missing for - {}", stem);
        }
        ProgressEvent::ThumbnailGenerated { stem, .. } => {
            println!("Poster generated for - {}", stem);
        }
        ProgressEvent::Finished { .. } => {
            println!("--Finished--");
        }
    }
}

/// Prints the closing summary line
fn print_summary(summary: &AuditSummary, mode: Mode) {
    if summary.missing == 0 {
        println!(
            "\nNo missing posters found ({} episode(s) across {} show(s)).",
            summary.episodes, summary.shows
        );
    } else if mode == Mode::Create {
        println!(
            "\nFound {} missing poster(s), generated {} thumbnail(s).",
            summary.missing, summary.generated
        );
    } else {
        println!("\nFound {} missing poster(s).", summary.missing);
    }
}

fn main() {
    let cli = Cli::parse();
    let mode = Mode::from(cli.mode);

    // Read the configuration file
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    // CREATE mode needs ffmpeg; fail before touching the server
    if mode == Mode::Create && !FfmpegExtractor::is_ffmpeg_installed() {
        eprintln!("Error: ffmpeg not found. Please install it and ensure it is in your PATH.");
        process::exit(1);
    }

    let server = PlexServer::new(&config.baseurl, &config.token);
    let poster_checker = HttpPosterChecker::new();
    let extractor = FfmpegExtractor::new();

    match audit_library(
        &server,
        &poster_checker,
        &extractor,
        &config.library_name,
        mode,
        handle_progress_event,
    ) {
        Ok(summary) => print_summary(&summary, mode),
        Err(e) => {
            eprintln!("\nError during library audit: {}", e);
            process::exit(1);
        }
    }
}
