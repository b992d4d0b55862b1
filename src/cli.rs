//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, LogLevel, SourceKind, MAX_FPS};
use crate::logging::default_log_path;

/// Parse and validate the display rate (1-240 fps)
pub fn parse_fps(s: &str) -> Result<u32, String> {
    let fps: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid frame rate", s))?;
    if !(1..=MAX_FPS).contains(&fps) {
        return Err(format!(
            "Frame rate must be between 1 and {} fps, got {}",
            MAX_FPS, fps
        ));
    }
    Ok(fps)
}

/// Parse and validate a tick count (at least 1)
pub fn parse_ticks(s: &str) -> Result<u32, String> {
    let ticks: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid tick count", s))?;
    if ticks == 0 {
        return Err("Tick count must be at least 1".to_string());
    }
    Ok(ticks)
}

/// Live camera feed rendered as ASCII art; press c to freeze and copy it
#[derive(Parser, Debug)]
#[command(name = "ascii-mirror")]
#[command(version, about = "Live camera feed rendered as ASCII art in the terminal", long_about = None)]
#[command(after_help = "KEYS:
    s / Enter         start the camera
    c / Space         freeze and copy to clipboard, press again to resume
    q / Esc / Ctrl+C  quit

EXAMPLES:
    # Animated test pattern (no camera needed)
    ascii-mirror

    # First webcam (build with --features camera)
    ascii-mirror --source camera --camera 0

    # Print one frame to stdout and copy it
    ascii-mirror snapshot --ticks 10 --copy")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Video source
    #[arg(long, global = true)]
    pub source: Option<SourceKind>,

    /// Camera device index (from list-cameras)
    #[arg(long, global = true)]
    pub camera: Option<u32>,

    /// Disable the selfie mirror
    #[arg(long, global = true)]
    pub no_mirror: bool,

    /// Display tick rate (1-240)
    #[arg(long, global = true, value_parser = parse_fps)]
    pub fps: Option<u32>,

    /// Log verbosity (overrides ASCII_MIRROR_LOG and the config file)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive view (default)
    Run,
    /// Render headless and print the last grid to stdout
    Snapshot {
        /// Ticks to render before printing
        #[arg(long, default_value = "1", value_parser = parse_ticks)]
        ticks: u32,
        /// Also copy the grid to the clipboard via the capture action
        #[arg(long)]
        copy: bool,
    },
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Create a default config file
    Init,
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub source: SourceKind,
    pub device: u32,
    pub mirror: bool,
    pub fps: u32,
    pub log_file: PathBuf,
}

impl Args {
    /// Merge flags over `config`. Log level is resolved separately since it
    /// also reads the environment.
    pub fn settings(&self, config: &Config) -> RunSettings {
        RunSettings {
            source: self.source.unwrap_or(config.source.kind),
            device: self.camera.unwrap_or(config.camera.device),
            mirror: config.camera.mirror && !self.no_mirror,
            fps: self.fps.unwrap_or(config.display.fps),
            log_file: config.log.file.clone().unwrap_or_else(default_log_path),
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
