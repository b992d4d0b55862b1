//! Subcommand handlers.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::camera::{CameraError, Canvas, PatternSource, Resolution, VideoSource};
use crate::cli::RunSettings;
use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::config::{default_path, LogLevel, SourceKind};
use crate::controller::{CaptureController, CaptureOutcome, FrameScheduler};
use crate::error::AppError;
use crate::event_loop;
use crate::output::TextBuffer;
use crate::session::Session;
use crate::terminal::{TerminalView, Tui};

/// Acquire the configured video source. Playback starts later, on the start
/// action.
pub fn open_source(settings: &RunSettings) -> Result<Box<dyn VideoSource>, CameraError> {
    match settings.source {
        SourceKind::Pattern => Ok(Box::new(PatternSource::new(Resolution::SOURCE))),
        SourceKind::Camera => open_camera(settings.device),
    }
}

#[cfg(feature = "camera")]
fn open_camera(device: u32) -> Result<Box<dyn VideoSource>, CameraError> {
    use crate::camera::{CameraSettings, CameraSource};

    let camera = CameraSource::new(CameraSettings {
        device_index: device,
        ..CameraSettings::default()
    });
    Ok(Box::new(camera))
}

#[cfg(not(feature = "camera"))]
fn open_camera(_device: u32) -> Result<Box<dyn VideoSource>, CameraError> {
    Err(CameraError::Unsupported)
}

/// Interactive full-screen view.
pub fn run_interactive(settings: &RunSettings) -> Result<(), AppError> {
    let source = open_source(settings)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let view = TerminalView::new(Tui::new()?);
    let mut controller = CaptureController::new(
        source,
        Canvas::new(Resolution::CANVAS, settings.mirror),
        view,
        SystemClipboard::new(),
        FrameScheduler::new(settings.fps),
    );
    let mut session = Session::new();

    log::info!(
        "Interactive view: source={:?} mirror={} fps={}",
        settings.source,
        settings.mirror,
        settings.fps
    );
    let result = runtime.block_on(event_loop::run(&mut controller, &mut session));

    controller.output_mut().restore()?;
    result
}

/// Longest wait in `snapshot` for the source's first frame
pub const SNAPSHOT_WARMUP: Duration = Duration::from_secs(5);

/// How long `snapshot --copy` keeps clipboard ownership (Linux)
pub const SNAPSHOT_CLIPBOARD_HOLD: Duration = Duration::from_secs(10);

/// Options for a headless snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub ticks: u32,
    pub copy: bool,
    pub mirror: bool,
    /// Pause between ticks
    pub frame_interval: Duration,
    /// How long to keep retrying until the source delivers a first frame
    pub warmup: Duration,
}

/// Render `ticks` ticks into memory and return the last published text.
///
/// A live camera reports its stream open before the first frame lands, so
/// the first tick is retried every `frame_interval` until a frame renders or
/// `warmup` runs out. The remaining ticks follow at `frame_interval`.
///
/// With `copy`, the grid is frozen through the capture action, which also
/// sends it to `clipboard`.
pub fn take_snapshot<V, C>(
    source: V,
    clipboard: C,
    options: &SnapshotOptions,
) -> Result<String, AppError>
where
    V: VideoSource,
    C: ClipboardSink,
{
    let mut controller = CaptureController::new(
        source,
        Canvas::new(Resolution::CANVAS, options.mirror),
        TextBuffer::new(),
        clipboard,
        FrameScheduler::default(),
    );
    controller.start_playback()?;

    let deadline = Instant::now() + options.warmup;
    let retry = options.frame_interval.max(Duration::from_millis(1));
    run_due_ticks(&mut controller);
    while controller.ticks_rendered() == 0 && Instant::now() < deadline {
        std::thread::sleep(retry);
        run_due_ticks(&mut controller);
    }

    if controller.ticks_rendered() == 0 {
        controller.stop();
        return Err(AppError::NothingRendered {
            waited: options.warmup,
        });
    }
    log::debug!(
        "First frame rendered after {} failed ticks",
        controller.ticks_failed()
    );

    for _ in 1..options.ticks {
        if !options.frame_interval.is_zero() {
            std::thread::sleep(options.frame_interval);
        }
        run_due_ticks(&mut controller);
    }

    if options.copy {
        if let CaptureOutcome::Captured(text) = controller.toggle_capture() {
            return Ok(text);
        }
    }
    controller.stop();
    Ok(controller.output().text().to_string())
}

fn run_due_ticks<V, C>(
    controller: &mut CaptureController<V, Canvas, TextBuffer, C, FrameScheduler>,
) where
    V: VideoSource,
    C: ClipboardSink,
{
    for handle in controller.scheduler_mut().take_due() {
        controller.tick(handle);
    }
}

/// Holds captured text until the snapshot has been printed.
#[derive(Debug, Default)]
struct PendingCopy(Option<String>);

impl ClipboardSink for PendingCopy {
    fn write_text(&mut self, text: &str) {
        self.0 = Some(text.to_string());
    }
}

/// `snapshot` subcommand: print the grid to `out`.
///
/// With `copy`, the clipboard is written after printing. On Linux the
/// process then keeps clipboard ownership for up to
/// [`SNAPSHOT_CLIPBOARD_HOLD`], or until another application copies, so the
/// text survives without a clipboard manager.
pub fn snapshot(
    settings: &RunSettings,
    ticks: u32,
    copy: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let source = open_source(settings)?;
    let options = SnapshotOptions {
        ticks,
        copy,
        mirror: settings.mirror,
        frame_interval: FrameScheduler::new(settings.fps).frame_interval(),
        warmup: SNAPSHOT_WARMUP,
    };

    let mut pending = PendingCopy::default();
    let text = take_snapshot(source, &mut pending, &options)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;

    if let Some(copied) = pending.0 {
        #[cfg(target_os = "linux")]
        eprintln!(
            "Holding the clipboard for up to {}s (ends early once another app copies)",
            SNAPSHOT_CLIPBOARD_HOLD.as_secs()
        );
        SystemClipboard::holding(SNAPSHOT_CLIPBOARD_HOLD).write_text(&copied);
    }
    Ok(())
}

/// `list-cameras` subcommand.
#[cfg(feature = "camera")]
pub fn list_cameras(out: &mut impl Write) -> Result<(), AppError> {
    let devices = crate::camera::list_devices()?;
    if devices.is_empty() {
        writeln!(out, "No cameras found.")?;
        writeln!(out)?;
        writeln!(out, "Make sure your camera is connected and permissions are granted.")?;
    } else {
        writeln!(out, "Available cameras:")?;
        for device in devices {
            writeln!(out, "  {}", device)?;
        }
        writeln!(out)?;
        writeln!(out, "Use --camera <index> to select a camera.")?;
    }
    Ok(())
}

/// `list-cameras` subcommand.
#[cfg(not(feature = "camera"))]
pub fn list_cameras(_out: &mut impl Write) -> Result<(), AppError> {
    Err(CameraError::Unsupported.into())
}

/// Default config file contents written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# ascii-mirror configuration

[source]
# Video source: "pattern" (built-in test pattern) or "camera"
kind = "pattern"

[camera]
# Camera device index (see `ascii-mirror list-cameras`)
device = 0
# Mirror horizontally (selfie mode)
mirror = true

[display]
# Display tick rate, 1-240
fps = 60

[log]
# off, error, warn, info, debug, trace
level = "info"
# file = "/tmp/ascii-mirror.log"
"#;

/// `config show` subcommand.
///
/// `log_level` is the resolved level (flag, then environment, then file).
pub fn config_show(
    settings: &RunSettings,
    log_level: LogLevel,
    config_path: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let path = config_path.map(Path::to_path_buf).unwrap_or_else(default_path);

    writeln!(out, "Current configuration:")?;
    writeln!(out, "  Source: {:?}", settings.source)?;
    writeln!(out, "  Camera: {}", settings.device)?;
    writeln!(out, "  Mirror: {}", if settings.mirror { "yes" } else { "no" })?;
    writeln!(out, "  FPS: {}", settings.fps)?;
    writeln!(out, "  Log level: {:?}", log_level)?;
    writeln!(out, "  Log file: {}", settings.log_file.display())?;
    writeln!(out)?;
    if path.exists() {
        writeln!(out, "Config file: {} (exists)", path.display())?;
    } else {
        writeln!(out, "Config file: {} (not found)", path.display())?;
    }
    Ok(())
}

/// `config init` subcommand: write [`DEFAULT_CONFIG`], never overwriting.
pub fn config_init(config_path: Option<&Path>, out: &mut impl Write) -> Result<(), AppError> {
    let path = config_path.map(Path::to_path_buf).unwrap_or_else(default_path);

    if path.exists() {
        return Err(AppError::ConfigExists(path));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, DEFAULT_CONFIG)?;

    writeln!(out, "Created config file: {}", path.display())?;
    Ok(())
}
