//! Async event loop for the interactive view.
//!
//! One `tokio::select!` multiplexes keyboard events and the display-rate
//! interval, so key handlers and ticks never run concurrently.

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;

use crate::camera::{Canvas, VideoSource};
use crate::clipboard::SystemClipboard;
use crate::controller::{CaptureController, FrameScheduler};
use crate::error::AppError;
use crate::input::handle_key_event;
use crate::session::{Flow, Session};
use crate::terminal::TerminalView;

/// The controller as wired for the interactive view.
pub type TerminalController =
    CaptureController<Box<dyn VideoSource>, Canvas, TerminalView, SystemClipboard, FrameScheduler>;

/// Run until the user quits or the event stream ends.
pub async fn run(controller: &mut TerminalController, session: &mut Session) -> Result<(), AppError> {
    let mut event_stream = EventStream::new();

    let mut frames = tokio::time::interval(controller.scheduler().frame_interval());
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    controller.output_mut().set_status(session.status_bar())?;

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match session.handle(handle_key_event(key_event), controller) {
                            Flow::Quit => break,
                            Flow::Redraw => {
                                controller.output_mut().set_status(session.status_bar())?;
                            }
                            Flow::Continue => {}
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        controller.output_mut().redraw()?;
                    }
                    Some(Ok(_)) => {
                        // Mouse, focus, paste
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }

            _ = frames.tick() => {
                for handle in controller.scheduler_mut().take_due() {
                    controller.tick(handle);
                }
            }
        }
    }

    log::info!(
        "Session ended: {} frames rendered, {} failed",
        controller.ticks_rendered(),
        controller.ticks_failed()
    );
    Ok(())
}
