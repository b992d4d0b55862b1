//! Full-screen terminal lifecycle: raw mode, alternate screen, panic-safe
//! restore.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use super::rendering;
use super::StatusBar;

/// Set while the terminal is in raw mode (read by the panic hook)
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Ratatui terminal on a crossterm backend.
///
/// Enters raw mode and the alternate screen on creation and restores the
/// terminal on drop, on [`Tui::restore`], or from the panic hook.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether this TUI is responsible for cleanup
    active: bool,
}

impl Tui {
    /// Create a new TUI, entering raw mode and alternate screen.
    ///
    /// # Errors
    /// Returns an error if stdout is not a terminal or setup fails.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        if let Err(e) = crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide
        ) {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            let _ = disable_raw_mode();
            return Err(e);
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Draw the grid text and status bar.
    pub fn draw_view(&mut self, text: &str, status_bar: &StatusBar) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            rendering::render_view(frame, text, status_bar, area);
        })?;
        Ok(())
    }

    /// Restore the terminal to its original state. Drop is a no-op after this.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            )?;
            disable_raw_mode()?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            // Best-effort cleanup - ignore errors during drop
            let _ = crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            );
            let _ = disable_raw_mode();
            let _ = self.terminal.show_cursor();
        }
    }
}

/// Install (once) a panic hook that restores the terminal before the panic
/// message is printed.
fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = crossterm::execute!(
                io::stdout(),
                crossterm::terminal::LeaveAlternateScreen,
                crossterm::cursor::Show
            );
            let _ = disable_raw_mode();
        }

        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    // TUI requires a real TTY; these tests skip themselves without one.

    #[test]
    fn test_tui_new_and_drop() {
        match Tui::new() {
            Ok(tui) => {
                assert!(tui.is_active());
                assert!(RAW_MODE_ACTIVE.load(Ordering::SeqCst));
                drop(tui);
                assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));
            }
            Err(e) => eprintln!("Skipping test (no TTY): {}", e),
        }
    }

    #[test]
    fn test_tui_double_restore() {
        match Tui::new() {
            Ok(mut tui) => {
                tui.restore().expect("Should restore terminal");
                assert!(!tui.is_active());

                tui.restore().expect("Second restore should not fail");
                assert!(!tui.is_active());
            }
            Err(e) => eprintln!("Skipping test (no TTY): {}", e),
        }
    }

    #[test]
    fn test_panic_hook_installs_once() {
        install_panic_hook();
        install_panic_hook();
    }
}
