//! Clipboard sink: where captured text goes.

use std::time::Duration;

/// Accepts text for the system clipboard. Fire and forget: implementations
/// report their own failures.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str);
}

/// System clipboard through `arboard`.
///
/// The handle is opened lazily and kept for the process lifetime; on X11
/// the copied text stays available only while the owner is alive. A
/// short-lived process uses [`SystemClipboard::holding`] to keep ownership
/// after each write.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    hold: Option<Duration>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .field("hold", &self.hold)
            .finish()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard whose writes block for up to `hold`, or until another
    /// application takes the clipboard. Only Linux needs this; elsewhere
    /// writes return at once.
    pub fn holding(hold: Duration) -> Self {
        Self {
            inner: None,
            hold: Some(hold),
        }
    }

    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }

    fn handle(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(e) => {
                    log::error!("Failed to open system clipboard: {}", e);
                    return None;
                }
            }
        }
        self.inner.as_mut()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) {
        let hold = self.hold;
        let Some(clipboard) = self.handle() else {
            return;
        };
        match set_text(clipboard, text, hold) {
            Ok(()) => log::info!("Copied {} characters to clipboard", text.chars().count()),
            Err(e) => log::error!("Failed to write clipboard: {}", e),
        }
    }
}

#[cfg(target_os = "linux")]
fn set_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match hold {
        Some(hold) => clipboard
            .set()
            .wait_until(std::time::Instant::now() + hold)
            .text(text),
        None => clipboard.set_text(text),
    }
}

#[cfg(not(target_os = "linux"))]
fn set_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    _hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

/// `None` discards the text.
impl<C: ClipboardSink> ClipboardSink for Option<C> {
    fn write_text(&mut self, text: &str) {
        if let Some(clipboard) = self {
            clipboard.write_text(text);
        }
    }
}

impl<C: ClipboardSink + ?Sized> ClipboardSink for &mut C {
    fn write_text(&mut self, text: &str) {
        (**self).write_text(text);
    }
}
