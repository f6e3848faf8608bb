use std::thread;
use std::time::Duration;

use arboard::Clipboard;
use enigo::{Enigo, Key, KeyboardControllable};

const POLL_ATTEMPTS: u32 = 10;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("No text selected")]
    NothingSelected,
}

/// Where the text to translate comes from when the hotkey fires
pub trait SelectionSource: Send + Sync {
    /// Blocking; run it off the async workers
    fn capture(&self) -> Result<String, CaptureError>;
}

/// Copies the current selection of the focused application
pub struct SystemSelection {
    settle: Duration,
}

impl SystemSelection {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }
}

impl SelectionSource for SystemSelection {
    fn capture(&self) -> Result<String, CaptureError> {
        capture_selection(self.settle)
    }
}

/// Send the copy shortcut and read the selection back from the clipboard.
///
/// The clipboard is emptied first so a stale entry is never mistaken for the
/// selection; it is restored when nothing gets copied.
pub fn capture_selection(settle: Duration) -> Result<String, CaptureError> {
    let mut clipboard = Clipboard::new()?;
    let previous = clipboard.get_text().ok();
    clipboard.clear()?;

    let mut enigo = Enigo::new();
    send_copy(&mut enigo);
    thread::sleep(settle);

    for _ in 0..POLL_ATTEMPTS {
        if let Ok(text) = clipboard.get_text()
            && !text.is_empty()
        {
            tracing::debug!("Captured {} chars from selection", text.chars().count());
            return Ok(text);
        }
        thread::sleep(POLL_INTERVAL);
    }

    if let Some(previous) = previous {
        restored(clipboard.set_text(previous));
    }
    Err(CaptureError::NothingSelected)
}

fn restored(result: Result<(), arboard::Error>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to restore clipboard: {}", e);
            false
        }
    }
}

fn send_copy(enigo: &mut Enigo) {
    // Modifiers of the hotkey itself may still be held down
    for key in [Key::Shift, Key::Alt, Key::Control, Key::Meta] {
        enigo.key_up(key);
    }
    thread::sleep(Duration::from_millis(30));

    enigo.key_down(copy_modifier());
    enigo.key_click(Key::Layout('c'));
    enigo.key_up(copy_modifier());
}

#[cfg(target_os = "macos")]
fn copy_modifier() -> Key {
    Key::Meta
}

#[cfg(not(target_os = "macos"))]
fn copy_modifier() -> Key {
    Key::Control
}
