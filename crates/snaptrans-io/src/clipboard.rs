use std::time::Duration;

use arboard::Clipboard;
use tokio::time;

pub fn read_text() -> Result<String, arboard::Error> {
    Clipboard::new()?.get_text()
}

pub fn write_text(text: &str) -> Result<(), arboard::Error> {
    Clipboard::new()?.set_text(text.to_string())
}

/// Call `on_text` every time new non-empty text shows up on the clipboard.
///
/// Whatever is on the clipboard when the watcher starts is not reported.
pub async fn watch_clipboard<F>(mut on_text: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    let mut clipboard = Clipboard::new()?;
    let mut last_text = clipboard.get_text().unwrap_or_default();

    let mut interval = time::interval(Duration::from_millis(500));

    loop {
        interval.tick().await;
        if let Ok(text) = clipboard.get_text()
            && !text.trim().is_empty()
            && text != last_text
        {
            last_text = text.clone();
            on_text(text);
        }
    }
}
