mod manager;
mod parse;

pub use manager::HotkeyManager;
pub use parse::{HotkeyError, parse_hotkey};
