pub mod capture;
pub mod clipboard;
pub mod history;

pub use capture::{CaptureError, SelectionSource, SystemSelection};
pub use history::HistoryLog;
