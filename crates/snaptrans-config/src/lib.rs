use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::history::HistoryConfig;
use self::translator::TranslatorConfig;

pub mod history;
pub mod settings;
pub mod translator;

pub use settings::{Settings, SettingsError, SettingsStore};
pub use translator::DirectBackendKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub history: HistoryConfig,

    /// Hotkey watcher poll interval
    pub delta_time: u64,
    /// Wait after the simulated copy before reading the clipboard
    pub capture_settle_ms: u64,
    /// Overrides the platform data directory for settings and history
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        let delta_time = env::var("DELTA_TIME_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        let capture_settle_ms = env::var("CAPTURE_SETTLE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(150);

        let history = HistoryConfig {
            enabled: env::var("SNAPTRANS_HISTORY")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            ..HistoryConfig::default()
        };

        let data_dir = env::var("SNAPTRANS_DATA_DIR").ok().map(PathBuf::from);

        Config {
            translator: TranslatorConfig::from_env(),
            history,

            delta_time,
            capture_settle_ms,
            data_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            history: HistoryConfig::default(),
            delta_time: 50,
            capture_settle_ms: 150,
            data_dir: None,
        }
    }
}
