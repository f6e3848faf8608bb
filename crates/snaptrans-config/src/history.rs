use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_file_name() -> String {
    "history.txt".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    /// Append every successful translation to the history log
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            file_name: default_file_name(),
        }
    }
}
