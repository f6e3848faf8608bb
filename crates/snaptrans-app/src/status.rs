use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Counters for the current `listen` session
#[derive(Clone, Debug, Default)]
pub struct TranslationStats {
    pub requested: u64,
    pub completed: u64,
    pub failed: u64,
    pub superseded: u64,
    /// Still in flight when the session ended
    pub aborted: u64,
    pub last_translation_time: Option<SystemTime>,
}

/// Application status
#[derive(Clone)]
pub struct AppStatus {
    pub translations: Arc<RwLock<TranslationStats>>,
}

impl AppStatus {
    pub fn new() -> Self {
        Self {
            translations: Arc::new(RwLock::new(TranslationStats::default())),
        }
    }

    pub async fn snapshot(&self) -> TranslationStats {
        self.translations.read().await.clone()
    }
}

impl Default for AppStatus {
    fn default() -> Self {
        Self::new()
    }
}
