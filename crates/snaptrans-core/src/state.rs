use snaptrans_config::{Config, Settings};
use tokio::sync::RwLock;

use crate::generation::RequestGenerations;
use crate::language::LanguageCatalog;

#[derive(Default)]
pub struct AppState {
    pub config: RwLock<Config>,
    pub settings: RwLock<Settings>,
    pub languages: LanguageCatalog,
    pub generations: RequestGenerations,
}

impl AppState {
    pub fn new(config: Config, settings: Settings) -> Self {
        Self {
            config: RwLock::new(config),
            settings: RwLock::new(settings),
            languages: LanguageCatalog::builtin(),
            generations: RequestGenerations::new(),
        }
    }
}
