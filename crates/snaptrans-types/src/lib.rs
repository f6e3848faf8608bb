pub mod types;

pub use types::{
    AppEvent, HistoryEntry, LanguageTarget, TextSource, Translation, TranslationOutcome,
    TranslationRequest,
};
