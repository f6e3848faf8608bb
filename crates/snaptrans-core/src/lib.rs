pub mod generation;
pub mod language;
pub mod preprocess;
pub mod state;

pub use generation::{GenerationGuard, RequestGenerations};
pub use language::{LanguageCatalog, LanguageEntry};
pub use preprocess::prepare_source_text;
pub use state::AppState;
