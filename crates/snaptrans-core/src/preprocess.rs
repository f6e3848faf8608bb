use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default source text cleanup before it goes to a provider
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Selections copied on Windows come with CRLF
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        text.nfc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Clean up captured text, `None` when nothing is left to translate
pub fn prepare_source_text(text: &str) -> Option<String> {
    let processed = DefaultPreprocessor.process(text);
    if processed.is_empty() {
        None
    } else {
        Some(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(prepare_source_text(""), None);
        assert_eq!(prepare_source_text("   "), None);
        assert_eq!(prepare_source_text("\r\n\t"), None);
    }

    #[test]
    fn trims_and_unifies_line_endings() {
        assert_eq!(
            prepare_source_text("  first line\r\nsecond line\r\n").as_deref(),
            Some("first line\nsecond line")
        );
    }

    #[test]
    fn composes_decomposed_characters() {
        // "e" followed by a combining acute accent
        let decomposed = "caf\u{0065}\u{0301}";
        assert_eq!(prepare_source_text(decomposed).as_deref(), Some("caf\u{00e9}"));
    }
}
