use snaptrans_types::LanguageTarget;

/// Returned by the detection step when the model cannot be asked
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

pub const DETECT_SYSTEM_PROMPT: &str =
    "You are a language detector. Reply with a single word (e.g., English, Russian, etc.).";

pub const TRANSLATE_SYSTEM_PROMPT: &str = "You are a professional translator. Return ONLY the translation, without any explanations or extra text.";

pub fn detect_prompt(text: &str) -> String {
    format!(
        "Detect the language of the following text. Reply with a single word (e.g., English, Russian, etc.):\n\n{text}"
    )
}

pub fn translation_prompt(text: &str, source_language: &str, target: &LanguageTarget) -> String {
    let destination = match &target.code {
        Some(code) => format!("{} ({code})", target.name),
        None => target.name.clone(),
    };

    format!(
        "Translate the following text from {source_language} to {destination}.\n\
         - Output ONLY the translation, without any explanations, comments, or extra text.\n\
         - Use only the official alphabet of the target language.\n\
         - If you do not know the target language, return the original text unchanged.\n\
         - Do not transliterate, translate the meaning.\n\
         \n\
         Text to translate:\n\
         \n\
         {text}"
    )
}

/// Reduce a detector reply to the language name.
///
/// Models sometimes answer "English." or "Language: English" despite the prompt.
/// Multi-word names such as "Brazilian Portuguese" are kept whole.
pub fn clean_detected_language(reply: &str) -> Option<String> {
    let reply = reply.trim();
    let reply = match reply.split_once(':') {
        Some((label, rest)) if label.split_whitespace().count() <= 3 => rest,
        _ => reply,
    };
    let name = reply
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != ')')
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
        .trim();

    if name.chars().any(char::is_alphabetic) {
        Some(name.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_prompt_with_code() {
        let prompt = translation_prompt("Hello", "English", &LanguageTarget::new("Russian", Some("ru")));

        assert!(prompt.starts_with("Translate the following text from English to Russian (ru).\n"));
        assert!(prompt.contains("- Use only the official alphabet of the target language.\n"));
        assert!(prompt.contains("- Do not transliterate, translate the meaning.\n"));
        assert!(prompt.ends_with("Text to translate:\n\nHello"));
    }

    #[test]
    fn translation_prompt_without_code() {
        let prompt = translation_prompt("Hallo", UNKNOWN_LANGUAGE, &LanguageTarget::named("Klingon"));
        assert!(prompt.starts_with("Translate the following text from Unknown to Klingon.\n"));
        assert!(prompt.contains("return the original text unchanged"));
    }

    #[test]
    fn detect_prompt_embeds_text() {
        assert!(detect_prompt("Bonjour").ends_with(":\n\nBonjour"));
    }

    #[test]
    fn detected_language_cleanup() {
        assert_eq!(clean_detected_language("English").as_deref(), Some("English"));
        assert_eq!(clean_detected_language(" French.\n").as_deref(), Some("French"));
        assert_eq!(clean_detected_language("Language: German").as_deref(), Some("German"));
        assert_eq!(clean_detected_language("Русский").as_deref(), Some("Русский"));
        assert_eq!(clean_detected_language("   "), None);
        assert_eq!(clean_detected_language("..."), None);
    }

    #[test]
    fn detected_language_keeps_multi_word_names() {
        assert_eq!(
            clean_detected_language("Brazilian Portuguese").as_deref(),
            Some("Brazilian Portuguese")
        );
        assert_eq!(
            clean_detected_language("Chinese (Simplified)").as_deref(),
            Some("Chinese (Simplified)")
        );
        assert_eq!(
            clean_detected_language("Detected language: Scottish Gaelic.\n").as_deref(),
            Some("Scottish Gaelic")
        );
        assert_eq!(clean_detected_language("\"Spanish\"").as_deref(), Some("Spanish"));
    }
}
