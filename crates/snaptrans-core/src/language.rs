use snaptrans_types::LanguageTarget;

/// One selectable translation target
#[derive(Debug, Clone, Copy)]
pub struct LanguageEntry {
    /// Name shown to the user and passed to the chat prompt
    pub name: &'static str,
    /// ISO 639-1 code
    pub code: &'static str,
    /// Alternative names accepted on input
    pub aliases: &'static [&'static str],
}

const BUILTIN: &[LanguageEntry] = &[
    LanguageEntry {
        name: "English",
        code: "en",
        aliases: &["английский"],
    },
    LanguageEntry {
        name: "German",
        code: "de",
        aliases: &["немецкий", "deutsch"],
    },
    LanguageEntry {
        name: "French",
        code: "fr",
        aliases: &["французский", "français"],
    },
    LanguageEntry {
        name: "Spanish",
        code: "es",
        aliases: &["испанский", "español"],
    },
    LanguageEntry {
        name: "Russian",
        code: "ru",
        aliases: &["русский"],
    },
];

/// Known target languages
pub struct LanguageCatalog {
    entries: Vec<LanguageEntry>,
}

impl LanguageCatalog {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.to_vec(),
        }
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    /// Look up by name, alias or code, ignoring case
    pub fn find(&self, input: &str) -> Option<&LanguageEntry> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.entries.iter().find(|entry| {
            entry.name.to_lowercase() == needle
                || entry.code == needle
                || entry.aliases.iter().any(|alias| alias.to_lowercase() == needle)
        })
    }

    /// Resolve user input into a target.
    ///
    /// Unknown input becomes a code-less target carrying the input as its name,
    /// only the chat model can handle those.
    pub fn resolve(&self, input: &str) -> LanguageTarget {
        match self.find(input) {
            Some(entry) => LanguageTarget::new(entry.name, Some(entry.code)),
            None => {
                tracing::debug!("Language '{}' not in catalog, no ISO code", input.trim());
                LanguageTarget::named(input.trim())
            }
        }
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_codes_and_aliases() {
        let catalog = LanguageCatalog::builtin();

        assert_eq!(catalog.resolve("Russian"), LanguageTarget::new("Russian", Some("ru")));
        assert_eq!(catalog.resolve("ru"), LanguageTarget::new("Russian", Some("ru")));
        assert_eq!(catalog.resolve("  GERMAN "), LanguageTarget::new("German", Some("de")));
        assert_eq!(catalog.resolve("английский"), LanguageTarget::new("English", Some("en")));
        assert_eq!(catalog.resolve("Испанский"), LanguageTarget::new("Spanish", Some("es")));
    }

    #[test]
    fn unknown_language_has_no_code() {
        let catalog = LanguageCatalog::builtin();
        let target = catalog.resolve("Klingon");
        assert_eq!(target.name, "Klingon");
        assert_eq!(target.code, None);
        assert!(catalog.find("").is_none());
    }
}
