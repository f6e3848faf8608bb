//! Append-only plain-text translation history.
//!
//! Every translation becomes one block:
//!
//! ```text
//! [<source> → <target>]
//! Source text:
//! <source>
//! Translation:
//! <translation>
//!
//! ---
//!
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use snaptrans_types::HistoryEntry;

const SEPARATOR: &str = "\n\n---\n\n";
const SOURCE_MARKER: &str = "]\nSource text:\n";
const TRANSLATION_MARKER: &str = "\nTranslation:\n";
const ARROW: &str = " → ";

#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &HistoryEntry) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Whole block in a single write
        file.write_all(format_entry(entry).as_bytes())?;
        Ok(())
    }

    /// Whole log as written, empty when nothing was recorded yet
    pub fn read_raw(&self) -> io::Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    /// Entries in the order they were appended
    pub fn entries(&self) -> io::Result<Vec<HistoryEntry>> {
        let content = self.read_raw()?;
        Ok(parse_entries(&content))
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::write(&self.path, "") {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

pub fn format_entry(entry: &HistoryEntry) -> String {
    format!(
        "[{source} → {target}]\nSource text:\n{source}\nTranslation:\n{translation}{SEPARATOR}",
        source = entry.source_text,
        target = entry.target_language,
        translation = entry.translated_text,
    )
}

fn parse_entries(content: &str) -> Vec<HistoryEntry> {
    let mut entries = Vec::new();
    let mut rest = content;

    while !rest.trim().is_empty() {
        match parse_head(rest) {
            Some((source_text, target_language, body)) => {
                let (translated_text, next) = split_translation(body);
                entries.push(HistoryEntry {
                    source_text: source_text.to_string(),
                    target_language: target_language.to_string(),
                    translated_text: translated_text.to_string(),
                });
                rest = next;
            }
            None => {
                tracing::warn!("Skipping unreadable history block");
                match next_block(rest) {
                    Some(next) => rest = next,
                    None => break,
                }
            }
        }
    }

    entries
}

/// Reads `[<source> → <target>]\nSource text:\n<source>\nTranslation:\n`.
///
/// The source appears twice, so a split of the header is only accepted when
/// the body repeats it verbatim. Returns the source, the target and whatever
/// follows the translation marker.
fn parse_head(block: &str) -> Option<(&str, &str, &str)> {
    let inner = block.strip_prefix('[')?;

    for (marker_at, _) in inner.match_indices(SOURCE_MARKER) {
        let header = &inner[..marker_at];
        let after = &inner[marker_at + SOURCE_MARKER.len()..];

        for (arrow_at, _) in header.match_indices(ARROW) {
            let source = &header[..arrow_at];
            let target = &header[arrow_at + ARROW.len()..];
            if target.contains('\n') {
                continue;
            }
            if let Some(body) = after
                .strip_prefix(source)
                .and_then(|body| body.strip_prefix(TRANSLATION_MARKER))
            {
                return Some((source, target, body));
            }
        }
    }

    None
}

/// The translation ends at the first separator followed by another entry or
/// by the end of the log. A truncated final block runs to the end.
fn split_translation(body: &str) -> (&str, &str) {
    for at in separator_starts(body) {
        let next = &body[at + SEPARATOR.len()..];
        if next.trim().is_empty() || parse_head(next).is_some() {
            return (&body[..at], next);
        }
    }
    (body, "")
}

/// Start of the next readable entry after a damaged one
fn next_block(content: &str) -> Option<&str> {
    separator_starts(content)
        .map(|at| &content[at + SEPARATOR.len()..])
        .find(|next| parse_head(next).is_some())
}

/// Overlapping matches, so text ending in part of a separator cannot hide the real one
fn separator_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.char_indices()
        .map(|(at, _)| at)
        .filter(move |&at| text[at..].starts_with(SEPARATOR))
}
