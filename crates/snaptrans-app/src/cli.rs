use clap::{Args, Parser, Subcommand};

use crate::io::ListenMode;

/// Translate selected text with a hotkey
#[derive(Debug, Parser)]
#[command(name = "snaptrans", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate TEXT, or the clipboard when TEXT is omitted
    Translate(TranslateArgs),
    /// Wait for the hotkey and translate the selection each time it fires
    Listen(ListenArgs),
    /// Show or clear the translation history
    History(HistoryArgs),
    /// Show or change the saved settings
    Settings(SettingsArgs),
    /// List the built-in target languages
    Languages,
}

#[derive(Debug, Args)]
pub struct TranslateArgs {
    pub text: Option<String>,

    /// Target language name or code, remembered for next time
    #[arg(short, long)]
    pub to: Option<String>,

    /// Do not record this translation in the history
    #[arg(long)]
    pub no_history: bool,

    /// Put the translation on the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Args)]
pub struct ListenArgs {
    /// Translate whatever gets copied instead of waiting for the hotkey
    #[arg(long)]
    pub clipboard: bool,
}

impl ListenArgs {
    pub fn mode(&self) -> ListenMode {
        if self.clipboard {
            ListenMode::Clipboard
        } else {
            ListenMode::Hotkey
        }
    }
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long)]
    pub clear: bool,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Default target language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Hotkey such as ctrl+shift+t
    #[arg(long)]
    pub hotkey: Option<String>,
}
