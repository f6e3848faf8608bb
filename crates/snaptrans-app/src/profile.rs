use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use snaptrans_config::Config;

const SETTINGS_FILE: &str = "settings.json";

/// Where settings and history live on disk
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
    history_file_name: String,
}

impl DataPaths {
    /// `config.data_dir` wins, then the platform data directory, then the
    /// working directory.
    pub fn resolve(config: &Config) -> anyhow::Result<Self> {
        let root = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => match ProjectDirs::from("", "", "SnapTrans") {
                Some(dirs) => dirs.data_dir().to_path_buf(),
                None => {
                    tracing::warn!("No home directory found, using the working directory");
                    std::env::current_dir().context("Failed to read working directory")?
                }
            },
        };

        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory {}", root.display()))?;

        Ok(Self {
            root,
            history_file_name: config.history.file_name.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn history_file(&self) -> PathBuf {
        self.root.join(&self.history_file_name)
    }
}
