//! Shell configuration.
//!
//! Reads optional JSON at `~/.config/fileshell/config.json`. Command-line
//! flags override file values; missing values fall back to defaults.

use std::path::{Path, PathBuf};

use fileshell_file_ops::PathValidator;
use fileshell_shell::ANONYMOUS;
use fileshell_transfer::DEFAULT_CHUNK_SIZE;
use serde::Deserialize;

use crate::cli::Cli;

/// On-disk config format.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    username: String,
    #[serde(default)]
    start_directory: String,
    #[serde(default)]
    chunk_size: usize,
    #[serde(default)]
    prompt: Option<String>,
}

/// Effective shell configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub username: String,
    /// Raw start directory; `~` and relative paths are resolved at startup.
    pub start_directory: Option<String>,
    pub chunk_size: usize,
    pub prompt: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            username: ANONYMOUS.into(),
            start_directory: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            prompt: "> ".into(),
        }
    }
}

impl ShellConfig {
    /// Loads configuration from the default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_file_path()?)
    }

    /// Loads configuration from `path`. A missing or unparsable file
    /// yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut config = ShellConfig::default();
        if !path.exists() {
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let Ok(file) = serde_json::from_str::<ConfigFile>(&content) else {
            tracing::warn!(path = %path.display(), "failed to parse config, using defaults");
            return Ok(config);
        };

        if !file.username.trim().is_empty() {
            config.username = file.username;
        }
        if !file.start_directory.is_empty() {
            config.start_directory = Some(file.start_directory);
        }
        if file.chunk_size > 0 {
            config.chunk_size = file.chunk_size;
        }
        if let Some(prompt) = file.prompt {
            config.prompt = prompt;
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(username) = cli.username.as_deref().filter(|u| !u.trim().is_empty()) {
            self.username = username.to_string();
        }
        if let Some(dir) = &cli.start_dir {
            self.start_directory = Some(dir.clone());
        }
    }

    /// Picks the directory the session starts in: the configured start
    /// directory, else home, else the process working directory.
    pub fn resolve_start_dir(&self) -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let resolver = PathValidator::new(&cwd);

        if let Some(raw) = &self.start_directory {
            let dir = resolver.resolve(raw);
            if dir.is_dir() {
                return dir;
            }
            tracing::warn!(path = %dir.display(), "start directory unavailable, using home");
        }

        let home = resolver.resolve("~");
        if home.is_dir() { home } else { cwd }
    }
}

fn config_file_path() -> anyhow::Result<PathBuf> {
    let config_dir = config_base_dir()?;
    Ok(config_dir.join("fileshell").join("config.json"))
}

fn config_base_dir() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home).join(".config"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp"))
    }
}
