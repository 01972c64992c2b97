use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;

/// Application configuration.
///
/// Every field has a default, so an absent config file is not an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Rows per page in the user list
  pub page_size: usize,
  /// Quiet period after a filter keystroke, in milliseconds
  pub debounce_ms: u64,
  /// Override for the persistent store location
  pub data_dir: Option<PathBuf>,
  /// Size of the demo dataset backing the in-memory backend
  pub demo_users: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      page_size: 10,
      debounce_ms: 500,
      data_dir: None,
      demo_users: 500,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./lendadmin.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/lendadmin/config.yaml
  ///
  /// No file found means defaults, not an error; an explicit path that
  /// does not exist is still rejected.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("lendadmin.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("lendadmin").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Debounce window as a `Duration`.
  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }

  /// Path of the persistent store, honouring the `data_dir` override.
  pub fn store_path(&self) -> Option<PathBuf> {
    self.data_dir.as_ref().map(|dir| dir.join("store.db"))
  }
}
