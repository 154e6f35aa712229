use crate::config::StorageConfig;
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

const DRAWINGS_FILE_STEM: &str = "drawings";

/// Runtime options for the drawing store, derived from `[storage]`.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub base_dir: PathBuf,
    /// Maximum number of kept records (0 keeps everything).
    pub max_records: usize,
}

impl StoreOptions {
    /// Creates options rooted at `base_dir` with the default record limit.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            max_records: 100,
        }
    }

    pub fn drawings_file_path(&self) -> PathBuf {
        self.base_dir.join(format!("{DRAWINGS_FILE_STEM}.json"))
    }

    pub fn lock_file_path(&self) -> PathBuf {
        self.base_dir.join(format!("{DRAWINGS_FILE_STEM}.lock"))
    }
}

/// Build store options from configuration values.
///
/// Without an explicit directory the store lives in `$XDG_DATA_HOME/inkboard`
/// (falling back to `config_dir` when no data directory is known).
pub fn options_from_config(storage: &StorageConfig, config_dir: &Path) -> Result<StoreOptions> {
    let base_dir = match storage.directory.as_ref() {
        Some(dir) => {
            let expanded = expand_tilde(dir);
            if expanded.as_os_str().is_empty() {
                return Err(anyhow!("storage.directory resolved to an empty path"));
            }
            expanded
        }
        None => dirs::data_dir()
            .unwrap_or_else(|| config_dir.to_path_buf())
            .join("inkboard"),
    };

    let mut options = StoreOptions::new(base_dir);
    options.max_records = storage.max_records;
    Ok(options)
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
