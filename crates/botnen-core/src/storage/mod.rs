mod config;
pub mod persistence;
pub mod store;

pub use config::{Config, LogConfig, RefreshConfig, StoreConfig};
pub use persistence::{JsonFile, MemoryPersistence, Persistence};
pub use store::CountdownStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// File name of the countdown list inside the data directory.
pub const DATA_FILE: &str = "countdowns.json";

/// Returns the data directory, creating it if needed.
///
/// `BOTNEN_HOME` replaces the directory outright. Otherwise this is
/// `~/.config/botnen[-dev]/`, with `BOTNEN_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("BOTNEN_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("BOTNEN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("botnen-dev")
            } else {
                base_dir.join("botnen")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
