//! Backing storage for the countdown list.
//!
//! Every write is a full overwrite of the previous contents. There is no
//! temp-file rename, so a crash mid-write can leave a truncated file.

use std::path::{Path, PathBuf};

use crate::countdown::Countdown;
use crate::error::{CoreError, Result};

/// Where a [`CountdownStore`](super::CountdownStore) reads and writes its list.
pub trait Persistence {
    /// Read the stored list. `Ok(None)` means nothing has been stored yet.
    fn read(&self) -> Result<Option<Vec<Countdown>>>;

    /// Replace the stored list with `countdowns`.
    fn write(&mut self, countdowns: &[Countdown]) -> Result<()>;
}

/// JSON array on disk: `[{"name": ..., "date": ...}, ...]`.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFile {
    fn read(&self) -> Result<Option<Vec<Countdown>>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no countdown file, starting empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let countdowns: Vec<Countdown> =
            serde_json::from_str(&content).map_err(|source| CoreError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            count = countdowns.len(),
            "loaded countdowns"
        );
        Ok(Some(countdowns))
    }

    fn write(&mut self, countdowns: &[Countdown]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(countdowns)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(
            path = %self.path.display(),
            count = countdowns.len(),
            "saved countdowns"
        );
        Ok(())
    }
}

/// In-process storage. Counts writes so callers can observe persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    stored: Option<Vec<Countdown>>,
    writes: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `countdowns` already stored.
    pub fn with_contents(countdowns: Vec<Countdown>) -> Self {
        Self {
            stored: Some(countdowns),
            writes: 0,
        }
    }

    /// Number of `write` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Last written (or seeded) contents.
    pub fn stored(&self) -> Option<&[Countdown]> {
        self.stored.as_deref()
    }
}

impl Persistence for MemoryPersistence {
    fn read(&self) -> Result<Option<Vec<Countdown>>> {
        Ok(self.stored.clone())
    }

    fn write(&mut self, countdowns: &[Countdown]) -> Result<()> {
        self.stored = Some(countdowns.to_vec());
        self.writes += 1;
        Ok(())
    }
}
