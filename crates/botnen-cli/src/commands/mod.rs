pub mod config;
pub mod countdown;
pub mod refresh;

use std::path::PathBuf;

use botnen_core::{Config, CountdownStore, Event, JsonFile};

/// Settings shared by every subcommand.
pub struct Context {
    pub config: Config,
    /// `--file` override for the countdown file.
    pub file: Option<PathBuf>,
}

impl Context {
    pub fn store_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &self.file {
            Some(path) => Ok(path.clone()),
            None => Ok(self.config.store_path()?),
        }
    }

    pub fn open_store(&self) -> Result<CountdownStore, Box<dyn std::error::Error>> {
        let path = self.store_path()?;
        tracing::debug!(path = %path.display(), "opening countdown store");
        Ok(CountdownStore::load(JsonFile::new(path))?)
    }
}

/// Print an event as one JSON line, or as a short human-readable line.
pub fn emit(event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::CountdownAdded { index, countdown } => println!("added [{index}] {countdown}"),
        Event::CountdownUpdated { index, countdown } => println!("updated [{index}] {countdown}"),
        Event::CountdownDeleted { index, countdown } => println!("deleted [{index}] {countdown}"),
        Event::CountdownsExpired { countdowns, .. } => {
            for countdown in countdowns {
                println!("expired: {countdown}");
            }
        }
    }
    Ok(())
}
