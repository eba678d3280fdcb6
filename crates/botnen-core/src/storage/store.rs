//! The countdown list and its persisted mirror.
//!
//! Records are addressed by position. Positions are only stable until the
//! next removal; deleting index 2 shifts what index 3 refers to.

use chrono::NaiveDateTime;

use super::persistence::{JsonFile, Persistence};
use crate::countdown::Countdown;
use crate::error::{CoreError, Result};

/// Ordered countdown list, written back in full after every mutation.
#[derive(Debug)]
pub struct CountdownStore<P: Persistence = JsonFile> {
    persistence: P,
    countdowns: Vec<Countdown>,
}

impl<P: Persistence> CountdownStore<P> {
    /// Load the list from `persistence`, or start empty if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CorruptStore`] if stored data exists but cannot
    /// be parsed, or an IO error if it cannot be read.
    pub fn load(persistence: P) -> Result<Self> {
        let countdowns = persistence.read()?.unwrap_or_default();
        Ok(Self {
            persistence,
            countdowns,
        })
    }

    /// Overwrite the stored list with the in-memory one.
    pub fn save(&mut self) -> Result<()> {
        self.persistence.write(&self.countdowns)
    }

    /// Write `next` and only then make it the in-memory list, so a failed
    /// write leaves memory matching what was last stored.
    fn commit(&mut self, next: Vec<Countdown>) -> Result<()> {
        self.persistence.write(&next)?;
        self.countdowns = next;
        Ok(())
    }

    /// Parse `date_text` and append a new countdown.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDateFormat`] or a persistence error; either
    /// leaves the list untouched.
    pub fn add(&mut self, name: &str, date_text: &str) -> Result<&Countdown> {
        let countdown = Countdown::parse(name, date_text)?;
        let mut next = self.countdowns.clone();
        next.push(countdown);
        self.commit(next)?;

        let index = self.countdowns.len() - 1;
        tracing::info!(index, name, "countdown added");
        Ok(&self.countdowns[index])
    }

    /// Replace the countdown at `index`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDateFormat`], [`CoreError::IndexOutOfRange`] or a
    /// persistence error; each leaves the list untouched.
    pub fn update_at(&mut self, index: usize, name: &str, date_text: &str) -> Result<&Countdown> {
        let countdown = Countdown::parse(name, date_text)?;
        let len = self.countdowns.len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        let mut next = self.countdowns.clone();
        next[index] = countdown;
        self.commit(next)?;

        tracing::info!(index, name, "countdown updated");
        Ok(&self.countdowns[index])
    }

    /// Remove the selected countdown. No selection is a silent no-op.
    ///
    /// # Errors
    ///
    /// [`CoreError::IndexOutOfRange`] if the selection no longer exists, or a
    /// persistence error; either leaves the list untouched.
    pub fn delete_at(&mut self, selection: Option<usize>) -> Result<Option<Countdown>> {
        let Some(index) = selection else {
            return Ok(None);
        };
        let len = self.countdowns.len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        let mut next = self.countdowns.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        tracing::info!(index, name = %removed.name, "countdown deleted");
        Ok(Some(removed))
    }

    /// Remove every countdown whose target is at or before `now`.
    ///
    /// Removes from the highest index down and saves once if anything went.
    /// Returns the evicted records in their original order. If the save
    /// fails nothing is evicted.
    pub fn evict_expired(&mut self, now: NaiveDateTime) -> Result<Vec<Countdown>> {
        let expired: Vec<usize> = self
            .countdowns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_expired(now))
            .map(|(i, _)| i)
            .collect();

        if expired.is_empty() {
            return Ok(Vec::new());
        }

        let mut next = self.countdowns.clone();
        let mut removed: Vec<Countdown> = expired.iter().rev().map(|&i| next.remove(i)).collect();
        removed.reverse();
        self.commit(next)?;

        tracing::info!(count = removed.len(), "expired countdowns evicted");
        Ok(removed)
    }

    pub fn list(&self) -> &[Countdown] {
        &self.countdowns
    }

    pub fn get(&self, index: usize) -> Option<&Countdown> {
        self.countdowns.get(index)
    }

    pub fn len(&self) -> usize {
        self.countdowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countdowns.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }
}
