//! Entry form state behind the Add/Update/Edit/Delete actions.
//!
//! The form holds the raw name and date text a front end collects, plus
//! whether submitting appends a new countdown or replaces an existing one.
//! Edit switches the form into update mode for the selected index; a
//! successful update switches it back.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::Event;
use crate::storage::{CountdownStore, Persistence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "index")]
pub enum FormMode {
    #[default]
    Add,
    Update(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub name: String,
    pub date: String,
    mode: FormMode,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add-mode form pre-filled with `name` and `date`.
    pub fn with_input(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            mode: FormMode::Add,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Load the selected countdown into the form and switch to update mode.
    ///
    /// Returns `false` without touching the form when nothing is selected
    /// or the selection does not exist.
    pub fn begin_edit<P: Persistence>(
        &mut self,
        store: &CountdownStore<P>,
        selection: Option<usize>,
    ) -> bool {
        let Some((index, countdown)) = selection.and_then(|i| store.get(i).map(|c| (i, c))) else {
            return false;
        };
        self.name = countdown.name.clone();
        self.date = countdown.date_text();
        self.mode = FormMode::Update(index);
        tracing::debug!(index, "editing countdown");
        true
    }

    /// Apply the form to the store.
    ///
    /// # Errors
    ///
    /// Propagates the store's validation errors. On error the form, its mode
    /// and the store are all left as they were.
    pub fn submit<P: Persistence>(&mut self, store: &mut CountdownStore<P>) -> Result<Event> {
        match self.mode {
            FormMode::Add => {
                let countdown = store.add(&self.name, &self.date)?.clone();
                Ok(Event::CountdownAdded {
                    index: store.len() - 1,
                    countdown,
                })
            }
            FormMode::Update(index) => {
                let countdown = store.update_at(index, &self.name, &self.date)?.clone();
                self.mode = FormMode::Add;
                Ok(Event::CountdownUpdated { index, countdown })
            }
        }
    }

    /// Delete the selected countdown. `Ok(None)` when nothing is selected.
    ///
    /// An edit in progress is cancelled if its index is deleted or shifted.
    pub fn delete_selected<P: Persistence>(
        &mut self,
        store: &mut CountdownStore<P>,
        selection: Option<usize>,
    ) -> Result<Option<Event>> {
        let Some(index) = selection else {
            return Ok(None);
        };
        let Some(countdown) = store.delete_at(Some(index))? else {
            return Ok(None);
        };
        if let FormMode::Update(editing) = self.mode {
            if editing >= index {
                self.mode = FormMode::Add;
            }
        }
        Ok(Some(Event::CountdownDeleted { index, countdown }))
    }
}
