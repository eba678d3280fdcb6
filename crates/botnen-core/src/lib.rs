//! # Botnen Core Library
//!
//! This library provides the core logic for Botnen, a small keeper of named
//! countdowns. Front ends (the `botnen` CLI, or a GUI) are thin layers that
//! call into the same store and refresh loop.
//!
//! ## Architecture
//!
//! - **Countdown Store**: an ordered, position-addressed list of countdowns,
//!   rewritten in full to a JSON file after every mutation
//! - **Refresh Loop**: a once-per-second pass that evicts expired countdowns
//!   and renders the remaining time of the rest
//! - **Entry Form**: the Add/Update mode switching a front end drives
//!
//! ## Key Components
//!
//! - [`CountdownStore`]: list ownership and persistence
//! - [`RefreshLoop`]: periodic refresh driver
//! - [`EntryForm`]: add/edit/delete actions
//! - [`Config`]: application configuration management

pub mod countdown;
pub mod error;
pub mod events;
pub mod form;
pub mod refresh;
pub mod storage;

pub use countdown::{format_remaining, parse_target, Countdown, DATE_FORMAT};
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use form::{EntryForm, FormMode};
pub use refresh::{refresh, refresh_at, Ongoing, RefreshLoop, RefreshReport};
pub use storage::{Config, CountdownStore, JsonFile, MemoryPersistence, Persistence};
