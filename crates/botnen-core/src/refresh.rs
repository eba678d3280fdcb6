//! Periodic recompute-and-render of the countdown list.
//!
//! One refresh pass captures the wall clock, evicts every countdown whose
//! target has been reached and renders the remaining ones. [`RefreshLoop`]
//! repeats passes on a fixed interval; it owns no state of its own, the
//! store is borrowed for the lifetime of the loop.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;

use crate::countdown::{format_remaining, Countdown};
use crate::error::Result;
use crate::events::Event;
use crate::storage::{CountdownStore, Persistence};

/// Header line above the ongoing countdowns.
pub const ONGOING_HEADER: &str = "Ongoing countdowns:";

/// Summary shown when nothing is counting down.
pub const NO_ONGOING: &str = "No ongoing countdowns";

/// Default pause between passes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// A countdown still in the future at the time of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ongoing {
    pub name: String,
    pub remaining_ms: i64,
}

impl Ongoing {
    pub fn remaining(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.remaining_ms)
    }
}

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshReport {
    pub now: NaiveDateTime,
    pub ongoing: Vec<Ongoing>,
    pub expired: Vec<Countdown>,
}

impl RefreshReport {
    /// Display text: header plus `<name>: <remaining>` lines, or the
    /// no-ongoing message.
    pub fn summary(&self) -> String {
        if self.ongoing.is_empty() {
            return NO_ONGOING.to_string();
        }
        let lines: Vec<String> = self
            .ongoing
            .iter()
            .map(|o| format!("{}: {}", o.name, format_remaining(o.remaining())))
            .collect();
        format!("{ONGOING_HEADER}\n{}", lines.join("\n"))
    }

    /// Event describing the evictions of this pass, if there were any.
    pub fn expired_event(&self) -> Option<Event> {
        if self.expired.is_empty() {
            return None;
        }
        Some(Event::CountdownsExpired {
            countdowns: self.expired.clone(),
            at: self.now,
        })
    }
}

/// Run one pass against the local wall clock.
pub fn refresh<P: Persistence>(store: &mut CountdownStore<P>) -> Result<RefreshReport> {
    refresh_at(store, Local::now().naive_local())
}

/// Run one pass as if the current time were `now`.
///
/// # Errors
///
/// Only persisting the evictions can fail. The store is then left unchanged
/// and the next pass tries again.
pub fn refresh_at<P: Persistence>(
    store: &mut CountdownStore<P>,
    now: NaiveDateTime,
) -> Result<RefreshReport> {
    let expired = store.evict_expired(now)?;
    let ongoing = store
        .list()
        .iter()
        .map(|c| Ongoing {
            name: c.name.clone(),
            remaining_ms: c.remaining(now).num_milliseconds(),
        })
        .collect();

    Ok(RefreshReport {
        now,
        ongoing,
        expired,
    })
}

/// Fixed-interval driver for refresh passes.
#[derive(Debug, Clone)]
pub struct RefreshLoop {
    interval: Duration,
    max_ticks: Option<u64>,
}

impl Default for RefreshLoop {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl RefreshLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_ticks: None,
        }
    }

    /// Stop after `ticks` passes instead of running until cancelled.
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run passes until the tick limit is reached, handing each report to
    /// `on_tick`. Without a limit this never returns; drop the future
    /// (e.g. in a `select!`) to stop it.
    ///
    /// A pass that fails to persist is logged and the loop keeps going.
    /// Returns the number of passes run.
    pub async fn run<P, F>(&self, store: &mut CountdownStore<P>, mut on_tick: F) -> u64
    where
        P: Persistence,
        F: FnMut(&RefreshReport),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0u64;
        loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                return ticks;
            }
            ticker.tick().await;
            ticks += 1;

            match refresh(store) {
                Ok(report) => on_tick(&report),
                Err(e) => tracing::error!(error = %e, tick = ticks, "refresh pass failed"),
            }
        }
    }
}
