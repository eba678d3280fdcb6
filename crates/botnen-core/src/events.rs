use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::countdown::Countdown;

/// Every change to the countdown list produces an Event.
/// Front ends render them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownAdded {
        index: usize,
        countdown: Countdown,
    },
    CountdownUpdated {
        index: usize,
        countdown: Countdown,
    },
    CountdownDeleted {
        index: usize,
        countdown: Countdown,
    },
    /// Countdowns evicted by a refresh pass because their target passed.
    CountdownsExpired {
        countdowns: Vec<Countdown>,
        at: NaiveDateTime,
    },
}
