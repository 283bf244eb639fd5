//! Time subsystem.
//!
//! One `EventClock` per window: it provides the "seconds since start" time
//! base and stamps every dispatched input event with its per-kind interval.

mod event_clock;

pub use event_clock::{EventClock, EventTime};
