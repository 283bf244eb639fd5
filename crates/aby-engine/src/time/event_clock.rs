use std::time::Instant;

use crate::input::EventKind;

/// Timing attached to a dispatched event.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EventTime {
    /// Seconds since the clock was started.
    pub timestamp: f64,

    /// Seconds since the previous event of the same kind. For the first event
    /// of a kind this equals `timestamp`.
    pub interval: f64,
}

/// Monotonic clock started with the runtime.
///
/// Keeps the last timestamp per [`EventKind`] so that listeners can see how
/// long ago the same kind of event last fired.
#[derive(Debug, Clone)]
pub struct EventClock {
    start: Instant,
    last: [Option<f64>; EventKind::COUNT],
}

impl EventClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last: [None; EventKind::COUNT],
        }
    }

    /// Seconds elapsed since the clock was started.
    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stamps an event of `kind` with the current time.
    pub fn stamp(&mut self, kind: EventKind) -> EventTime {
        let now = self.now();
        self.stamp_at(kind, now)
    }

    /// Stamps an event of `kind` with an explicit timestamp.
    pub fn stamp_at(&mut self, kind: EventKind, timestamp: f64) -> EventTime {
        let slot = &mut self.last[kind.index()];
        let interval = match *slot {
            Some(previous) => timestamp - previous,
            None => timestamp,
        };
        *slot = Some(timestamp);

        EventTime { timestamp, interval }
    }

    /// Forgets the per-kind history; the start instant is kept.
    pub fn reset_intervals(&mut self) {
        self.last = [None; EventKind::COUNT];
    }
}

impl Default for EventClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_interval_is_timestamp() {
        let mut clock = EventClock::new();
        let t = clock.stamp_at(EventKind::KeyPress, 1.5);
        assert_eq!(t, EventTime { timestamp: 1.5, interval: 1.5 });
    }

    #[test]
    fn interval_is_per_kind() {
        let mut clock = EventClock::new();
        clock.stamp_at(EventKind::KeyPress, 1.0);
        clock.stamp_at(EventKind::MouseMove, 2.0);

        let key = clock.stamp_at(EventKind::KeyPress, 3.5);
        assert_eq!(key.interval, 2.5);

        let mouse = clock.stamp_at(EventKind::MouseMove, 2.25);
        assert_eq!(mouse.interval, 0.25);

        let blur = clock.stamp_at(EventKind::Blur, 4.0);
        assert_eq!(blur.interval, 4.0);
    }

    #[test]
    fn reset_forgets_history() {
        let mut clock = EventClock::new();
        clock.stamp_at(EventKind::Focus, 1.0);
        clock.reset_intervals();
        assert_eq!(clock.stamp_at(EventKind::Focus, 2.0).interval, 2.0);
    }

    #[test]
    fn now_is_monotonic() {
        let clock = EventClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
