//! Trailing-edge debouncer.
//!
//! Each push replaces the pending value and restarts the delay. The value
//! is released either when a caller polls past the deadline, or when the
//! timer belonging to the latest push fires (ticket match).

use std::time::Duration;

use web_time::Instant;

/// Identifies one push; only the latest ticket can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
    latest: u64,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
            latest: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value; the deadline becomes `now + delay`.
    pub fn push(&mut self, value: T, now: Instant) -> Ticket {
        self.latest += 1;
        self.pending = Some((value, now + self.delay));
        Ticket(self.latest)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, d)| *d)
    }

    /// Release the pending value if its deadline has passed.
    pub fn ready(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Release the pending value if `ticket` is from the latest push.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.latest {
            self.pending.take().map(|(v, _)| v)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_value_released_after_delay() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(150));
        d.push("p", start);
        d.push("pe", start + Duration::from_millis(100));
        assert_eq!(d.ready(start + Duration::from_millis(200)), None);
        assert_eq!(d.ready(start + Duration::from_millis(250)), Some("pe"));
        assert_eq!(d.ready(start + Duration::from_millis(400)), None);
    }

    #[test]
    fn test_stale_ticket_does_not_fire() {
        let now = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(150));
        let first = d.push(1, now);
        let second = d.push(2, now);
        assert_eq!(d.fire(first), None);
        assert_eq!(d.fire(second), Some(2));
        assert_eq!(d.fire(second), None);
    }

    #[test]
    fn test_cancel() {
        let now = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.push((), now);
        d.cancel();
        assert!(d.deadline().is_none());
        assert_eq!(d.ready(now + Duration::from_secs(1)), None);
    }
}
