//! Single-timer debounce for search box input.
//!
//! One `Debouncer` lives as long as the search box. Each input event
//! replaces the pending value and pushes the deadline back; the value is
//! released once, after a full quiet period with no further input. Time is
//! passed in by the caller, which keeps the behaviour deterministic.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record an input event at `now`, superseding any pending value.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Release the pending value immediately (e.g., on submit).
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, d)| *d)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(100);

    #[test]
    fn burst_releases_only_last_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        for (i, text) in ["n", "ni", "nih", "niha", "nihao"].into_iter().enumerate() {
            let now = t0 + Duration::from_millis(30 * i as u64);
            d.push(text, now);
            assert_eq!(d.poll(now), None);
        }
        let last_input = t0 + Duration::from_millis(120);
        assert_eq!(d.poll(last_input + Duration::from_millis(99)), None);
        assert_eq!(d.poll(last_input + QUIET), Some("nihao"));
        assert_eq!(d.poll(last_input + QUIET * 5), None);
    }

    #[test]
    fn separate_pauses_release_each_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push("ma", t0);
        assert_eq!(d.poll(t0 + QUIET), Some("ma"));
        d.push("mao", t0 + QUIET * 3);
        assert_eq!(d.deadline(), Some(t0 + QUIET * 4));
        assert_eq!(d.poll(t0 + QUIET * 4), Some("mao"));
    }

    #[test]
    fn flush_and_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push(1, t0);
        assert_eq!(d.flush(), Some(1));
        assert!(!d.is_pending());
        d.push(2, t0);
        d.cancel();
        assert_eq!(d.poll(t0 + QUIET), None);
        assert_eq!(d.quiet_period(), QUIET);
    }
}
