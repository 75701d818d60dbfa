//! Keeps continuous controllers from flooding the wire.

use embassy_time::{Duration, Instant};

/// Returns `true` if `candidate` differs from `previous` by more than `threshold`.
pub fn should_send(previous: u16, candidate: u16, threshold: u16) -> bool {
    previous.abs_diff(candidate) > threshold
}

/// Returns `true` if less than (or exactly) `min_interval` has passed since `last_send`.
pub fn rate_limited(last_send: Instant, now: Instant, min_interval: Duration) -> bool {
    now <= last_send + min_interval
}

/// Remembers the last value sent for one signal and lets a new one through only if it moved far enough.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChangeGate {
    last_sent: u16,
    threshold: u16,
}

impl ChangeGate {
    /// Constructs a [`ChangeGate`] which assumes `initial` has already been sent.
    pub const fn new(initial: u16, threshold: u16) -> Self {
        Self {
            last_sent: initial,
            threshold,
        }
    }

    /// Returns `candidate` if it should be sent, recording it as the last value sent.
    pub fn offer(&mut self, candidate: u16) -> Option<u16> {
        if should_send(self.last_sent, candidate, self.threshold) {
            self.last_sent = candidate;
            Some(candidate)
        } else {
            None
        }
    }

    /// Getter.
    pub fn last_sent(&self) -> u16 {
        self.last_sent
    }
}

/// Opens at most once per interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimit {
    interval: Duration,
    last_open: Instant,
}

impl RateLimit {
    /// Constructs a [`RateLimit`] that was last open at the origin of the clock.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_open: Instant::from_ticks(0),
        }
    }

    /// Returns `true`, and starts a new interval, if the previous interval has elapsed by `now`.
    pub fn try_open(&mut self, now: Instant) -> bool {
        if rate_limited(self.last_open, now, self.interval) {
            false
        } else {
            self.last_open = now;
            true
        }
    }
}
