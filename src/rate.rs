// src/rate.rs
use std::collections::VecDeque;

/// How tight a burst has to be before it counts as a traffic spike, in
/// seconds. `threshold` events spanning strictly less than this fire an alert.
const DENSITY_WINDOW_SECS: f64 = 1.0;

/// Sliding-window burst detector.
///
/// Keeps the timestamps of the most recent events and raises an alert when
/// `threshold` of them landed within one second. A cooldown debounces the
/// output, so a sustained flood produces periodic alerts instead of one per
/// packet. Timestamps are monotonic seconds supplied by the caller, which
/// keeps the detector fully deterministic under test.
#[derive(Debug)]
pub struct RateMonitor {
    window: VecDeque<f64>,
    capacity: usize,
    threshold: usize,
    cooldown_secs: f64,
    last_alert: Option<f64>,
}

impl RateMonitor {
    pub fn new(capacity: usize, threshold: usize, cooldown_secs: f64) -> Self {
        RateMonitor {
            window: VecDeque::with_capacity(capacity),
            capacity,
            threshold,
            cooldown_secs,
            last_alert: None,
        }
    }

    /// Records one event at `now` and reports whether an alert fired.
    ///
    /// Callers must feed non-decreasing timestamps; the window relies on
    /// insertion order matching time order.
    pub fn observe(&mut self, now: f64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(now);

        // A zero threshold disables density detection entirely; without this
        // the slice index below would reach past the end of the window.
        if self.threshold == 0 || self.window.len() < self.threshold {
            return false;
        }

        // The window is sorted ascending, so the oldest of the most recent
        // `threshold` entries sits `threshold` slots from the back.
        let oldest_recent = self.window[self.window.len() - self.threshold];
        if now - oldest_recent >= DENSITY_WINDOW_SECS {
            return false;
        }

        let debounced = match self.last_alert {
            Some(last) => now - last > self.cooldown_secs,
            None => true,
        };
        if debounced {
            self.last_alert = Some(now);
        }
        debounced
    }

    pub fn clear(&mut self) {
        self.window.clear();
        self.last_alert = None;
    }
}
