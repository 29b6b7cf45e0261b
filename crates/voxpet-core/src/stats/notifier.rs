//! Throttle for outward stats snapshots
//!
//! Periodic snapshots flow while the creature is alive; actions request an
//! extra one. Either way, no two snapshots are closer than the interval.

#[derive(Debug, Clone)]
pub struct StatsNotifier {
    interval_ms: f64,
    last_emit_ms: Option<f64>,
    pending: bool,
}

impl StatsNotifier {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_emit_ms: None,
            pending: false,
        }
    }

    /// Ask for a snapshot at the next allowed slot
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether a snapshot should go out now; `periodic` enables the regular
    /// cadence on top of explicit requests
    pub fn poll(&mut self, now_ms: f64, periodic: bool) -> bool {
        if !periodic && !self.pending {
            return false;
        }
        let due = match self.last_emit_ms {
            Some(last) => now_ms - last > self.interval_ms,
            None => true,
        };
        if due {
            self.last_emit_ms = Some(now_ms);
            self.pending = false;
        }
        due
    }
}

impl Default for StatsNotifier {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_rate_is_capped() {
        let mut notifier = StatsNotifier::default();
        let emitted = (0..600)
            .filter(|frame| notifier.poll(*frame as f64 * (1000.0 / 60.0), true))
            .count();
        // 10 seconds at 60 fps: at most 10 per second
        assert!(emitted <= 100);
        assert!(emitted >= 80);
    }

    #[test]
    fn test_request_waits_for_slot() {
        let mut notifier = StatsNotifier::default();
        assert!(notifier.poll(0.0, true));

        notifier.request();
        assert!(!notifier.poll(50.0, false));
        assert!(notifier.is_pending());
        assert!(notifier.poll(101.0, false));
        assert!(!notifier.is_pending());
    }

    #[test]
    fn test_idle_without_requests() {
        let mut notifier = StatsNotifier::default();
        assert!(!notifier.poll(1000.0, false));
    }
}
