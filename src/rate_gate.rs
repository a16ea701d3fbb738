use std::time::{Duration, SystemTime};

/// Accepts at most one call per `min_interval`.
///
/// Timestamps are nanoseconds on any monotonic-enough clock; the gate never
/// reads a clock itself.
#[derive(Debug, Clone)]
pub struct RateGate {
    min_interval_ns: i64,
    last_accepted_ns: i64,
}

impl RateGate {
    pub fn new(min_interval: Duration, start_ns: i64) -> RateGate {
        RateGate {
            min_interval_ns: i64::try_from(min_interval.as_nanos()).unwrap_or(i64::MAX),
            last_accepted_ns: start_ns,
        }
    }

    /// A rate whose interval does not fit a `Duration` closes the gate for good.
    pub fn from_rate_hz(rate_hz: f64, start_ns: i64) -> RateGate {
        let interval = Duration::try_from_secs_f64(1.0 / rate_hz).unwrap_or(Duration::MAX);
        Self::new(interval, start_ns)
    }

    pub fn should_process(&mut self, now_ns: i64) -> bool {
        // a clock stepping backwards gives a negative delta and is rejected
        if now_ns.saturating_sub(self.last_accepted_ns) < self.min_interval_ns {
            return false;
        }
        self.last_accepted_ns = now_ns;
        true
    }

    pub fn last_accepted_ns(&self) -> i64 {
        self.last_accepted_ns
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_nanos(self.min_interval_ns as u64)
    }
}

/// Wall clock in nanoseconds since the unix epoch.
pub fn system_time_ns() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inside_window() {
        let mut gate = RateGate::from_rate_hz(20.0, 0);
        assert!(!gate.should_process(30_000_000));
        assert_eq!(gate.last_accepted_ns(), 0);
        assert!(gate.should_process(60_000_000));
        assert_eq!(gate.last_accepted_ns(), 60_000_000);
    }

    #[test]
    fn boundary_is_accepted() {
        let mut gate = RateGate::new(Duration::from_millis(50), 0);
        assert!(gate.should_process(50_000_000));
    }

    #[test]
    fn backwards_clock_is_rejected() {
        let mut gate = RateGate::new(Duration::from_millis(50), 1_000_000_000);
        assert!(!gate.should_process(0));
        assert_eq!(gate.last_accepted_ns(), 1_000_000_000);
    }
}
