use std::time::Duration;

/// Converts elapsed host time into a count of fixed-rate ticks, carrying the remainder.
#[derive(Debug, Clone)]
pub struct Cadence {
    period: Duration,
    accumulated: Duration,
}

impl Cadence {
    /// `frequency` is in Hz. Returns `None` unless it is finite, positive and
    /// slow enough to give a period of at least one nanosecond.
    pub fn new(frequency: f64) -> Option<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return None;
        }
        let period = Duration::try_from_secs_f64(1.0 / frequency).ok()?;
        if period.is_zero() {
            return None;
        }
        Some(Cadence { period, accumulated: Duration::ZERO })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `elapsed` and returns how many whole periods are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            due += 1;
        }
        due
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulated)
    }
}
