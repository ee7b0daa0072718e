//! Injected sources of randomness and time.
//!
//! # Responsibility
//! - Decouple placement jitter and timestamps from global state.
//! - Offer deterministic implementations for tests and replays.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)`.
pub trait Jitter {
    fn next_unit(&mut self) -> f64;
}

/// `StdRng`-backed jitter.
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Jitter for RandomJitter {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always yields the same sample, clamped into `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn next_unit(&mut self) -> f64 {
        if self.0.is_nan() {
            return 0.0;
        }
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Source of "now" for creation and completion timestamps.
pub trait Clock {
    fn now(&mut self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that starts at a fixed instant and advances by `step` per reading.
#[derive(Debug, Clone)]
pub struct ManualClock {
    next: DateTime<Utc>,
    step: Duration,
}

impl ManualClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: start,
            step: Duration::seconds(1),
        }
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> DateTime<Utc> {
        let current = self.next;
        self.next = current + self.step;
        current
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedJitter, Jitter, ManualClock, RandomJitter};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn random_jitter_stays_in_unit_interval() {
        let mut jitter = RandomJitter::from_entropy();
        for _ in 0..1_000 {
            let sample = jitter.next_unit();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn fixed_jitter_clamps_out_of_range_values() {
        assert!(FixedJitter(1.0).next_unit() < 1.0);
        assert_eq!(FixedJitter(-2.0).next_unit(), 0.0);
        assert_eq!(FixedJitter(f64::NAN).next_unit(), 0.0);
    }

    #[test]
    fn manual_clock_advances_per_reading() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut clock = ManualClock::starting_at(start).with_step(Duration::minutes(5));
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + Duration::minutes(5));
    }
}
