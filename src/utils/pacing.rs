//! Randomized pauses between requests.
//!
//! The site throttles accounts that fire mutations back to back, so every
//! per-user request is followed by a pause drawn uniformly from
//! `[min_sleep, max_sleep]`.

use crate::config::settings::PacingSettings;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    /// Bounds in seconds; negative or non-finite values count as zero
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        let min = to_duration(min_secs);
        let max = to_duration(max_secs);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_settings(settings: &PacingSettings) -> Self {
        Self::new(settings.min_sleep, settings.max_sleep)
    }

    /// No pauses at all
    pub fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Next pause length
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let secs = rand::thread_rng().gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Sleep for a random delay
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Sleep for the lower bound
    pub async fn pause_min(&self) {
        if !self.min.is_zero() {
            tokio::time::sleep(self.min).await;
        }
    }
}

fn to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}
