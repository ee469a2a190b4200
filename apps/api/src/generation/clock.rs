//! Time seams for the generator: the letter's date stamp and the simulated latency.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

/// Source of the date printed at the top of each letter.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date. Used to make letter text reproducible.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Long-form US date, e.g. `January 5, 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Suspension applied before composing a letter.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self);
}

/// Sleeps on the tokio timer for a fixed duration.
pub struct TokioDelay(pub Duration);

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Returns immediately.
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}
