//! Overdue reconciliation sweep
//!
//! A process-wide periodic task, started once at boot and independent of
//! request handling. Each tick asks the store for one conditional bulk
//! update: every pending bill whose due date has passed becomes overdue.
//! The sweep talks to the rest of the system only through the shared store.
//!
//! A failed tick is logged and retried on the next tick; the task never
//! panics and never partially applies (the bulk update is one statement at
//! the storage layer).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::error::SweepError;
use crate::ports::BillStore;

/// Periodic task that forces time-based payment-status transitions
pub struct OverdueSweep {
    bills: Arc<dyn BillStore>,
    period: Duration,
}

impl OverdueSweep {
    /// Sweep period used in production
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(bills: Arc<dyn BillStore>, period: Duration) -> Self {
        Self { bills, period }
    }

    pub fn with_default_period(bills: Arc<dyn BillStore>) -> Self {
        Self::new(bills, Self::DEFAULT_PERIOD)
    }

    /// One sweep iteration. Returns how many bills were moved to overdue.
    ///
    /// Idempotent: a second run with no intervening time change or payment
    /// activity matches nothing and returns zero.
    pub async fn run_once(&self) -> Result<u64, SweepError> {
        let transitioned = self.bills.mark_overdue_due_before(Utc::now()).await?;
        Ok(transitioned)
    }

    /// Runs the sweep forever on its fixed period.
    ///
    /// The first tick fires immediately at startup, which doubles as a
    /// catch-up pass after downtime. Intended to be driven inside
    /// `tokio::spawn`; stopping is by aborting the task at shutdown.
    pub async fn run(self) {
        info!(period_secs = self.period.as_secs(), "overdue sweep started");
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(0) => debug!("overdue sweep: nothing past due"),
                Ok(transitioned) => {
                    info!(transitioned, "overdue sweep moved bills to overdue")
                }
                Err(e) => error!(error = %e, "overdue sweep iteration failed, retrying next tick"),
            }
        }
    }
}
