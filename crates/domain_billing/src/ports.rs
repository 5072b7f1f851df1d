//! Billing Domain Ports
//!
//! The [`BillStore`] trait is the billing domain's view of persistence. The
//! status-changing operations carry the concurrency contract of the system:
//! implementations must check the current status and write the new one as a
//! single conditional update at the storage layer, so a payment request and
//! a sweep tick racing on the same bill cannot both apply.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{BillId, ClientId, StoreError};

use crate::bill::{Bill, PaymentStatus};
use crate::error::BillingError;

#[async_trait]
pub trait BillStore: Send + Sync {
    async fn insert(&self, bill: &Bill) -> Result<(), StoreError>;

    async fn find(&self, id: BillId) -> Result<Option<Bill>, StoreError>;

    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Bill>, StoreError>;

    async fn list_by_client(&self, client: ClientId) -> Result<Vec<Bill>, StoreError>;

    /// Bills whose due date has passed and which are not yet paid
    async fn list_past_due(&self, now: DateTime<Utc>) -> Result<Vec<Bill>, StoreError>;

    /// Replaces stored bill details. Must not change `payment_status` or
    /// `payment_date`; callers only reach this through [`crate::bill::BillUpdate`].
    async fn update(&self, bill: &Bill) -> Result<(), StoreError>;

    async fn delete(&self, id: BillId) -> Result<bool, StoreError>;

    /// Conditionally transitions a bill to paid.
    ///
    /// The update must match `payment_status IN (pending, overdue)` at write
    /// time. A zero-row match is disambiguated by the implementation:
    /// missing bill → [`BillingError::NotFound`], bill already paid →
    /// [`BillingError::InvalidTransition`].
    async fn record_payment(
        &self,
        id: BillId,
        paid_at: DateTime<Utc>,
    ) -> Result<Bill, BillingError>;

    /// Conditionally transitions a single bill from pending to overdue,
    /// with the same zero-row disambiguation as [`Self::record_payment`]
    async fn mark_overdue(&self, id: BillId) -> Result<Bill, BillingError>;

    /// Bulk sweep update: every bill with `due_date < now` still pending
    /// becomes overdue in one conditional update. Returns how many bills
    /// changed; running it again without time or payment activity in
    /// between returns zero.
    async fn mark_overdue_due_before(&self, now: DateTime<Utc>) -> Result<u64, BillingError>;
}
