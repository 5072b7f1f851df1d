//! Billing application service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{BillId, ClientId, SequenceAllocator};

use crate::bill::{Bill, BillUpdate, NewBill, PaymentStatus};
use crate::error::BillingError;
use crate::ports::BillStore;

/// Outstanding balance summary for a client
#[derive(Debug, Clone)]
pub struct ClientOutstanding {
    pub client_id: ClientId,
    pub total_outstanding: Decimal,
    pub bills: Vec<Bill>,
}

/// Application service for bills and payment recording
#[derive(Clone)]
pub struct BillingService {
    allocator: SequenceAllocator,
    bills: Arc<dyn BillStore>,
}

impl BillingService {
    pub fn new(allocator: SequenceAllocator, bills: Arc<dyn BillStore>) -> Self {
        Self { allocator, bills }
    }

    /// Creates a bill: allocate the id, then persist. A persistence failure
    /// after allocation leaves a gap in the bill counter, by contract.
    pub async fn create_bill(&self, new: NewBill) -> Result<Bill, BillingError> {
        let id: BillId = self.allocator.next().await?;
        let bill = Bill::new(id, new);
        self.bills.insert(&bill).await?;
        info!(bill_id = %id, client_id = %bill.client_id, "bill created");
        Ok(bill)
    }

    pub async fn get_bill(&self, id: BillId) -> Result<Bill, BillingError> {
        self.bills
            .find(id)
            .await?
            .ok_or(BillingError::NotFound(id))
    }

    pub async fn list_bills(&self) -> Result<Vec<Bill>, BillingError> {
        Ok(self.bills.list().await?)
    }

    pub async fn list_by_status(
        &self,
        status: PaymentStatus,
    ) -> Result<Vec<Bill>, BillingError> {
        Ok(self.bills.list_by_status(status).await?)
    }

    pub async fn list_by_client(&self, client: ClientId) -> Result<Vec<Bill>, BillingError> {
        Ok(self.bills.list_by_client(client).await?)
    }

    /// Unpaid bills whose due date has already passed
    pub async fn list_past_due(&self) -> Result<Vec<Bill>, BillingError> {
        Ok(self.bills.list_past_due(Utc::now()).await?)
    }

    /// Updates bill details; payment status is untouchable here
    pub async fn update_bill(
        &self,
        id: BillId,
        update: BillUpdate,
    ) -> Result<Bill, BillingError> {
        let mut bill = self.get_bill(id).await?;
        bill.apply(update);
        self.bills.update(&bill).await?;
        Ok(bill)
    }

    pub async fn delete_bill(&self, id: BillId) -> Result<(), BillingError> {
        if self.bills.delete(id).await? {
            debug!(bill_id = %id, "bill deleted");
            Ok(())
        } else {
            Err(BillingError::NotFound(id))
        }
    }

    /// Records a payment against a bill (pending|overdue → paid).
    ///
    /// `paid_at` defaults to now. The store applies this as a conditional
    /// update, so a concurrent sweep tick cannot interleave.
    pub async fn record_payment(
        &self,
        id: BillId,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Bill, BillingError> {
        let paid_at = paid_at.unwrap_or_else(Utc::now);
        let bill = self.bills.record_payment(id, paid_at).await?;
        info!(bill_id = %id, payment_date = %paid_at, "payment recorded");
        Ok(bill)
    }

    /// Explicit status-change request.
    ///
    /// Any request that is not a legal transition is rejected; in
    /// particular nothing ever moves out of `paid`, and nothing moves back
    /// to `pending`.
    pub async fn set_payment_status(
        &self,
        id: BillId,
        to: PaymentStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Bill, BillingError> {
        match to {
            PaymentStatus::Paid => self.record_payment(id, paid_at).await,
            PaymentStatus::Overdue => self.bills.mark_overdue(id).await,
            PaymentStatus::Pending => {
                let bill = self.get_bill(id).await?;
                Err(BillingError::InvalidTransition {
                    from: bill.payment_status,
                    to,
                })
            }
        }
    }

    /// Total of a client's pending bills, with the bills themselves
    pub async fn outstanding_by_client(
        &self,
        client: ClientId,
    ) -> Result<ClientOutstanding, BillingError> {
        let bills: Vec<Bill> = self
            .bills
            .list_by_client(client)
            .await?
            .into_iter()
            .filter(|b| b.payment_status == PaymentStatus::Pending)
            .collect();
        let total_outstanding = bills.iter().map(|b| b.total_amount).sum();
        Ok(ClientOutstanding {
            client_id: client,
            total_outstanding,
            bills,
        })
    }
}
