//! Bill DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClientId, ShipmentId};
use domain_billing::{Bill, BillUpdate, NewBill, PaymentMethod, PaymentStatus};

use super::non_negative;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBillRequest {
    pub client_id: i64,
    pub shipment_id: i64,
    pub due_date: DateTime<Utc>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub tax_amount: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub total_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub gstin: Option<String>,
    pub special_instructions: Option<String>,
    pub fuel_cost: Option<Decimal>,
}

impl CreateBillRequest {
    pub fn into_new_bill(self) -> NewBill {
        NewBill {
            client_id: ClientId::new(self.client_id),
            shipment_id: ShipmentId::new(self.shipment_id),
            due_date: self.due_date,
            amount: self.amount,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            payment_method: self.payment_method,
            gstin: self.gstin,
            special_instructions: self.special_instructions,
            fuel_cost: self.fuel_cost,
        }
    }
}

/// Detail update; payment status has its own endpoint and is rejected here
/// by omission
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBillRequest {
    pub due_date: Option<DateTime<Utc>>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub tax_amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub total_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub gstin: Option<String>,
    pub special_instructions: Option<String>,
    pub fuel_cost: Option<Decimal>,
}

impl UpdateBillRequest {
    pub fn into_update(self) -> BillUpdate {
        BillUpdate {
            due_date: self.due_date,
            amount: self.amount,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            payment_method: self.payment_method,
            gstin: self.gstin,
            special_instructions: self.special_instructions,
            fuel_cost: self.fuel_cost,
        }
    }
}

/// Explicit status-change request; only legal state-machine transitions
/// are accepted
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
    /// Effective payment time when moving to `paid`; defaults to now
    pub payment_date: Option<DateTime<Utc>>,
}

/// Body for the payment-recording endpoint; the whole body is optional
#[derive(Debug, Default, Deserialize)]
pub struct PayBillRequest {
    pub payment_date: Option<DateTime<Utc>>,
}

/// Outstanding balance summary for a client
#[derive(Debug, Serialize)]
pub struct OutstandingResponse {
    pub client_id: i64,
    pub total_outstanding: Decimal,
    pub bills: Vec<Bill>,
}
