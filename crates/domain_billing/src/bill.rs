//! Bill records and the payment-status state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{BillId, ClientId, ShipmentId};

use crate::error::BillingError;

/// Payment status of a bill
///
/// The only legal transitions are pending→paid, pending→overdue, and
/// overdue→paid. `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Overdue => "overdue",
        }
    }

    /// Whether the state machine permits moving from `self` to `to`
    pub fn can_transition_to(self, to: PaymentStatus) -> bool {
        matches!(
            (self, to),
            (PaymentStatus::Pending, PaymentStatus::Paid)
                | (PaymentStatus::Pending, PaymentStatus::Overdue)
                | (PaymentStatus::Overdue, PaymentStatus::Paid)
        )
    }

    /// No transition leaves a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "overdue" => Ok(PaymentStatus::Overdue),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// How a bill is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "card")]
    Card,
    #[serde(rename = "bank transfer")]
    BankTransfer,
    #[serde(rename = "cash")]
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank transfer",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "bank transfer" => Ok(PaymentMethod::BankTransfer),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// A bill issued to a client for a shipment
///
/// Invariant: `payment_date` is `Some` if and only if `payment_status` is
/// [`PaymentStatus::Paid`]. All mutation goes through the transition
/// methods, which preserve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub bill_id: BillId,
    /// Weak reference to the billed client
    pub client_id: ClientId,
    /// Weak reference to the shipment being billed
    pub shipment_id: ShipmentId,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub payment_date: Option<DateTime<Utc>>,
    pub gstin: Option<String>,
    pub special_instructions: Option<String>,
    pub fuel_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating a bill
#[derive(Debug, Clone)]
pub struct NewBill {
    pub client_id: ClientId,
    pub shipment_id: ShipmentId,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub gstin: Option<String>,
    pub special_instructions: Option<String>,
    pub fuel_cost: Option<Decimal>,
}

/// Partial update for bill details
///
/// Payment status is deliberately absent; status changes go through the
/// state-machine operations only.
#[derive(Debug, Clone, Default)]
pub struct BillUpdate {
    pub due_date: Option<DateTime<Utc>>,
    pub amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub gstin: Option<String>,
    pub special_instructions: Option<String>,
    pub fuel_cost: Option<Decimal>,
}

impl Bill {
    /// Attaches an allocated identifier; every bill starts pending with no
    /// payment date
    pub fn new(bill_id: BillId, new: NewBill) -> Self {
        let now = Utc::now();
        Self {
            bill_id,
            client_id: new.client_id,
            shipment_id: new.shipment_id,
            issue_date: now,
            due_date: new.due_date,
            amount: new.amount,
            tax_amount: new.tax_amount,
            total_amount: new.total_amount,
            payment_status: PaymentStatus::Pending,
            payment_method: new.payment_method,
            payment_date: None,
            gstin: new.gstin,
            special_instructions: new.special_instructions,
            fuel_cost: new.fuel_cost,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a payment: pending|overdue → paid.
    ///
    /// `paid_at` defaults to the current time. Fails on a paid bill; the
    /// record is left untouched on error.
    pub fn record_payment(
        &mut self,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<(), BillingError> {
        self.transition(PaymentStatus::Paid, paid_at)
    }

    /// Sweep transition: pending → overdue. The payment date stays unset.
    pub fn mark_overdue(&mut self) -> Result<(), BillingError> {
        self.transition(PaymentStatus::Overdue, None)
    }

    /// Applies a status transition if the state machine allows it
    pub fn transition(
        &mut self,
        to: PaymentStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<(), BillingError> {
        if !self.payment_status.can_transition_to(to) {
            return Err(BillingError::InvalidTransition {
                from: self.payment_status,
                to,
            });
        }
        self.payment_status = to;
        self.payment_date = match to {
            PaymentStatus::Paid => Some(paid_at.unwrap_or_else(Utc::now)),
            _ => None,
        };
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the sweep would pick this bill up at `now`
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && self.payment_status == PaymentStatus::Pending
    }

    /// Applies a detail update, touching `updated_at`
    pub fn apply(&mut self, update: BillUpdate) {
        if let Some(due) = update.due_date {
            self.due_date = due;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(tax) = update.tax_amount {
            self.tax_amount = tax;
        }
        if let Some(total) = update.total_amount {
            self.total_amount = total;
        }
        if let Some(method) = update.payment_method {
            self.payment_method = Some(method);
        }
        if let Some(gstin) = update.gstin {
            self.gstin = Some(gstin);
        }
        if let Some(instructions) = update.special_instructions {
            self.special_instructions = Some(instructions);
        }
        if let Some(fuel) = update.fuel_cost {
            self.fuel_cost = Some(fuel);
        }
        self.updated_at = Utc::now();
    }
}
