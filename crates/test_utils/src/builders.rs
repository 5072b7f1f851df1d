//! Test data builders
//!
//! Builders with sensible defaults so tests specify only the fields they
//! care about.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{BillId, ClientId, ShipmentId};
use domain_billing::{Bill, NewBill, PaymentMethod};
use domain_fleet::client::{Client, ClientStatus, NewClient};

/// Builder for bills in a chosen lifecycle state
pub struct TestBillBuilder {
    bill_id: BillId,
    client_id: ClientId,
    shipment_id: ShipmentId,
    due_date: DateTime<Utc>,
    amount: Decimal,
    tax_amount: Decimal,
    total_amount: Decimal,
    payment_method: Option<PaymentMethod>,
    paid_at: Option<DateTime<Utc>>,
    overdue: bool,
}

impl Default for TestBillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillBuilder {
    pub fn new() -> Self {
        Self {
            bill_id: BillId::new(1),
            client_id: ClientId::new(1),
            shipment_id: ShipmentId::new(1),
            due_date: Utc::now() + Duration::days(7),
            amount: dec!(10000),
            tax_amount: dec!(1800),
            total_amount: dec!(11800),
            payment_method: Some(PaymentMethod::BankTransfer),
            paid_at: None,
            overdue: false,
        }
    }

    pub fn with_bill_id(mut self, id: BillId) -> Self {
        self.bill_id = id;
        self
    }

    pub fn with_client_id(mut self, id: ClientId) -> Self {
        self.client_id = id;
        self
    }

    pub fn with_shipment_id(mut self, id: ShipmentId) -> Self {
        self.shipment_id = id;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Moves the due date into the past, within the sweep's reach
    pub fn past_due(mut self) -> Self {
        self.due_date = Utc::now() - Duration::days(3);
        self
    }

    pub fn with_total_amount(mut self, total: Decimal) -> Self {
        self.total_amount = total;
        self
    }

    /// Builds the bill already paid at the given time
    pub fn paid_at(mut self, paid_at: DateTime<Utc>) -> Self {
        self.paid_at = Some(paid_at);
        self
    }

    /// Builds the bill already in the overdue state
    pub fn overdue(mut self) -> Self {
        self.overdue = true;
        self
    }

    pub fn build(self) -> Bill {
        let mut bill = Bill::new(
            self.bill_id,
            NewBill {
                client_id: self.client_id,
                shipment_id: self.shipment_id,
                due_date: self.due_date,
                amount: self.amount,
                tax_amount: self.tax_amount,
                total_amount: self.total_amount,
                payment_method: self.payment_method,
                gstin: None,
                special_instructions: None,
                fuel_cost: None,
            },
        );
        if self.overdue {
            bill.mark_overdue().expect("fresh bill is pending");
        }
        if let Some(paid_at) = self.paid_at {
            bill.record_payment(Some(paid_at))
                .expect("unpaid bill accepts payment");
        }
        bill
    }
}

/// Builder for client records
pub struct TestClientBuilder {
    client_id: ClientId,
    client_name: String,
    email: String,
    status: ClientStatus,
}

impl Default for TestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClientBuilder {
    pub fn new() -> Self {
        Self {
            client_id: ClientId::new(1),
            client_name: "Asha Verma".to_string(),
            email: "asha@verma-textiles.example".to_string(),
            status: ClientStatus::Active,
        }
    }

    pub fn with_client_id(mut self, id: ClientId) -> Self {
        self.client_id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.status = ClientStatus::Inactive;
        self
    }

    pub fn build(self) -> Client {
        Client::new(
            self.client_id,
            NewClient {
                client_name: self.client_name,
                email: self.email,
                phone_number: "+91-98200-00001".to_string(),
                company_name: "Verma Textiles".to_string(),
                industry: "Textiles".to_string(),
                status: self.status,
                note: None,
            },
        )
    }
}
