//! Property-based test data generators

use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{BillId, ClientId, ShipmentId};
use domain_billing::{NewBill, PaymentMethod, PaymentStatus};
use domain_fleet::client::{ClientStatus, NewClient};

/// Strategy for generating payment statuses
pub fn payment_status_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::Paid),
        Just(PaymentStatus::Overdue),
    ]
}

/// Strategy for generating payment methods
pub fn payment_method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Card),
        Just(PaymentMethod::BankTransfer),
        Just(PaymentMethod::Cash),
    ]
}

/// Strategy for positive monetary amounts with two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..100_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for allocated entity ids
pub fn sequence_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

/// Strategy for bill ids
pub fn bill_id_strategy() -> impl Strategy<Value = BillId> {
    sequence_strategy().prop_map(BillId::new)
}

/// Strategy for timestamps across 2026
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365i64, 0u32..24u32).prop_map(|(days, hours)| {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
            + Duration::days(days)
            + Duration::hours(hours as i64)
    })
}

/// Strategy for new-bill payloads with consistent amounts
/// (total = amount + tax)
pub fn new_bill_strategy() -> impl Strategy<Value = NewBill> {
    (
        sequence_strategy(),
        sequence_strategy(),
        timestamp_strategy(),
        amount_strategy(),
        amount_strategy(),
        proptest::option::of(payment_method_strategy()),
    )
        .prop_map(|(client, shipment, due_date, amount, tax_amount, method)| NewBill {
            client_id: ClientId::new(client),
            shipment_id: ShipmentId::new(shipment),
            due_date,
            amount,
            tax_amount,
            total_amount: amount + tax_amount,
            payment_method: method,
            gstin: None,
            special_instructions: None,
            fuel_cost: None,
        })
}

/// Generates a random but plausible client payload
pub fn random_client() -> NewClient {
    NewClient {
        client_name: Name().fake(),
        email: SafeEmail().fake(),
        phone_number: format!("+91-98{}", (10_000_000..99_999_999).fake::<u32>()),
        company_name: CompanyName().fake(),
        industry: "Logistics".to_string(),
        status: ClientStatus::Active,
        note: None,
    }
}
