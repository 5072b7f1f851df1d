//! Pre-built test data for common entities

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use core_kernel::{ClientId, ShipmentId, TruckId};
use domain_billing::{NewBill, PaymentMethod};
use domain_fleet::client::{ClientStatus, NewClient};
use domain_fleet::driver::{DriverAvailability, NewDriver};
use domain_fleet::shipment::NewShipment;
use domain_fleet::truck::{FuelType, InsuranceDetails, NewTruck, TruckAvailability};

pub fn sample_client() -> NewClient {
    NewClient {
        client_name: "Asha Verma".to_string(),
        email: "asha@verma-textiles.example".to_string(),
        phone_number: "+91-98200-00001".to_string(),
        company_name: "Verma Textiles".to_string(),
        industry: "Textiles".to_string(),
        status: ClientStatus::Active,
        note: None,
    }
}

pub fn sample_driver() -> NewDriver {
    NewDriver {
        name: "Ravi Kumar".to_string(),
        license_number: "DL-0420110012345".to_string(),
        phone_number: "+91-98100-00002".to_string(),
        address: "14 Transport Nagar, Delhi".to_string(),
        availability_status: DriverAvailability::Available,
        assigned_truck: None,
        salary: dec!(32000),
    }
}

pub fn sample_truck() -> NewTruck {
    NewTruck {
        registration_number: "MH-12-AB-3456".to_string(),
        model: "Tata LPT 1618".to_string(),
        capacity: dec!(16),
        fuel_type: FuelType::Diesel,
        mileage: Some(dec!(4.5)),
        availability_status: TruckAvailability::Available,
        last_serviced_date: None,
        insurance: Some(InsuranceDetails {
            policy_number: "INS-2026-00431".to_string(),
            expiry_date: None,
        }),
    }
}

pub fn sample_shipment(client_id: ClientId) -> NewShipment {
    NewShipment {
        client_id,
        pickup_location: "Mumbai".to_string(),
        delivery_location: "Pune".to_string(),
        cargo_type: "Cotton bales".to_string(),
        cargo_weight: dec!(1200),
        special_instructions: None,
        departure_date: Utc::now(),
        arrival_date: Utc::now() + Duration::days(1),
    }
}

/// A bill due a week from now, so it starts outside the sweep's reach
pub fn sample_bill(client_id: ClientId, shipment_id: ShipmentId) -> NewBill {
    NewBill {
        client_id,
        shipment_id,
        due_date: Utc::now() + Duration::days(7),
        amount: dec!(10000),
        tax_amount: dec!(1800),
        total_amount: dec!(11800),
        payment_method: Some(PaymentMethod::BankTransfer),
        gstin: Some("27AAPFU0939F1ZV".to_string()),
        special_instructions: None,
        fuel_cost: Some(dec!(2200)),
    }
}

/// A bill already past its due date, still pending
pub fn past_due_bill(client_id: ClientId, shipment_id: ShipmentId) -> NewBill {
    NewBill {
        due_date: Utc::now() - Duration::days(3),
        ..sample_bill(client_id, shipment_id)
    }
}

/// Default truck reference used by driver-assignment tests
pub fn assigned_truck_id() -> TruckId {
    TruckId::new(1)
}
