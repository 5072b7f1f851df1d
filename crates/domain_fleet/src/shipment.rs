//! Shipment records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClientId, ShipmentId};

/// Delivery status of a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ShipmentStatus::Pending),
            "delivered" => Ok(ShipmentStatus::Delivered),
            "cancelled" => Ok(ShipmentStatus::Cancelled),
            other => Err(format!("unknown shipment status: {other}")),
        }
    }
}

/// A cargo shipment for a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub shipment_id: ShipmentId,
    /// Weak reference to the owning client, resolved by lookup
    pub client_id: ClientId,
    pub pickup_location: String,
    pub delivery_location: String,
    pub cargo_type: String,
    /// Cargo weight in kilograms
    pub cargo_weight: Decimal,
    pub special_instructions: Option<String>,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating a shipment
#[derive(Debug, Clone)]
pub struct NewShipment {
    pub client_id: ClientId,
    pub pickup_location: String,
    pub delivery_location: String,
    pub cargo_type: String,
    pub cargo_weight: Decimal,
    pub special_instructions: Option<String>,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
}

/// Partial update for a shipment record
#[derive(Debug, Clone, Default)]
pub struct ShipmentUpdate {
    pub pickup_location: Option<String>,
    pub delivery_location: Option<String>,
    pub cargo_type: Option<String>,
    pub cargo_weight: Option<Decimal>,
    pub special_instructions: Option<String>,
    pub departure_date: Option<DateTime<Utc>>,
    pub arrival_date: Option<DateTime<Utc>>,
    pub status: Option<ShipmentStatus>,
}

impl Shipment {
    /// Attaches an allocated identifier; new shipments start pending
    pub fn new(shipment_id: ShipmentId, new: NewShipment) -> Self {
        let now = Utc::now();
        Self {
            shipment_id,
            client_id: new.client_id,
            pickup_location: new.pickup_location,
            delivery_location: new.delivery_location,
            cargo_type: new.cargo_type,
            cargo_weight: new.cargo_weight,
            special_instructions: new.special_instructions,
            departure_date: new.departure_date,
            arrival_date: new.arrival_date,
            status: ShipmentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ShipmentUpdate) {
        if let Some(pickup) = update.pickup_location {
            self.pickup_location = pickup;
        }
        if let Some(delivery) = update.delivery_location {
            self.delivery_location = delivery;
        }
        if let Some(cargo_type) = update.cargo_type {
            self.cargo_type = cargo_type;
        }
        if let Some(weight) = update.cargo_weight {
            self.cargo_weight = weight;
        }
        if let Some(instructions) = update.special_instructions {
            self.special_instructions = Some(instructions);
        }
        if let Some(departure) = update.departure_date {
            self.departure_date = departure;
        }
        if let Some(arrival) = update.arrival_date {
            self.arrival_date = arrival;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}
