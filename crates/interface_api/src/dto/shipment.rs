//! Shipment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::ClientId;
use domain_fleet::shipment::{NewShipment, ShipmentStatus, ShipmentUpdate};

use super::positive;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateShipmentRequest {
    pub client_id: i64,
    #[validate(length(min = 1))]
    pub pickup_location: String,
    #[validate(length(min = 1))]
    pub delivery_location: String,
    #[validate(length(min = 1))]
    pub cargo_type: String,
    #[validate(custom(function = "positive"))]
    pub cargo_weight: Decimal,
    pub special_instructions: Option<String>,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
}

impl CreateShipmentRequest {
    pub fn into_new_shipment(self) -> NewShipment {
        NewShipment {
            client_id: ClientId::new(self.client_id),
            pickup_location: self.pickup_location,
            delivery_location: self.delivery_location,
            cargo_type: self.cargo_type,
            cargo_weight: self.cargo_weight,
            special_instructions: self.special_instructions,
            departure_date: self.departure_date,
            arrival_date: self.arrival_date,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateShipmentRequest {
    pub pickup_location: Option<String>,
    pub delivery_location: Option<String>,
    pub cargo_type: Option<String>,
    #[validate(custom(function = "positive"))]
    pub cargo_weight: Option<Decimal>,
    pub special_instructions: Option<String>,
    pub departure_date: Option<DateTime<Utc>>,
    pub arrival_date: Option<DateTime<Utc>>,
    pub status: Option<ShipmentStatus>,
}

impl UpdateShipmentRequest {
    pub fn into_update(self) -> ShipmentUpdate {
        ShipmentUpdate {
            pickup_location: self.pickup_location,
            delivery_location: self.delivery_location,
            cargo_type: self.cargo_type,
            cargo_weight: self.cargo_weight,
            special_instructions: self.special_instructions,
            departure_date: self.departure_date,
            arrival_date: self.arrival_date,
            status: self.status,
        }
    }
}
