//! Truck records

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::TruckId;

/// Truck fuel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Diesel,
    Petrol,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Diesel => "Diesel",
            FuelType::Petrol => "Petrol",
            FuelType::Electric => "Electric",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Diesel" => Ok(FuelType::Diesel),
            "Petrol" => Ok(FuelType::Petrol),
            "Electric" => Ok(FuelType::Electric),
            other => Err(format!("unknown fuel type: {other}")),
        }
    }
}

/// Operational status of a truck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruckAvailability {
    Available,
    #[serde(rename = "Not Available")]
    NotAvailable,
    Maintenance,
}

impl TruckAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruckAvailability::Available => "Available",
            TruckAvailability::NotAvailable => "Not Available",
            TruckAvailability::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for TruckAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TruckAvailability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(TruckAvailability::Available),
            "Not Available" => Ok(TruckAvailability::NotAvailable),
            "Maintenance" => Ok(TruckAvailability::Maintenance),
            other => Err(format!("unknown truck availability: {other}")),
        }
    }
}

/// Insurance policy details carried on a truck record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceDetails {
    pub policy_number: String,
    pub expiry_date: Option<NaiveDate>,
}

/// A truck in the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub truck_id: TruckId,
    pub registration_number: String,
    pub model: String,
    /// Load capacity in tonnes
    pub capacity: Decimal,
    pub fuel_type: FuelType,
    /// Kilometres per litre, where tracked
    pub mileage: Option<Decimal>,
    pub availability_status: TruckAvailability,
    pub last_serviced_date: Option<NaiveDate>,
    pub insurance: Option<InsuranceDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating a truck
#[derive(Debug, Clone)]
pub struct NewTruck {
    pub registration_number: String,
    pub model: String,
    pub capacity: Decimal,
    pub fuel_type: FuelType,
    pub mileage: Option<Decimal>,
    pub availability_status: TruckAvailability,
    pub last_serviced_date: Option<NaiveDate>,
    pub insurance: Option<InsuranceDetails>,
}

/// Partial update for a truck record
#[derive(Debug, Clone, Default)]
pub struct TruckUpdate {
    pub registration_number: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<Decimal>,
    pub fuel_type: Option<FuelType>,
    pub mileage: Option<Decimal>,
    pub availability_status: Option<TruckAvailability>,
    pub last_serviced_date: Option<NaiveDate>,
    pub insurance: Option<InsuranceDetails>,
}

impl Truck {
    pub fn new(truck_id: TruckId, new: NewTruck) -> Self {
        let now = Utc::now();
        Self {
            truck_id,
            registration_number: new.registration_number,
            model: new.model,
            capacity: new.capacity,
            fuel_type: new.fuel_type,
            mileage: new.mileage,
            availability_status: new.availability_status,
            last_serviced_date: new.last_serviced_date,
            insurance: new.insurance,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: TruckUpdate) {
        if let Some(registration) = update.registration_number {
            self.registration_number = registration;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        if let Some(fuel_type) = update.fuel_type {
            self.fuel_type = fuel_type;
        }
        if let Some(mileage) = update.mileage {
            self.mileage = Some(mileage);
        }
        if let Some(availability) = update.availability_status {
            self.availability_status = availability;
        }
        if let Some(serviced) = update.last_serviced_date {
            self.last_serviced_date = Some(serviced);
        }
        if let Some(insurance) = update.insurance {
            self.insurance = Some(insurance);
        }
        self.updated_at = Utc::now();
    }
}
