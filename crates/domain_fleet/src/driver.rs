//! Driver records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{DriverId, TruckId};

/// Whether a driver can take an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverAvailability {
    Available,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl DriverAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverAvailability::Available => "Available",
            DriverAvailability::NotAvailable => "Not Available",
        }
    }
}

impl fmt::Display for DriverAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverAvailability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(DriverAvailability::Available),
            "Not Available" => Ok(DriverAvailability::NotAvailable),
            other => Err(format!("unknown driver availability: {other}")),
        }
    }
}

/// A driver employed by the company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: DriverId,
    pub name: String,
    pub license_number: String,
    pub phone_number: String,
    pub address: String,
    pub availability_status: DriverAvailability,
    /// Weak reference to the truck currently assigned, if any
    pub assigned_truck: Option<TruckId>,
    /// Monthly salary, non-negative
    pub salary: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for creating a driver
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub name: String,
    pub license_number: String,
    pub phone_number: String,
    pub address: String,
    pub availability_status: DriverAvailability,
    pub assigned_truck: Option<TruckId>,
    pub salary: Decimal,
}

/// Partial update for a driver record
#[derive(Debug, Clone, Default)]
pub struct DriverUpdate {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub availability_status: Option<DriverAvailability>,
    /// `Some(None)` clears the truck assignment
    pub assigned_truck: Option<Option<TruckId>>,
    pub salary: Option<Decimal>,
}

impl Driver {
    pub fn new(driver_id: DriverId, new: NewDriver) -> Self {
        Self {
            driver_id,
            name: new.name,
            license_number: new.license_number,
            phone_number: new.phone_number,
            address: new.address,
            availability_status: new.availability_status,
            assigned_truck: new.assigned_truck,
            salary: new.salary,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: DriverUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(license) = update.license_number {
            self.license_number = license;
        }
        if let Some(phone) = update.phone_number {
            self.phone_number = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(availability) = update.availability_status {
            self.availability_status = availability;
        }
        if let Some(truck) = update.assigned_truck {
            self.assigned_truck = truck;
        }
        if let Some(salary) = update.salary {
            self.salary = salary;
        }
    }
}
