//! Driver DTOs

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::TruckId;
use domain_fleet::driver::{DriverAvailability, DriverUpdate, NewDriver};

use super::{double_option, non_negative};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub license_number: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub address: String,
    /// Defaults to `Available` when omitted
    pub availability_status: Option<DriverAvailability>,
    pub assigned_truck: Option<i64>,
    #[validate(custom(function = "non_negative"))]
    pub salary: Decimal,
}

impl CreateDriverRequest {
    pub fn into_new_driver(self) -> NewDriver {
        NewDriver {
            name: self.name,
            license_number: self.license_number,
            phone_number: self.phone_number,
            address: self.address,
            availability_status: self
                .availability_status
                .unwrap_or(DriverAvailability::Available),
            assigned_truck: self.assigned_truck.map(TruckId::new),
            salary: self.salary,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub availability_status: Option<DriverAvailability>,
    /// Explicit `null` clears the truck assignment
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_truck: Option<Option<i64>>,
    #[validate(custom(function = "non_negative"))]
    pub salary: Option<Decimal>,
}

impl UpdateDriverRequest {
    pub fn into_update(self) -> DriverUpdate {
        DriverUpdate {
            name: self.name,
            license_number: self.license_number,
            phone_number: self.phone_number,
            address: self.address,
            availability_status: self.availability_status,
            assigned_truck: self
                .assigned_truck
                .map(|truck| truck.map(TruckId::new)),
            salary: self.salary,
        }
    }
}
