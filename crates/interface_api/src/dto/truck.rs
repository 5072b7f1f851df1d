//! Truck DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use domain_fleet::truck::{FuelType, InsuranceDetails, NewTruck, TruckAvailability, TruckUpdate};

use super::positive;

#[derive(Debug, Deserialize, Validate)]
pub struct InsuranceDetailsRequest {
    #[validate(length(min = 1))]
    pub policy_number: String,
    pub expiry_date: Option<NaiveDate>,
}

impl InsuranceDetailsRequest {
    fn into_details(self) -> InsuranceDetails {
        InsuranceDetails {
            policy_number: self.policy_number,
            expiry_date: self.expiry_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTruckRequest {
    #[validate(length(min = 1))]
    pub registration_number: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(custom(function = "positive"))]
    pub capacity: Decimal,
    pub fuel_type: FuelType,
    pub mileage: Option<Decimal>,
    /// Defaults to `Available` when omitted
    pub availability_status: Option<TruckAvailability>,
    pub last_serviced_date: Option<NaiveDate>,
    #[validate(nested)]
    pub insurance: Option<InsuranceDetailsRequest>,
}

impl CreateTruckRequest {
    pub fn into_new_truck(self) -> NewTruck {
        NewTruck {
            registration_number: self.registration_number,
            model: self.model,
            capacity: self.capacity,
            fuel_type: self.fuel_type,
            mileage: self.mileage,
            availability_status: self
                .availability_status
                .unwrap_or(TruckAvailability::Available),
            last_serviced_date: self.last_serviced_date,
            insurance: self.insurance.map(InsuranceDetailsRequest::into_details),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTruckRequest {
    pub registration_number: Option<String>,
    pub model: Option<String>,
    #[validate(custom(function = "positive"))]
    pub capacity: Option<Decimal>,
    pub fuel_type: Option<FuelType>,
    pub mileage: Option<Decimal>,
    pub availability_status: Option<TruckAvailability>,
    pub last_serviced_date: Option<NaiveDate>,
    #[validate(nested)]
    pub insurance: Option<InsuranceDetailsRequest>,
}

impl UpdateTruckRequest {
    pub fn into_update(self) -> TruckUpdate {
        TruckUpdate {
            registration_number: self.registration_number,
            model: self.model,
            capacity: self.capacity,
            fuel_type: self.fuel_type,
            mileage: self.mileage,
            availability_status: self.availability_status,
            last_serviced_date: self.last_serviced_date,
            insurance: self.insurance.map(InsuranceDetailsRequest::into_details),
        }
    }
}
