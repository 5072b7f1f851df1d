//! Fleet Domain - Clients, Drivers, Trucks, and Shipments
//!
//! This crate holds the administrative entity records of the freight system
//! and the creation protocol they all share: every record requests its
//! permanent integer identifier from the sequence allocator *before* it is
//! persisted. If persistence then fails, the allocated identifier is
//! consumed and never reused - an accepted gap.
//!
//! Storage is reached only through the port traits in [`ports`]; the
//! database adapters live in `infra_db`.

pub mod client;
pub mod driver;
pub mod error;
pub mod ports;
pub mod services;
pub mod shipment;
pub mod truck;

pub use client::{Client, ClientStatus, ClientUpdate, NewClient};
pub use driver::{Driver, DriverAvailability, DriverUpdate, NewDriver};
pub use error::FleetError;
pub use ports::{ClientStore, DriverStore, ShipmentStore, TruckStore};
pub use services::FleetService;
pub use shipment::{NewShipment, Shipment, ShipmentStatus, ShipmentUpdate};
pub use truck::{FuelType, InsuranceDetails, NewTruck, Truck, TruckAvailability, TruckUpdate};
