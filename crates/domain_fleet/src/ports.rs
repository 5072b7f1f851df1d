//! Fleet Domain Ports
//!
//! Store traits the fleet domain needs from its persistence layer. The
//! PostgreSQL adapters live in `infra_db`; `test_utils` provides in-memory
//! implementations for tests. All traits are object-safe so services hold
//! them as `Arc<dyn ...>`.
//!
//! `update` replaces the stored record with the given one and fails with
//! [`StoreError::NotFound`] if no record with that id exists. `delete`
//! returns whether a record was removed.

use async_trait::async_trait;

use core_kernel::{ClientId, DriverId, ShipmentId, StoreError, TruckId};

use crate::client::Client;
use crate::driver::Driver;
use crate::shipment::Shipment;
use crate::truck::Truck;

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn insert(&self, client: &Client) -> Result<(), StoreError>;
    async fn find(&self, id: ClientId) -> Result<Option<Client>, StoreError>;
    async fn list(&self) -> Result<Vec<Client>, StoreError>;
    async fn update(&self, client: &Client) -> Result<(), StoreError>;
    async fn delete(&self, id: ClientId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait DriverStore: Send + Sync {
    async fn insert(&self, driver: &Driver) -> Result<(), StoreError>;
    async fn find(&self, id: DriverId) -> Result<Option<Driver>, StoreError>;
    async fn list(&self) -> Result<Vec<Driver>, StoreError>;
    async fn update(&self, driver: &Driver) -> Result<(), StoreError>;
    async fn delete(&self, id: DriverId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait TruckStore: Send + Sync {
    async fn insert(&self, truck: &Truck) -> Result<(), StoreError>;
    async fn find(&self, id: TruckId) -> Result<Option<Truck>, StoreError>;
    async fn list(&self) -> Result<Vec<Truck>, StoreError>;
    async fn update(&self, truck: &Truck) -> Result<(), StoreError>;
    async fn delete(&self, id: TruckId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ShipmentStore: Send + Sync {
    async fn insert(&self, shipment: &Shipment) -> Result<(), StoreError>;
    async fn find(&self, id: ShipmentId) -> Result<Option<Shipment>, StoreError>;
    async fn list(&self) -> Result<Vec<Shipment>, StoreError>;
    async fn list_by_client(&self, client: ClientId) -> Result<Vec<Shipment>, StoreError>;
    async fn update(&self, shipment: &Shipment) -> Result<(), StoreError>;
    async fn delete(&self, id: ShipmentId) -> Result<bool, StoreError>;
}
