//! Fleet application service
//!
//! One service fronts all four fleet entity types. Creation follows the
//! shared protocol: allocate the identifier first, then persist. The
//! allocation happens-before persistence; when persistence fails the
//! already-issued identifier stays consumed and no compensation is
//! attempted.

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{ClientId, DriverId, SequenceAllocator, ShipmentId, TruckId};

use crate::client::{Client, ClientUpdate, NewClient};
use crate::driver::{Driver, DriverUpdate, NewDriver};
use crate::error::FleetError;
use crate::ports::{ClientStore, DriverStore, ShipmentStore, TruckStore};
use crate::shipment::{NewShipment, Shipment, ShipmentUpdate};
use crate::truck::{NewTruck, Truck, TruckUpdate};

/// Application service for fleet entity CRUD
#[derive(Clone)]
pub struct FleetService {
    allocator: SequenceAllocator,
    clients: Arc<dyn ClientStore>,
    drivers: Arc<dyn DriverStore>,
    trucks: Arc<dyn TruckStore>,
    shipments: Arc<dyn ShipmentStore>,
}

impl FleetService {
    pub fn new(
        allocator: SequenceAllocator,
        clients: Arc<dyn ClientStore>,
        drivers: Arc<dyn DriverStore>,
        trucks: Arc<dyn TruckStore>,
        shipments: Arc<dyn ShipmentStore>,
    ) -> Self {
        Self {
            allocator,
            clients,
            drivers,
            trucks,
            shipments,
        }
    }

    // ----- Clients -----

    pub async fn create_client(&self, new: NewClient) -> Result<Client, FleetError> {
        let id: ClientId = self.allocator.next().await?;
        let client = Client::new(id, new);
        self.clients.insert(&client).await?;
        info!(client_id = %id, "client created");
        Ok(client)
    }

    pub async fn get_client(&self, id: ClientId) -> Result<Client, FleetError> {
        self.clients
            .find(id)
            .await?
            .ok_or_else(|| FleetError::not_found("client", id.value()))
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, FleetError> {
        Ok(self.clients.list().await?)
    }

    pub async fn update_client(
        &self,
        id: ClientId,
        update: ClientUpdate,
    ) -> Result<Client, FleetError> {
        let mut client = self.get_client(id).await?;
        client.apply(update);
        self.clients.update(&client).await?;
        Ok(client)
    }

    pub async fn delete_client(&self, id: ClientId) -> Result<(), FleetError> {
        if self.clients.delete(id).await? {
            debug!(client_id = %id, "client deleted");
            Ok(())
        } else {
            Err(FleetError::not_found("client", id.value()))
        }
    }

    // ----- Drivers -----

    pub async fn create_driver(&self, new: NewDriver) -> Result<Driver, FleetError> {
        let id: DriverId = self.allocator.next().await?;
        let driver = Driver::new(id, new);
        self.drivers.insert(&driver).await?;
        info!(driver_id = %id, "driver created");
        Ok(driver)
    }

    pub async fn get_driver(&self, id: DriverId) -> Result<Driver, FleetError> {
        self.drivers
            .find(id)
            .await?
            .ok_or_else(|| FleetError::not_found("driver", id.value()))
    }

    pub async fn list_drivers(&self) -> Result<Vec<Driver>, FleetError> {
        Ok(self.drivers.list().await?)
    }

    pub async fn update_driver(
        &self,
        id: DriverId,
        update: DriverUpdate,
    ) -> Result<Driver, FleetError> {
        let mut driver = self.get_driver(id).await?;
        driver.apply(update);
        self.drivers.update(&driver).await?;
        Ok(driver)
    }

    pub async fn delete_driver(&self, id: DriverId) -> Result<(), FleetError> {
        if self.drivers.delete(id).await? {
            debug!(driver_id = %id, "driver deleted");
            Ok(())
        } else {
            Err(FleetError::not_found("driver", id.value()))
        }
    }

    // ----- Trucks -----

    pub async fn create_truck(&self, new: NewTruck) -> Result<Truck, FleetError> {
        let id: TruckId = self.allocator.next().await?;
        let truck = Truck::new(id, new);
        self.trucks.insert(&truck).await?;
        info!(truck_id = %id, "truck created");
        Ok(truck)
    }

    pub async fn get_truck(&self, id: TruckId) -> Result<Truck, FleetError> {
        self.trucks
            .find(id)
            .await?
            .ok_or_else(|| FleetError::not_found("truck", id.value()))
    }

    pub async fn list_trucks(&self) -> Result<Vec<Truck>, FleetError> {
        Ok(self.trucks.list().await?)
    }

    pub async fn update_truck(
        &self,
        id: TruckId,
        update: TruckUpdate,
    ) -> Result<Truck, FleetError> {
        let mut truck = self.get_truck(id).await?;
        truck.apply(update);
        self.trucks.update(&truck).await?;
        Ok(truck)
    }

    pub async fn delete_truck(&self, id: TruckId) -> Result<(), FleetError> {
        if self.trucks.delete(id).await? {
            debug!(truck_id = %id, "truck deleted");
            Ok(())
        } else {
            Err(FleetError::not_found("truck", id.value()))
        }
    }

    // ----- Shipments -----

    pub async fn create_shipment(&self, new: NewShipment) -> Result<Shipment, FleetError> {
        let id: ShipmentId = self.allocator.next().await?;
        let shipment = Shipment::new(id, new);
        self.shipments.insert(&shipment).await?;
        info!(shipment_id = %id, client_id = %shipment.client_id, "shipment created");
        Ok(shipment)
    }

    pub async fn get_shipment(&self, id: ShipmentId) -> Result<Shipment, FleetError> {
        self.shipments
            .find(id)
            .await?
            .ok_or_else(|| FleetError::not_found("shipment", id.value()))
    }

    pub async fn list_shipments(&self) -> Result<Vec<Shipment>, FleetError> {
        Ok(self.shipments.list().await?)
    }

    pub async fn list_shipments_by_client(
        &self,
        client: ClientId,
    ) -> Result<Vec<Shipment>, FleetError> {
        Ok(self.shipments.list_by_client(client).await?)
    }

    pub async fn update_shipment(
        &self,
        id: ShipmentId,
        update: ShipmentUpdate,
    ) -> Result<Shipment, FleetError> {
        let mut shipment = self.get_shipment(id).await?;
        shipment.apply(update);
        self.shipments.update(&shipment).await?;
        Ok(shipment)
    }

    pub async fn delete_shipment(&self, id: ShipmentId) -> Result<(), FleetError> {
        if self.shipments.delete(id).await? {
            debug!(shipment_id = %id, "shipment deleted");
            Ok(())
        } else {
            Err(FleetError::not_found("shipment", id.value()))
        }
    }
}
