//! In-memory store implementations
//!
//! Every persistence port gets a map-backed implementation so services and
//! API handlers can be exercised without a database. Each store guards its
//! map with one mutex, which makes every status update a single atomic
//! check-and-write, the same contract the PostgreSQL adapters meet with
//! conditional UPDATE statements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use core_kernel::{
    AllocationError, BillId, ClientId, CounterStore, DriverId, ShipmentId, StoreError, TruckId,
};
use domain_billing::{Bill, BillStore, BillingError, PaymentStatus};
use domain_fleet::client::Client;
use domain_fleet::driver::Driver;
use domain_fleet::ports::{ClientStore, DriverStore, ShipmentStore, TruckStore};
use domain_fleet::shipment::Shipment;
use domain_fleet::truck::Truck;

/// In-memory counter store with the same find-or-create-and-increment
/// contract as the `counters` table
#[derive(Debug, Default)]
pub struct MemCounterStore {
    counters: Mutex<HashMap<String, i64>>,
}

impl MemCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a counter, for tests that need ids to start past a point
    pub fn seed(&self, name: &str, sequence: i64) {
        self.counters
            .lock()
            .unwrap()
            .insert(name.to_string(), sequence);
    }
}

#[async_trait]
impl CounterStore for MemCounterStore {
    async fn find_or_create_and_increment(&self, name: &str) -> Result<i64, AllocationError> {
        let mut counters = self.counters.lock().unwrap();
        let sequence = counters.entry(name.to_string()).or_insert(0);
        *sequence += 1;
        Ok(*sequence)
    }

    async fn current(&self, name: &str) -> Result<Option<i64>, AllocationError> {
        Ok(self.counters.lock().unwrap().get(name).copied())
    }
}

/// Counter store that always fails, for exercising allocation errors
#[derive(Debug, Default)]
pub struct FailingCounterStore;

#[async_trait]
impl CounterStore for FailingCounterStore {
    async fn find_or_create_and_increment(&self, _name: &str) -> Result<i64, AllocationError> {
        Err(AllocationError::unavailable("counter store down"))
    }

    async fn current(&self, _name: &str) -> Result<Option<i64>, AllocationError> {
        Err(AllocationError::unavailable("counter store down"))
    }
}

macro_rules! mem_store {
    ($store:ident, $trait:ident, $entity:ty, $id:ty, $id_field:ident, $label:literal) => {
        #[derive(Debug, Default)]
        pub struct $store {
            rows: Mutex<BTreeMap<i64, $entity>>,
        }

        impl $store {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn len(&self) -> usize {
                self.rows.lock().unwrap().len()
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }
        }

        #[async_trait]
        impl $trait for $store {
            async fn insert(&self, entity: &$entity) -> Result<(), StoreError> {
                self.rows
                    .lock()
                    .unwrap()
                    .insert(entity.$id_field.value(), entity.clone());
                Ok(())
            }

            async fn find(&self, id: $id) -> Result<Option<$entity>, StoreError> {
                Ok(self.rows.lock().unwrap().get(&id.value()).cloned())
            }

            async fn list(&self) -> Result<Vec<$entity>, StoreError> {
                Ok(self.rows.lock().unwrap().values().cloned().collect())
            }

            async fn update(&self, entity: &$entity) -> Result<(), StoreError> {
                let mut rows = self.rows.lock().unwrap();
                match rows.get_mut(&entity.$id_field.value()) {
                    Some(existing) => {
                        *existing = entity.clone();
                        Ok(())
                    }
                    None => Err(StoreError::not_found($label, entity.$id_field)),
                }
            }

            async fn delete(&self, id: $id) -> Result<bool, StoreError> {
                Ok(self.rows.lock().unwrap().remove(&id.value()).is_some())
            }
        }
    };
}

mem_store!(MemClientStore, ClientStore, Client, ClientId, client_id, "client");
mem_store!(MemDriverStore, DriverStore, Driver, DriverId, driver_id, "driver");
mem_store!(MemTruckStore, TruckStore, Truck, TruckId, truck_id, "truck");

/// In-memory shipment store
#[derive(Debug, Default)]
pub struct MemShipmentStore {
    rows: Mutex<BTreeMap<i64, Shipment>>,
}

impl MemShipmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShipmentStore for MemShipmentStore {
    async fn insert(&self, shipment: &Shipment) -> Result<(), StoreError> {
        self.rows
            .lock()
            .unwrap()
            .insert(shipment.shipment_id.value(), shipment.clone());
        Ok(())
    }

    async fn find(&self, id: ShipmentId) -> Result<Option<Shipment>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id.value()).cloned())
    }

    async fn list(&self) -> Result<Vec<Shipment>, StoreError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_client(&self, client: ClientId) -> Result<Vec<Shipment>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.client_id == client)
            .cloned()
            .collect())
    }

    async fn update(&self, shipment: &Shipment) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&shipment.shipment_id.value()) {
            Some(existing) => {
                *existing = shipment.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("shipment", shipment.shipment_id)),
        }
    }

    async fn delete(&self, id: ShipmentId) -> Result<bool, StoreError> {
        Ok(self.rows.lock().unwrap().remove(&id.value()).is_some())
    }
}

/// In-memory bill store, including the conditional transition operations
#[derive(Debug, Default)]
pub struct MemBillStore {
    rows: Mutex<BTreeMap<i64, Bill>>,
}

impl MemBillStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillStore for MemBillStore {
    async fn insert(&self, bill: &Bill) -> Result<(), StoreError> {
        self.rows
            .lock()
            .unwrap()
            .insert(bill.bill_id.value(), bill.clone());
        Ok(())
    }

    async fn find(&self, id: BillId) -> Result<Option<Bill>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id.value()).cloned())
    }

    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Bill>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.payment_status == status)
            .cloned()
            .collect())
    }

    async fn list_by_client(&self, client: ClientId) -> Result<Vec<Bill>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.client_id == client)
            .cloned()
            .collect())
    }

    async fn list_past_due(&self, now: DateTime<Utc>) -> Result<Vec<Bill>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.due_date < now && b.payment_status != PaymentStatus::Paid)
            .cloned()
            .collect())
    }

    async fn update(&self, bill: &Bill) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&bill.bill_id.value()) {
            Some(existing) => {
                *existing = bill.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("bill", bill.bill_id)),
        }
    }

    async fn delete(&self, id: BillId) -> Result<bool, StoreError> {
        Ok(self.rows.lock().unwrap().remove(&id.value()).is_some())
    }

    async fn record_payment(
        &self,
        id: BillId,
        paid_at: DateTime<Utc>,
    ) -> Result<Bill, BillingError> {
        let mut rows = self.rows.lock().unwrap();
        let bill = rows
            .get_mut(&id.value())
            .ok_or(BillingError::NotFound(id))?;
        bill.record_payment(Some(paid_at))?;
        Ok(bill.clone())
    }

    async fn mark_overdue(&self, id: BillId) -> Result<Bill, BillingError> {
        let mut rows = self.rows.lock().unwrap();
        let bill = rows
            .get_mut(&id.value())
            .ok_or(BillingError::NotFound(id))?;
        bill.mark_overdue()?;
        Ok(bill.clone())
    }

    async fn mark_overdue_due_before(&self, now: DateTime<Utc>) -> Result<u64, BillingError> {
        let mut rows = self.rows.lock().unwrap();
        let mut transitioned = 0;
        for bill in rows.values_mut() {
            if bill.is_past_due(now) {
                // Pending by the past-due filter, so the transition is legal.
                bill.mark_overdue()?;
                transitioned += 1;
            }
        }
        Ok(transitioned)
    }
}
