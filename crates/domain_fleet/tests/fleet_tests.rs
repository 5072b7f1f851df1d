//! Tests for the fleet creation protocol and service CRUD

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use core_kernel::{
    AllocationError, ClientId, CounterStore, DriverId, SequenceAllocator, ShipmentId, StoreError,
    TruckId,
};
use domain_fleet::{
    Client, ClientStatus, ClientStore, ClientUpdate, Driver, DriverStore, FleetError,
    FleetService, NewClient, NewShipment, Shipment, ShipmentStore, Truck, TruckStore,
};

#[derive(Default)]
struct MapCounterStore {
    counters: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl CounterStore for MapCounterStore {
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

#[derive(Default)]
struct MemClientStore {
    rows: Mutex<BTreeMap<i64, Client>>,
    /// When set, the next insert fails once
    fail_next_insert: AtomicBool,
}

#[async_trait]
impl ClientStore for MemClientStore {
    async fn insert(&self, client: &Client) -> Result<(), StoreError> {
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::connection("simulated outage"));
        }
        self.rows
            .lock()
            .unwrap()
            .insert(client.client_id.value(), client.clone());
        Ok(())
    }

    async fn find(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id.value()).cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, StoreError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, client: &Client) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&client.client_id.value()) {
            Some(existing) => {
                *existing = client.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("client", client.client_id)),
        }
    }

    async fn delete(&self, id: ClientId) -> Result<bool, StoreError> {
        Ok(self.rows.lock().unwrap().remove(&id.value()).is_some())
    }
}

#[derive(Default)]
struct MemShipmentStore {
    rows: Mutex<BTreeMap<i64, Shipment>>,
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

/// Unused entity stores so the service can be constructed
#[derive(Default)]
struct NoDrivers;
#[derive(Default)]
struct NoTrucks;

#[async_trait]
impl DriverStore for NoDrivers {
    async fn insert(&self, _: &Driver) -> Result<(), StoreError> {
        unimplemented!("not exercised")
    }
    async fn find(&self, _: DriverId) -> Result<Option<Driver>, StoreError> {
        Ok(None)
    }
    async fn list(&self) -> Result<Vec<Driver>, StoreError> {
        Ok(vec![])
    }
    async fn update(&self, _: &Driver) -> Result<(), StoreError> {
        unimplemented!("not exercised")
    }
    async fn delete(&self, _: DriverId) -> Result<bool, StoreError> {
        Ok(false)
    }
}

#[async_trait]
impl TruckStore for NoTrucks {
    async fn insert(&self, _: &Truck) -> Result<(), StoreError> {
        unimplemented!("not exercised")
    }
    async fn find(&self, _: TruckId) -> Result<Option<Truck>, StoreError> {
        Ok(None)
    }
    async fn list(&self) -> Result<Vec<Truck>, StoreError> {
        Ok(vec![])
    }
    async fn update(&self, _: &Truck) -> Result<(), StoreError> {
        unimplemented!("not exercised")
    }
    async fn delete(&self, _: TruckId) -> Result<bool, StoreError> {
        Ok(false)
    }
}

struct Harness {
    service: FleetService,
    allocator: SequenceAllocator,
    clients: Arc<MemClientStore>,
}

fn harness() -> Harness {
    let allocator = SequenceAllocator::new(Arc::new(MapCounterStore::default()));
    let clients = Arc::new(MemClientStore::default());
    let service = FleetService::new(
        allocator.clone(),
        clients.clone(),
        Arc::new(NoDrivers),
        Arc::new(NoTrucks),
        Arc::new(MemShipmentStore::default()),
    );
    Harness {
        service,
        allocator,
        clients,
    }
}

fn new_client(name: &str) -> NewClient {
    NewClient {
        client_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone_number: "+91-98200-11111".to_string(),
        company_name: format!("{name} & Co"),
        industry: "Logistics".to_string(),
        status: ClientStatus::Active,
        note: None,
    }
}

#[tokio::test]
async fn clients_receive_sequential_ids_starting_at_one() {
    let h = harness();

    let first = h.service.create_client(new_client("First")).await.unwrap();
    let second = h.service.create_client(new_client("Second")).await.unwrap();

    assert_eq!(first.client_id, ClientId::new(1));
    assert_eq!(second.client_id, ClientId::new(2));
}

#[tokio::test]
async fn failed_persist_consumes_the_allocated_id() {
    let h = harness();

    h.service.create_client(new_client("Kept")).await.unwrap();

    // Allocation succeeds, persistence fails: the id is gone for good.
    h.clients.fail_next_insert.store(true, Ordering::SeqCst);
    let err = h.service.create_client(new_client("Lost")).await.unwrap_err();
    assert!(matches!(err, FleetError::Store(_)));

    // The next creation gets a fresh id; the sequence has a permanent gap.
    let after = h.service.create_client(new_client("After")).await.unwrap();
    assert_eq!(after.client_id, ClientId::new(3));
    assert_eq!(
        h.allocator.current(ClientId::COUNTER).await.unwrap(),
        Some(3)
    );
    assert_eq!(h.service.list_clients().await.unwrap().len(), 2);
}

#[tokio::test]
async fn allocation_failure_aborts_creation_without_a_record() {
    struct BrokenCounters;

    #[async_trait]
    impl CounterStore for BrokenCounters {
        async fn find_or_create_and_increment(
            &self,
            name: &str,
        ) -> Result<i64, AllocationError> {
            Err(AllocationError::update_failed(name, "down"))
        }
        async fn current(&self, _: &str) -> Result<Option<i64>, AllocationError> {
            Ok(None)
        }
    }

    let clients = Arc::new(MemClientStore::default());
    let service = FleetService::new(
        SequenceAllocator::new(Arc::new(BrokenCounters)),
        clients.clone(),
        Arc::new(NoDrivers),
        Arc::new(NoTrucks),
        Arc::new(MemShipmentStore::default()),
    );

    let err = service.create_client(new_client("Nobody")).await.unwrap_err();
    assert!(matches!(err, FleetError::Allocation(_)));
    assert!(clients.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let h = harness();
    let created = h.service.create_client(new_client("Mutable")).await.unwrap();

    let updated = h
        .service
        .update_client(
            created.client_id,
            ClientUpdate {
                status: Some(ClientStatus::Inactive),
                note: Some("dormant account".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, ClientStatus::Inactive);
    assert_eq!(updated.note.as_deref(), Some("dormant account"));

    h.service.delete_client(created.client_id).await.unwrap();
    let err = h.service.get_client(created.client_id).await.unwrap_err();
    assert!(err.is_not_found());

    let err = h.service.delete_client(created.client_id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn shipments_filter_by_client() {
    let h = harness();
    let a = h.service.create_client(new_client("A")).await.unwrap();
    let b = h.service.create_client(new_client("B")).await.unwrap();

    for (client, city) in [(&a, "Nagpur"), (&a, "Surat"), (&b, "Indore")] {
        h.service
            .create_shipment(NewShipment {
                client_id: client.client_id,
                pickup_location: "Mumbai".to_string(),
                delivery_location: city.to_string(),
                cargo_type: "General".to_string(),
                cargo_weight: dec!(500),
                special_instructions: None,
                departure_date: chrono::Utc::now(),
                arrival_date: chrono::Utc::now() + chrono::Duration::days(2),
            })
            .await
            .unwrap();
    }

    let for_a = h
        .service
        .list_shipments_by_client(a.client_id)
        .await
        .unwrap();
    assert_eq!(for_a.len(), 2);
    assert!(for_a.iter().all(|s| s.client_id == a.client_id));
    assert_eq!(h.service.list_shipments().await.unwrap().len(), 3);
}
