//! PostgreSQL implementations of the domain store ports

pub mod bills;
pub mod clients;
pub mod counters;
pub mod drivers;
pub mod shipments;
pub mod trucks;

pub use bills::BillRepository;
pub use clients::ClientRepository;
pub use counters::CounterRepository;
pub use drivers::DriverRepository;
pub use shipments::ShipmentRepository;
pub use trucks::TruckRepository;
