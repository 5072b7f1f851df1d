//! Request handlers

pub mod bills;
pub mod clients;
pub mod drivers;
pub mod health;
pub mod shipments;
pub mod trucks;
