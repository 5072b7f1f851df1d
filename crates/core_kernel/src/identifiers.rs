//! Strongly-typed sequential identifiers for domain entities
//!
//! Every entity type carries a human-readable integer identifier minted by
//! the sequence allocator. Newtype wrappers around `i64` prevent accidental
//! mixing of identifier types and pin each type to its counter name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::sequence::SequencedId;

macro_rules! define_seq_id {
    ($name:ident, $counter:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Counter name this identifier type is allocated from
            pub const COUNTER: &'static str = $counter;

            /// Wraps an already-allocated sequence value
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl SequencedId for $name {
            const COUNTER: &'static str = $counter;

            fn from_sequence(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_seq_id!(ClientId, "client_id");
define_seq_id!(DriverId, "driver_id");
define_seq_id!(TruckId, "truck_id");
define_seq_id!(ShipmentId, "shipment_id");
define_seq_id!(BillId, "bill_id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_names_are_distinct() {
        let names = [
            ClientId::COUNTER,
            DriverId::COUNTER,
            TruckId::COUNTER,
            ShipmentId::COUNTER,
            BillId::COUNTER,
        ];
        for (i, a) in names.iter().enumerate() {
            for b in names.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_display_is_bare_integer() {
        assert_eq!(BillId::new(42).to_string(), "42");
    }

    #[test]
    fn test_parse_round_trip() {
        let id: ClientId = "17".parse().unwrap();
        assert_eq!(id, ClientId::new(17));
    }
}
