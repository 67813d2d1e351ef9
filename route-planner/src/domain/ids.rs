//! Identifier types for timetable entities.
//!
//! GTFS identifiers are opaque strings: the only structure we rely on is
//! that they are non-empty, which the loader enforces. Distinct newtypes
//! keep stop, trip, and route keys from being mixed up.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string key.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

id_type! {
    /// Key of a stop in the stops table.
    ///
    /// The ordering derived from the underlying string has no timetable
    /// meaning; the search uses it only as a deterministic tie-break.
    StopId
}

id_type! {
    /// Key of one scheduled run of a vehicle in the stop-times table.
    TripId
}

id_type! {
    /// Key of a route in the routes table.
    RouteId
}
