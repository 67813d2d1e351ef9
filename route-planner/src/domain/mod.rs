//! Domain types for the route planner.
//!
//! This module contains the core types that represent validated timetable
//! data. All types enforce their invariants at construction time, so code
//! that receives these types can trust their validity.

mod ids;
mod time;

pub use ids::{RouteId, StopId, TripId};
pub use time::{TimeError, TimetableTime};
