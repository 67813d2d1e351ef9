//! Row records for the timetable tables.
//!
//! The raw rows mirror the CSV columns and exist only inside the loader;
//! everything downstream sees the validated types. Real feeds carry many
//! more columns than we read; serde ignores the extras.

use serde::Deserialize;

use crate::domain::{StopId, TimetableTime};

/// Raw row of `stops.txt`.
#[derive(Debug, Deserialize)]
pub(super) struct StopRow {
    pub stop_id: String,
    pub stop_name: String,
}

/// Raw row of `routes.txt`.
#[derive(Debug, Deserialize)]
pub(super) struct RouteRow {
    pub route_id: String,
    pub route_long_name: String,
}

/// Raw row of `stop_times.txt`.
#[derive(Debug, Deserialize)]
pub(super) struct StopTimeRow {
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_sequence: u32,
}

/// One validated scheduled call of a trip at a stop.
///
/// The sequence index is the sole ordering key within a trip; arrival and
/// departure times are not assumed sorted in the source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub stop: StopId,
    pub arrival: TimetableTime,
    pub departure: TimetableTime,
    pub sequence: u32,
}
