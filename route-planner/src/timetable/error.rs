//! Timetable load errors.
//!
//! A malformed timetable is a fatal configuration error: the loader never
//! skips a bad row, because a silently incomplete graph would return wrong
//! routes instead of failing.

use crate::domain::{StopId, TimeError, TripId};

/// Error aborting a timetable load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A table file could not be opened or read.
    #[error("failed to read {file}: {source}")]
    Io {
        file: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A row did not match the expected shape (missing column,
    /// non-integer stop_sequence, ...). The CSV error carries the
    /// offending record's position.
    #[error("malformed row in {file}: {source}")]
    Malformed {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A row carried an empty identifier or name.
    #[error("record {record} in {file} has an empty {field}")]
    EmptyField {
        file: &'static str,
        record: u64,
        field: &'static str,
    },

    /// A stop-time carried an unparseable arrival or departure time.
    #[error("invalid {which} time for stop '{stop}' of trip '{trip}': {source}")]
    InvalidTime {
        which: &'static str,
        trip: TripId,
        stop: StopId,
        #[source]
        source: TimeError,
    },

    /// A stop-time referenced a stop id absent from the stops table.
    #[error("trip '{trip}' references unknown stop '{stop}'")]
    UnknownStop { trip: TripId, stop: StopId },
}
