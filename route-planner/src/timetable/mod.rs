//! Timetable loading and storage.
//!
//! One `Timetable` is an immutable snapshot of the three GTFS-style
//! tables: stops, routes, and stop-times grouped by trip. Loading is
//! strict — any malformed row aborts the load, because a graph built from
//! a partially read timetable would silently return wrong routes.
//! Refreshing from updated files means loading a new snapshot and swapping
//! the reference; an existing `Timetable` is never mutated.

mod error;
mod loader;
mod records;

pub use error::LoadError;
pub use records::StopTime;

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{RouteId, StopId, TimetableTime, TripId};
use crate::stops::StopDirectory;

/// An immutable snapshot of the loaded timetable tables.
#[derive(Debug)]
pub struct Timetable {
    stops: StopDirectory,
    routes: HashMap<RouteId, String>,
    trips: HashMap<TripId, Vec<StopTime>>,
}

impl Timetable {
    /// Load a timetable from a directory holding `stops.txt`,
    /// `routes.txt`, and `stop_times.txt`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let (stops, routes, trips) = loader::load_dir(dir.as_ref())?;
        Ok(Self {
            stops,
            routes,
            trips,
        })
    }

    /// The stop directory (names and place resolution).
    pub fn stops(&self) -> &StopDirectory {
        &self.stops
    }

    /// Look up a route's display name.
    pub fn route_name(&self, route: &RouteId) -> Option<&str> {
        self.routes.get(route).map(String::as_str)
    }

    /// Number of routes in the routes table.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of trips with at least one stop-time.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Iterate over trips and their stop-times (unordered across trips;
    /// stop-times within a trip are in file order, not sequence order).
    pub fn trips(&self) -> impl Iterator<Item = (&TripId, &[StopTime])> {
        self.trips.iter().map(|(id, times)| (id, times.as_slice()))
    }
}

/// Programmatic [`Timetable`] construction, mostly for tests and
/// embedders that already hold parsed data.
///
/// Validation matches the CSV loader: times must parse, and every
/// stop-time must reference a declared stop.
///
/// # Examples
///
/// ```
/// use route_planner::timetable::TimetableBuilder;
///
/// let timetable = TimetableBuilder::new()
///     .stop("R1", "Rennes")
///     .stop("N1", "Nantes")
///     .trip("T1", &[("R1", "10:00:00", "10:00:00", 1), ("N1", "11:30:00", "11:30:00", 2)])
///     .build()
///     .unwrap();
///
/// assert_eq!(timetable.trip_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TimetableBuilder {
    stops: Vec<(String, String)>,
    routes: Vec<(String, String)>,
    trips: Vec<(String, Vec<(String, String, String, u32)>)>,
}

impl TimetableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a stop with its display name.
    pub fn stop(mut self, id: &str, name: &str) -> Self {
        self.stops.push((id.to_string(), name.to_string()));
        self
    }

    /// Declare a route with its display name.
    pub fn route(mut self, id: &str, name: &str) -> Self {
        self.routes.push((id.to_string(), name.to_string()));
        self
    }

    /// Declare a trip from (stop id, arrival, departure, sequence) tuples.
    pub fn trip(mut self, id: &str, stop_times: &[(&str, &str, &str, u32)]) -> Self {
        self.trips.push((
            id.to_string(),
            stop_times
                .iter()
                .map(|(stop, arrival, departure, sequence)| {
                    (
                        stop.to_string(),
                        arrival.to_string(),
                        departure.to_string(),
                        *sequence,
                    )
                })
                .collect(),
        ));
        self
    }

    /// Validate and build the timetable.
    pub fn build(self) -> Result<Timetable, LoadError> {
        let stops = StopDirectory::new(
            self.stops
                .into_iter()
                .map(|(id, name)| (StopId::new(id), name)),
        );

        let routes = self
            .routes
            .into_iter()
            .map(|(id, name)| (RouteId::new(id), name))
            .collect();

        let mut trips: HashMap<TripId, Vec<StopTime>> = HashMap::new();
        for (trip_id, stop_times) in self.trips {
            let trip = TripId::new(trip_id);
            let mut validated = Vec::with_capacity(stop_times.len());

            for (stop_id, arrival, departure, sequence) in stop_times {
                let stop = StopId::new(stop_id);
                if !stops.contains(&stop) {
                    return Err(LoadError::UnknownStop { trip, stop });
                }

                let arrival =
                    TimetableTime::parse(&arrival).map_err(|source| LoadError::InvalidTime {
                        which: "arrival",
                        trip: trip.clone(),
                        stop: stop.clone(),
                        source,
                    })?;
                let departure =
                    TimetableTime::parse(&departure).map_err(|source| LoadError::InvalidTime {
                        which: "departure",
                        trip: trip.clone(),
                        stop: stop.clone(),
                        source,
                    })?;

                validated.push(StopTime {
                    stop,
                    arrival,
                    departure,
                    sequence,
                });
            }

            trips.entry(trip).or_default().extend(validated);
        }

        Ok(Timetable {
            stops,
            routes,
            trips,
        })
    }
}
