//! CSV parsing for the three timetable tables.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::domain::{RouteId, StopId, TimetableTime, TripId};
use crate::stops::StopDirectory;

use super::error::LoadError;
use super::records::{RouteRow, StopRow, StopTime, StopTimeRow};

pub(super) const STOPS_FILE: &str = "stops.txt";
pub(super) const ROUTES_FILE: &str = "routes.txt";
pub(super) const STOP_TIMES_FILE: &str = "stop_times.txt";

/// Load all three tables from a timetable directory.
pub(super) fn load_dir(
    dir: &Path,
) -> Result<
    (
        StopDirectory,
        HashMap<RouteId, String>,
        HashMap<TripId, Vec<StopTime>>,
    ),
    LoadError,
> {
    let stops = load_stops(open(dir, STOPS_FILE)?)?;
    info!(count = stops.len(), "loaded stops table");

    let routes = load_routes(open(dir, ROUTES_FILE)?)?;
    info!(count = routes.len(), "loaded routes table");

    let trips = load_stop_times(open(dir, STOP_TIMES_FILE)?, &stops)?;
    info!(count = trips.len(), "loaded stop times for trips");

    Ok((stops, routes, trips))
}

fn open(dir: &Path, file: &'static str) -> Result<File, LoadError> {
    File::open(dir.join(file)).map_err(|source| LoadError::Io { file, source })
}

/// Parse the stops table into a directory, preserving file order.
pub(super) fn load_stops<R: Read>(reader: R) -> Result<StopDirectory, LoadError> {
    let mut rows = csv::Reader::from_reader(reader);
    let mut stops = Vec::new();

    for (idx, row) in rows.deserialize().enumerate() {
        let row: StopRow = row.map_err(|source| LoadError::Malformed {
            file: STOPS_FILE,
            source,
        })?;
        let record = idx as u64 + 1;

        if row.stop_id.is_empty() {
            return Err(LoadError::EmptyField {
                file: STOPS_FILE,
                record,
                field: "stop_id",
            });
        }
        if row.stop_name.is_empty() {
            return Err(LoadError::EmptyField {
                file: STOPS_FILE,
                record,
                field: "stop_name",
            });
        }

        stops.push((StopId::new(row.stop_id), row.stop_name));
    }

    Ok(StopDirectory::new(stops))
}

/// Parse the routes table. The route names take no part in path finding
/// but are kept queryable for callers rendering results.
pub(super) fn load_routes<R: Read>(reader: R) -> Result<HashMap<RouteId, String>, LoadError> {
    let mut rows = csv::Reader::from_reader(reader);
    let mut routes = HashMap::new();

    for (idx, row) in rows.deserialize().enumerate() {
        let row: RouteRow = row.map_err(|source| LoadError::Malformed {
            file: ROUTES_FILE,
            source,
        })?;
        let record = idx as u64 + 1;

        if row.route_id.is_empty() {
            return Err(LoadError::EmptyField {
                file: ROUTES_FILE,
                record,
                field: "route_id",
            });
        }

        routes.insert(RouteId::new(row.route_id), row.route_long_name);
    }

    Ok(routes)
}

/// Parse the stop-times table, grouped by trip.
///
/// Every referenced stop must exist in the stops table; times must parse
/// as service-day HH:MM:SS. Rows within a trip keep file order here; the
/// graph builder orders them by sequence index.
pub(super) fn load_stop_times<R: Read>(
    reader: R,
    stops: &StopDirectory,
) -> Result<HashMap<TripId, Vec<StopTime>>, LoadError> {
    let mut rows = csv::Reader::from_reader(reader);
    let mut trips: HashMap<TripId, Vec<StopTime>> = HashMap::new();

    for (idx, row) in rows.deserialize().enumerate() {
        let row: StopTimeRow = row.map_err(|source| LoadError::Malformed {
            file: STOP_TIMES_FILE,
            source,
        })?;
        let record = idx as u64 + 1;

        if row.trip_id.is_empty() {
            return Err(LoadError::EmptyField {
                file: STOP_TIMES_FILE,
                record,
                field: "trip_id",
            });
        }
        if row.stop_id.is_empty() {
            return Err(LoadError::EmptyField {
                file: STOP_TIMES_FILE,
                record,
                field: "stop_id",
            });
        }

        let trip = TripId::new(row.trip_id);
        let stop = StopId::new(row.stop_id);

        if !stops.contains(&stop) {
            return Err(LoadError::UnknownStop { trip, stop });
        }

        let arrival =
            TimetableTime::parse(&row.arrival_time).map_err(|source| LoadError::InvalidTime {
                which: "arrival",
                trip: trip.clone(),
                stop: stop.clone(),
                source,
            })?;
        let departure =
            TimetableTime::parse(&row.departure_time).map_err(|source| LoadError::InvalidTime {
                which: "departure",
                trip: trip.clone(),
                stop: stop.clone(),
                source,
            })?;

        trips.entry(trip).or_default().push(StopTime {
            stop,
            arrival,
            departure,
            sequence: row.stop_sequence,
        });
    }

    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS: &str = "\
stop_id,stop_name
R1,Rennes
N1,Nantes
";

    #[test]
    fn load_stops_happy_path() {
        let stops = load_stops(STOPS.as_bytes()).unwrap();

        assert_eq!(stops.len(), 2);
        assert_eq!(stops.name(&StopId::new("R1")), Some("Rennes"));
        assert_eq!(stops.name(&StopId::new("N1")), Some("Nantes"));
    }

    #[test]
    fn load_stops_ignores_extra_columns() {
        // Real GTFS stops.txt carries lat/lon and more
        let data = "\
stop_id,stop_name,stop_lat,stop_lon
R1,Rennes,48.10,-1.67
";
        let stops = load_stops(data.as_bytes()).unwrap();
        assert_eq!(stops.name(&StopId::new("R1")), Some("Rennes"));
    }

    #[test]
    fn load_stops_rejects_missing_column() {
        let data = "stop_id\nR1\n";
        let err = load_stops(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { file: "stops.txt", .. }));
    }

    #[test]
    fn load_stops_rejects_empty_id() {
        let data = "stop_id,stop_name\n,Rennes\n";
        let err = load_stops(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::EmptyField {
                record: 1,
                field: "stop_id",
                ..
            }
        ));
    }

    #[test]
    fn load_routes_happy_path() {
        let data = "\
route_id,route_long_name
RT1,Rennes - Nantes
";
        let routes = load_routes(data.as_bytes()).unwrap();
        assert_eq!(
            routes.get(&RouteId::new("RT1")).map(String::as_str),
            Some("Rennes - Nantes")
        );
    }

    #[test]
    fn load_stop_times_groups_by_trip() {
        let data = "\
trip_id,stop_id,arrival_time,departure_time,stop_sequence
T1,R1,10:00:00,10:00:00,1
T1,N1,11:30:00,11:32:00,2
T2,N1,12:00:00,12:00:00,1
T2,R1,13:10:00,13:10:00,2
";
        let stops = load_stops(STOPS.as_bytes()).unwrap();
        let trips = load_stop_times(data.as_bytes(), &stops).unwrap();

        assert_eq!(trips.len(), 2);
        let t1 = &trips[&TripId::new("T1")];
        assert_eq!(t1.len(), 2);
        assert_eq!(t1[0].stop, StopId::new("R1"));
        assert_eq!(t1[0].departure.minutes_since_midnight(), 600);
        assert_eq!(t1[1].arrival.minutes_since_midnight(), 690);
        assert_eq!(t1[1].sequence, 2);
    }

    #[test]
    fn load_stop_times_rejects_non_integer_sequence() {
        let data = "\
trip_id,stop_id,arrival_time,departure_time,stop_sequence
T1,R1,10:00:00,10:00:00,first
";
        let stops = load_stops(STOPS.as_bytes()).unwrap();
        let err = load_stop_times(data.as_bytes(), &stops).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Malformed {
                file: "stop_times.txt",
                ..
            }
        ));
    }

    #[test]
    fn load_stop_times_rejects_bad_time() {
        let data = "\
trip_id,stop_id,arrival_time,departure_time,stop_sequence
T1,R1,10:00:00,10:xx:00,1
";
        let stops = load_stops(STOPS.as_bytes()).unwrap();
        let err = load_stop_times(data.as_bytes(), &stops).unwrap_err();

        match err {
            LoadError::InvalidTime {
                which, trip, stop, ..
            } => {
                assert_eq!(which, "departure");
                assert_eq!(trip, TripId::new("T1"));
                assert_eq!(stop, StopId::new("R1"));
            }
            other => panic!("expected InvalidTime, got {other:?}"),
        }
    }

    #[test]
    fn load_stop_times_rejects_unknown_stop() {
        let data = "\
trip_id,stop_id,arrival_time,departure_time,stop_sequence
T1,GHOST,10:00:00,10:00:00,1
";
        let stops = load_stops(STOPS.as_bytes()).unwrap();
        let err = load_stop_times(data.as_bytes(), &stops).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownStop { stop, .. } if stop == StopId::new("GHOST")
        ));
    }

    #[test]
    fn load_stop_times_accepts_past_midnight_times() {
        let data = "\
trip_id,stop_id,arrival_time,departure_time,stop_sequence
T1,R1,23:50:00,23:55:00,1
T1,N1,24:10:00,24:10:00,2
";
        let stops = load_stops(STOPS.as_bytes()).unwrap();
        let trips = load_stop_times(data.as_bytes(), &stops).unwrap();
        assert_eq!(
            trips[&TripId::new("T1")][1].arrival.minutes_since_midnight(),
            24 * 60 + 10
        );
    }
}
