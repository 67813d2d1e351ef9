//! Transit route planner.
//!
//! Loads a GTFS-style timetable (stops, routes, stop times), builds a
//! minute-weighted directed graph of consecutive-stop connections, and
//! answers "fastest route between these two places" queries, where a place
//! is a free-text name that may match several stops.

pub mod domain;
pub mod graph;
pub mod planner;
pub mod stops;
pub mod timetable;
