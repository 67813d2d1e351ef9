//! Route planning over a loaded timetable.
//!
//! The facade resolves two free-text place names to candidate stop sets
//! and picks the globally cheapest path across all candidate pairs using
//! Dijkstra search over the connection graph.

mod query;
mod search;


pub use query::{Itinerary, PlannerError, RouteOutcome, RoutePlanner};
pub use search::{PathResult, shortest_path, shortest_paths};
