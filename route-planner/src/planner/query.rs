//! Route query facade.
//!
//! `RoutePlanner` owns one timetable snapshot and the graph built from
//! it. Queries only read; refreshing the timetable means building a new
//! planner and swapping the shared reference (e.g. an `Arc`), so
//! in-flight queries keep the snapshot they started with.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::domain::{RouteId, StopId};
use crate::graph::{GraphError, TransitGraph};
use crate::timetable::{LoadError, Timetable};

use super::search::{PathResult, shortest_paths};

/// Error constructing a planner (loading tables or building the graph).
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A planned route: ordered stop ids and the total travel minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub stops: Vec<StopId>,
    pub total_minutes: u32,
}

impl From<PathResult> for Itinerary {
    fn from(path: PathResult) -> Self {
        Self {
            stops: path.stops,
            total_minutes: path.total_minutes,
        }
    }
}

/// Outcome of a route query.
///
/// The two negative outcomes are ordinary results, kept distinct so the
/// caller can tell "that place is not in the timetable" from "those
/// places are not connected".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// The cheapest route across all candidate stop pairs.
    Found(Itinerary),

    /// A place name resolved to no stops. `place` is the query text that
    /// failed; when both fail, the departure is reported.
    PlaceNotFound { place: String },

    /// Both places resolved, but no candidate pair is connected.
    NoRoute,
}

/// Route planning facade over one timetable snapshot.
///
/// All query methods take `&self`; the planner holds no interior
/// mutability and can be shared across threads.
#[derive(Debug)]
pub struct RoutePlanner {
    timetable: Timetable,
    graph: TransitGraph,
}

impl RoutePlanner {
    /// Build a planner from an already-loaded timetable.
    pub fn new(timetable: Timetable) -> Result<Self, GraphError> {
        let graph = TransitGraph::build(&timetable)?;
        Ok(Self { timetable, graph })
    }

    /// Load a timetable directory and build the planner in one step.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, PlannerError> {
        let timetable = Timetable::load_dir(dir)?;
        Ok(Self::new(timetable)?)
    }

    /// The loaded timetable snapshot.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// The connection graph built from the snapshot.
    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    /// Display name of a stop, if known.
    pub fn stop_name(&self, stop: &StopId) -> Option<&str> {
        self.timetable.stops().name(stop)
    }

    /// Display names along an itinerary, falling back to the raw id for
    /// any stop missing from the directory.
    pub fn stop_names(&self, itinerary: &Itinerary) -> Vec<String> {
        itinerary
            .stops
            .iter()
            .map(|stop| {
                self.stop_name(stop)
                    .unwrap_or_else(|| stop.as_str())
                    .to_string()
            })
            .collect()
    }

    /// Display name of a route, if known.
    pub fn route_name(&self, route: &RouteId) -> Option<&str> {
        self.timetable.route_name(route)
    }

    /// Find the fastest route between two free-text place names.
    ///
    /// Each name may match several stops (one city, many stations); the
    /// search runs once per candidate departure stop, settling every
    /// candidate destination in that run, and the globally cheapest path
    /// wins. Ambiguity is resolved by cost, never by picking a stop
    /// arbitrarily.
    pub fn find_route(&self, departure: &str, destination: &str) -> RouteOutcome {
        let sources = self.timetable.stops().resolve(departure);
        if sources.is_empty() {
            debug!(place = departure, "departure matched no stops");
            return RouteOutcome::PlaceNotFound {
                place: departure.trim().to_string(),
            };
        }

        let destinations = self.timetable.stops().resolve(destination);
        if destinations.is_empty() {
            debug!(place = destination, "destination matched no stops");
            return RouteOutcome::PlaceNotFound {
                place: destination.trim().to_string(),
            };
        }

        let targets: HashSet<StopId> = destinations.iter().cloned().collect();
        debug!(
            sources = sources.len(),
            destinations = targets.len(),
            "searching candidate stop pairs"
        );

        let mut best: Option<PathResult> = None;
        for source in &sources {
            let reached = shortest_paths(&self.graph, source, &targets);
            for destination in &destinations {
                if let Some(path) = reached.get(destination) {
                    if best
                        .as_ref()
                        .is_none_or(|current| path.total_minutes < current.total_minutes)
                    {
                        best = Some(path.clone());
                    }
                }
            }
        }

        match best {
            Some(path) => {
                debug!(
                    stops = path.stops.len(),
                    total_minutes = path.total_minutes,
                    "route found"
                );
                RouteOutcome::Found(Itinerary::from(path))
            }
            None => RouteOutcome::NoRoute,
        }
    }
}
