//! Time-weighted connection graph built from the timetable.
//!
//! Each trip contributes a directed edge between every pair of
//! chronologically consecutive stops, weighted by whole minutes from
//! departure at the first to arrival at the second. Where several trips
//! serve the same ordered stop pair, only the minimum weight is kept:
//! nothing downstream uses trip identity per edge, and the collapsed
//! graph is smaller and rebuilds identically from identical tables.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{StopId, TripId};
use crate::timetable::{StopTime, Timetable};

/// Error aborting graph construction.
///
/// Both variants are data errors in the source timetable; the process
/// must not serve queries from a partially built graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A trip carried two stop-times with the same sequence index, so
    /// traversal order is undefined.
    #[error("trip '{trip}' has duplicate stop_sequence {sequence}")]
    DuplicateSequence { trip: TripId, sequence: u32 },

    /// A trip arrives at a stop before departing the previous one.
    /// Negative weights would break the shortest-path search, so the
    /// build fails instead of clamping.
    #[error(
        "trip '{trip}': arrival at '{to}' is {minutes} minutes before departure from '{from}'"
    )]
    NegativeWeight {
        trip: TripId,
        from: StopId,
        to: StopId,
        minutes: i64,
    },
}

/// A directed connection to a neighbouring stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub to: StopId,
    pub minutes: u32,
}

/// Immutable adjacency structure over stops.
///
/// Built once per timetable snapshot; all query paths only read it, so it
/// can be shared freely across concurrent searches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitGraph {
    edges: HashMap<StopId, Vec<Edge>>,
    edge_count: usize,
}

impl TransitGraph {
    /// Build the graph from a timetable's trip tables.
    ///
    /// Stop-times are ordered by sequence index within each trip (the
    /// times themselves are not assumed sorted in the source). Adjacency
    /// lists come out sorted by destination id with one edge per ordered
    /// stop pair, so equal inputs build equal graphs.
    pub fn build(timetable: &Timetable) -> Result<Self, GraphError> {
        let mut adjacency: HashMap<StopId, HashMap<StopId, u32>> = HashMap::new();

        for (trip, stop_times) in timetable.trips() {
            let mut ordered: Vec<&StopTime> = stop_times.iter().collect();
            ordered.sort_unstable_by_key(|st| st.sequence);

            for pair in ordered.windows(2) {
                let (current, next) = (pair[0], pair[1]);

                if current.sequence == next.sequence {
                    return Err(GraphError::DuplicateSequence {
                        trip: trip.clone(),
                        sequence: current.sequence,
                    });
                }

                let minutes = i64::from(next.arrival.minutes_since_midnight())
                    - i64::from(current.departure.minutes_since_midnight());
                if minutes < 0 {
                    return Err(GraphError::NegativeWeight {
                        trip: trip.clone(),
                        from: current.stop.clone(),
                        to: next.stop.clone(),
                        minutes,
                    });
                }
                let minutes = minutes as u32;

                adjacency
                    .entry(current.stop.clone())
                    .or_default()
                    .entry(next.stop.clone())
                    .and_modify(|weight| *weight = (*weight).min(minutes))
                    .or_insert(minutes);
            }
        }

        let mut edges: HashMap<StopId, Vec<Edge>> = HashMap::with_capacity(adjacency.len());
        let mut edge_count = 0;
        for (from, neighbours) in adjacency {
            let mut list: Vec<Edge> = neighbours
                .into_iter()
                .map(|(to, minutes)| Edge { to, minutes })
                .collect();
            list.sort_unstable_by(|a, b| a.to.cmp(&b.to));
            edge_count += list.len();
            edges.insert(from, list);
        }

        debug!(
            stops = edges.len(),
            edges = edge_count,
            "built transit graph"
        );

        Ok(Self { edges, edge_count })
    }

    /// Outgoing edges from a stop. Stops with no departures (or unknown
    /// stops) have an empty list.
    pub fn edges_from(&self, stop: &StopId) -> &[Edge] {
        self.edges.get(stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stops with at least one outgoing edge.
    pub fn stop_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
