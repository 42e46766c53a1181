use std::collections::BTreeSet;

use immutable_map::TreeMap;
use log::{info, warn};

use crate::error::{DispatchError, Result};

/// Weighted undirected graph of named locations.
///
/// Every location owns an adjacency map, possibly empty, so a location with no
/// routes is still known. Routes are stored once per direction and always
/// written in pairs, which keeps the graph simple and symmetric.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct RouteGraph {
    distances: TreeMap<String,TreeMap<String,usize>>
}

impl Default for RouteGraph {
    fn default() -> Self {
        RouteGraph::new()
    }
}

impl RouteGraph {
    pub fn new() -> Self {
        RouteGraph {distances: TreeMap::new()}
    }

    /// Builds a graph from `(start, end, distance)` triples, registering any
    /// endpoint not seen before.
    pub fn from_routes(routes: Vec<(&str,&str,usize)>) -> Self {
        let mut graph = RouteGraph::new();
        for (start, end, distance) in routes {
            graph.add_location(start);
            graph.add_location(end);
            graph.add_both_ways(start, end, distance);
        }
        graph
    }

    /// Returns `false` if `name` was already registered.
    pub fn add_location(&mut self, name: &str) -> bool {
        if self.has_location(name) {
            info!("Location {} already exists", name);
            false
        } else {
            self.distances = self.distances.insert(name.to_string(), TreeMap::new());
            info!("Location added: {}", name);
            true
        }
    }

    /// Fails without touching the graph unless both endpoints are registered.
    /// An existing route between the same pair is overwritten in both directions.
    pub fn add_route(&mut self, start: &str, end: &str, distance: usize) -> Result<()> {
        if let Some(missing) = [start, end].iter().find(|name| !self.has_location(name)) {
            warn!("Route {} <-> {} rejected: {} is not a location", start, end, missing);
            return Err(DispatchError::UnknownLocation(missing.to_string()));
        }
        self.add_both_ways(start, end, distance);
        info!("Route added: {} <-> {} ({} km)", start, end, distance);
        Ok(())
    }

    pub fn has_location(&self, name: &str) -> bool {
        self.distances.contains_key(name)
    }

    /// Neighbor name to route length. Empty for an unknown location.
    pub fn neighbors(&self, name: &str) -> TreeMap<String,usize> {
        self.distances.get(name).cloned().unwrap_or_else(TreeMap::new)
    }

    /// Length of the direct route between two locations, if there is one.
    pub fn distance(&self, start: &str, end: &str) -> Option<usize> {
        self.distances.get(start)
            .and_then(|map| map.get(end))
            .copied()
    }

    pub fn all_locations(&self) -> BTreeSet<String> {
        self.distances.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    fn add_both_ways(&mut self, m1: &str, m2: &str, distance: usize) {
        self.add_one_way(m1, m2, distance);
        self.add_one_way(m2, m1, distance);
    }

    fn add_one_way(&mut self, start: &str, end: &str, distance: usize) {
        let updated = self.neighbors(start).insert(end.to_string(), distance);
        self.distances = self.distances.insert(start.to_string(), updated);
    }
}
