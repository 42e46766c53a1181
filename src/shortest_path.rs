use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::distance::Distance;
use crate::frontier::Frontier;
use crate::locations::RouteGraph;

/// A path between two locations, endpoints included, with its total length.
///
/// An unreachable destination is an empty path of length `Distance::Infinity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPath {
    pub path: Vec<String>,
    pub distance: Distance
}

impl ShortestPath {
    pub fn unreachable() -> Self {
        ShortestPath {path: Vec::new(), distance: Distance::Infinity}
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite() && !self.path.is_empty()
    }
}

/// Result of one Dijkstra run from a single start location.
///
/// A run answers any number of destination queries; `shortest_path` is the
/// one-shot form.
#[derive(Clone, Debug)]
pub struct ShortestPaths {
    start: String,
    distances: BTreeMap<String,Distance>,
    predecessors: BTreeMap<String,String>
}

impl ShortestPaths {
    /// Runs Dijkstra from `start`. Returns `None` if `start` is not a location.
    pub fn search(graph: &RouteGraph, start: &str) -> Option<Self> {
        if !graph.has_location(start) {
            debug!("Shortest paths from unknown location {}", start);
            return None;
        }
        let mut distances: BTreeMap<String,Distance> = graph.all_locations().into_iter()
            .map(|name| (name, Distance::Infinity))
            .collect();
        distances.insert(start.to_string(), Distance::ZERO);
        let mut predecessors = BTreeMap::new();
        let mut visited = BTreeSet::new();
        let mut frontier = Frontier::new();
        frontier.insert(start.to_string(), Distance::ZERO);

        while let Some((current, _)) = frontier.remove() {
            if !visited.insert(current.clone()) {
                trace!("Skipping stale frontier entry for {}", current);
                continue;
            }
            let here = distances.get(&current).copied().unwrap_or(Distance::Infinity);
            for (neighbor, weight) in graph.neighbors(&current).iter() {
                let candidate = here + Distance::from(*weight);
                let known = distances.get(neighbor).copied().unwrap_or(Distance::Infinity);
                if candidate < known {
                    trace!("{} reached via {} at {}", neighbor, current, candidate);
                    distances.insert(neighbor.clone(), candidate);
                    predecessors.insert(neighbor.clone(), current.clone());
                    frontier.insert(neighbor.clone(), candidate);
                }
            }
        }
        debug!("Dijkstra from {} visited {} of {} locations", start, visited.len(), graph.len());
        Some(ShortestPaths {start: start.to_string(), distances, predecessors})
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn distance_to(&self, end: &str) -> Distance {
        self.distances.get(end).copied().unwrap_or(Distance::Infinity)
    }

    /// Walks predecessor links back from `end`. `None` when `end` is unknown,
    /// unreachable, or its chain never arrives at the start.
    pub fn path_to(&self, end: &str) -> Option<Vec<String>> {
        if end == self.start {
            return Some(vec![self.start.clone()]);
        }
        if !self.distance_to(end).is_finite() {
            return None;
        }
        let mut path = vec![end.to_string()];
        let mut current = end;
        while let Some(previous) = self.predecessors.get(current) {
            path.push(previous.clone());
            if *previous == self.start {
                path.reverse();
                return Some(path);
            }
            current = previous.as_str();
        }
        None
    }

    pub fn shortest_path_to(&self, end: &str) -> ShortestPath {
        match self.path_to(end) {
            Some(path) => ShortestPath {path, distance: self.distance_to(end)},
            None => ShortestPath::unreachable()
        }
    }
}

pub fn shortest_path(graph: &RouteGraph, start: &str, end: &str) -> ShortestPath {
    ShortestPaths::search(graph, start)
        .map_or_else(ShortestPath::unreachable, |paths| paths.shortest_path_to(end))
}

/// Sums route lengths along consecutive pairs of `path`. `Distance::Infinity`
/// if some pair has no direct route; zero for fewer than two stops.
pub fn path_distance<S: AsRef<str>>(graph: &RouteGraph, path: &[S]) -> Distance {
    path.windows(2)
        .map(|pair| graph.distance(pair[0].as_ref(), pair[1].as_ref())
            .map_or(Distance::Infinity, Distance::from))
        .fold(Distance::ZERO, |total, leg| total + leg)
}
