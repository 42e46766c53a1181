//! Food-delivery dispatch over a weighted route graph.
//!
//! A [`Dispatcher`] owns the [`RouteGraph`] of named locations and the
//! [`OrderBook`] of orders moving over it. Route optimization plans each
//! order as two Dijkstra legs: depot to restaurant, then restaurant to
//! customer.

pub mod config;
pub mod dispatch;
pub mod distance;
pub mod error;
pub mod frontier;
pub mod locations;
pub mod logging;
pub mod orders;
pub mod shortest_path;

pub use config::DispatchConfig;
pub use dispatch::{Command, Dispatcher, Outcome, Status};
pub use distance::Distance;
pub use error::{Collection, DispatchError};
pub use locations::RouteGraph;
pub use orders::{Order, OrderBook, OrderId, RouteOptimization};
pub use shortest_path::{path_distance, shortest_path, ShortestPath, ShortestPaths};
