use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use log::{info, warn};
use rust_decimal::Decimal;

use crate::distance::Distance;
use crate::error::{Collection, DispatchError, Result};
use crate::locations::RouteGraph;
use crate::shortest_path::{shortest_path, ShortestPath};

pub type OrderId = u32;

pub const FIRST_ORDER_ID: OrderId = 1001;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub restaurant: String,
    pub destination: String,
    pub price: Decimal
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ID: {} | From: {} | To: {} | Price: ${}", self.id, self.restaurant, self.destination, self.price)
    }
}

/// Both legs of a delivery: depot to restaurant, then restaurant to customer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteOptimization {
    pub order_id: OrderId,
    pub to_restaurant: ShortestPath,
    pub to_destination: ShortestPath
}

impl RouteOptimization {
    /// `None` when either leg is unreachable.
    pub fn total(&self) -> Option<u128> {
        (self.to_restaurant.distance + self.to_destination.distance).km()
    }
}

/// Order lifecycle: pending orders leave the front of a queue and land on a
/// completed stack; a revert moves the top of the stack to the back of the
/// queue. Every order ever placed stays in the index.
#[derive(Clone, Debug)]
pub struct OrderBook {
    pending: VecDeque<OrderId>,
    completed: Vec<OrderId>,
    orders: BTreeMap<OrderId,Order>,
    next_id: OrderId
}

impl Default for OrderBook {
    fn default() -> Self {
        OrderBook::new(FIRST_ORDER_ID)
    }
}

impl OrderBook {
    pub fn new(first_id: OrderId) -> Self {
        OrderBook {pending: VecDeque::new(), completed: Vec::new(), orders: BTreeMap::new(), next_id: first_id}
    }

    /// Price is taken as given; zero and negative prices are accepted.
    pub fn place_order(&mut self, graph: &RouteGraph, restaurant: &str, destination: &str, price: Decimal) -> Result<&Order> {
        if let Some(missing) = [restaurant, destination].iter().find(|name| !graph.has_location(name)) {
            warn!("Order {} -> {} rejected: {} is not a location", restaurant, destination, missing);
            return Err(DispatchError::UnknownLocation(missing.to_string()));
        }
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(|| {
            warn!("Order {} -> {} rejected: order ids exhausted at {}", restaurant, destination, id);
            DispatchError::OrderIdsExhausted(id)
        })?;
        let order = Order {id, restaurant: restaurant.to_string(), destination: destination.to_string(), price};
        info!("New order placed (ID: {}): {} -> {}", id, restaurant, destination);
        self.pending.push_back(id);
        self.orders.insert(id, order);
        self.indexed(id)
    }

    pub fn process_next(&mut self) -> Result<&Order> {
        let id = self.pending.pop_front()
            .ok_or(DispatchError::EmptyCollection(Collection::PendingOrders))?;
        self.completed.push(id);
        info!("Order ID {} delivered", id);
        self.indexed(id)
    }

    pub fn peek_last_completed(&self) -> Result<&Order> {
        let id = *self.completed.last()
            .ok_or(DispatchError::EmptyCollection(Collection::CompletedOrders))?;
        self.indexed(id)
    }

    /// The reverted order keeps its id and rejoins the queue at the back.
    pub fn revert_last(&mut self) -> Result<&Order> {
        let id = self.completed.pop()
            .ok_or(DispatchError::EmptyCollection(Collection::CompletedOrders))?;
        self.pending.push_back(id);
        info!("Reverted delivery ID {} to the pending queue", id);
        self.indexed(id)
    }

    pub fn list_pending(&self) -> Vec<&Order> {
        self.pending.iter().filter_map(|id| self.orders.get(id)).collect()
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn optimize_route(&self, id: OrderId, graph: &RouteGraph, depot: &str) -> Result<RouteOptimization> {
        let order = self.order(id).ok_or(DispatchError::OrderNotFound(id))?;
        if !graph.has_location(depot) {
            warn!("Cannot optimize order {}: no {} location", id, depot);
            return Err(DispatchError::MissingDepot(depot.to_string()));
        }
        let optimization = RouteOptimization {
            order_id: id,
            to_restaurant: shortest_path(graph, depot, &order.restaurant),
            to_destination: shortest_path(graph, &order.restaurant, &order.destination)
        };
        if optimization.total().is_none() {
            warn!("Order {} has a leg with no route", id);
        }
        Ok(optimization)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn next_id(&self) -> OrderId {
        self.next_id
    }

    fn indexed(&self, id: OrderId) -> Result<&Order> {
        self.order(id).ok_or(DispatchError::OrderNotFound(id))
    }
}

impl fmt::Display for RouteOptimization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "--- Route Optimization for Order {} ---", self.order_id)?;
        write_leg(f, "1. Agent Path (Depot to Restaurant)", &self.to_restaurant)?;
        write_leg(f, "2. Delivery Path (Restaurant to Destination)", &self.to_destination)?;
        match self.total() {
            Some(total) => write!(f, "Total Estimated Delivery Distance: {}", Distance::Finite(total)),
            None => write!(f, "Total Estimated Delivery Distance: Cannot be calculated (missing route).")
        }
    }
}

fn write_leg(f: &mut fmt::Formatter, title: &str, leg: &ShortestPath) -> fmt::Result {
    writeln!(f, "{} - Total Distance: {}", title, leg.distance)?;
    if leg.is_reachable() {
        writeln!(f, "{}", leg.path.join(" -> "))?;
    }
    Ok(())
}
