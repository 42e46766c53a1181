use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

use crate::config::DispatchConfig;
use crate::error::{DispatchError, Result};
use crate::locations::RouteGraph;
use crate::orders::{Order, OrderBook, OrderId, RouteOptimization};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AddLocation(String),
    AddRoute {start: String, end: String, distance: usize},
    PlaceOrder {restaurant: String, destination: String, price: Decimal},
    ProcessNext,
    TrackLast,
    ListPending,
    OptimizeRoute(OrderId),
    RevertLast,
    Status,
    Help,
    Exit
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    LocationAdded(String),
    LocationExists(String),
    RouteAdded {start: String, end: String, distance: usize},
    OrderPlaced(Order),
    OrderProcessed(Order),
    LastCompleted(Order),
    Pending(Vec<Order>),
    Route(RouteOptimization),
    Reverted(Order),
    Status(Status),
    Help,
    Goodbye
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub pending: usize,
    pub completed: usize,
    pub next_id: OrderId,
    pub locations: BTreeSet<String>
}

/// One dispatch system: a route graph plus the orders moving over it.
///
/// The depot is registered on construction, before any command runs.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    depot: String,
    graph: RouteGraph,
    orders: OrderBook
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new(&DispatchConfig::default())
    }
}

impl Dispatcher {
    pub fn new(config: &DispatchConfig) -> Self {
        let mut graph = RouteGraph::new();
        graph.add_location(&config.depot);
        Dispatcher {depot: config.depot.clone(), graph, orders: OrderBook::new(config.first_order_id)}
    }

    pub fn depot(&self) -> &str {
        &self.depot
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!("Executing {:?}", command);
        match command {
            Command::AddLocation(name) => Ok(self.add_location(&name)),
            Command::AddRoute {start, end, distance} => {
                self.graph.add_route(&start, &end, distance)?;
                Ok(Outcome::RouteAdded {start, end, distance})
            }
            Command::PlaceOrder {restaurant, destination, price} => self.orders
                .place_order(&self.graph, &restaurant, &destination, price)
                .map(|order| Outcome::OrderPlaced(order.clone())),
            Command::ProcessNext => self.orders.process_next().map(|order| Outcome::OrderProcessed(order.clone())),
            Command::TrackLast => self.orders.peek_last_completed().map(|order| Outcome::LastCompleted(order.clone())),
            Command::ListPending => Ok(Outcome::Pending(self.orders.list_pending().into_iter().cloned().collect())),
            Command::OptimizeRoute(id) => self.orders.optimize_route(id, &self.graph, &self.depot).map(Outcome::Route),
            Command::RevertLast => self.orders.revert_last().map(|order| Outcome::Reverted(order.clone())),
            Command::Status => Ok(Outcome::Status(self.status())),
            Command::Help => Ok(Outcome::Help),
            Command::Exit => Ok(Outcome::Goodbye)
        }
    }

    pub fn add_location(&mut self, name: &str) -> Outcome {
        if self.graph.add_location(name) {
            Outcome::LocationAdded(name.to_string())
        } else {
            Outcome::LocationExists(name.to_string())
        }
    }

    pub fn status(&self) -> Status {
        Status {
            pending: self.orders.pending_count(),
            completed: self.orders.completed_count(),
            next_id: self.orders.next_id(),
            locations: self.graph.all_locations()
        }
    }
}

const VERBS: [&str; 9] = ["add-location", "add-route", "place-order", "process-next", "track-last",
    "list-pending", "optimize-route", "revert-last", "status"];

impl FromStr for Command {
    type Err = DispatchError;

    fn from_str(line: &str) -> Result<Command> {
        let tokens = tokenize(line)?;
        let (verb, args) = match tokens.split_first() {
            Some((verb, args)) => (verb.as_str(), args),
            None => return Err(invalid("empty command"))
        };
        Ok(match (verb, args) {
            ("add-location", [name]) => Command::AddLocation(name.clone()),
            ("add-route", [start, end, distance]) => Command::AddRoute {
                start: start.clone(), end: end.clone(), distance: parse_arg(distance, "distance")?},
            ("place-order", [restaurant, destination, price]) => Command::PlaceOrder {
                restaurant: restaurant.clone(), destination: destination.clone(), price: parse_arg(price, "price")?},
            ("process-next", []) => Command::ProcessNext,
            ("track-last", []) => Command::TrackLast,
            ("list-pending", []) => Command::ListPending,
            ("optimize-route", [id]) => Command::OptimizeRoute(parse_arg(id, "order id")?),
            ("revert-last", []) => Command::RevertLast,
            ("status", []) => Command::Status,
            ("help", _) => Command::Help,
            ("exit", _) | ("quit", _) => Command::Exit,
            (known, _) if VERBS.contains(&known) =>
                return Err(invalid(&format!("wrong number of arguments for {} (see help)", known))),
            (other, _) => return Err(invalid(&format!("unknown command '{}'", other)))
        })
    }
}

fn invalid(message: &str) -> DispatchError {
    DispatchError::InvalidCommand(message.to_string())
}

fn parse_arg<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse().map_err(|_| invalid(&format!("'{}' is not a valid {}", raw, what)))
}

/// Splits on whitespace. A double-quoted token may contain spaces; a quote
/// anywhere but around a whole token is rejected.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut closed = false;
    for c in line.chars() {
        if quoted {
            if c == '"' {
                quoted = false;
                closed = true;
            } else {
                current.push(c);
            }
        } else if c.is_whitespace() {
            if in_token {
                tokens.push(std::mem::take(&mut current));
                in_token = false;
            }
            closed = false;
        } else if closed || (c == '"' && in_token) {
            return Err(invalid("quotes must enclose a whole name"));
        } else if c == '"' {
            quoted = true;
            in_token = true;
        } else {
            current.push(c);
            in_token = true;
        }
    }
    if quoted {
        return Err(invalid("unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

pub const HELP: &str = "\
Commands:
  add-location <name>
  add-route <start> <end> <distance km>
  place-order <restaurant> <destination> <price>
  process-next
  track-last
  list-pending
  optimize-route <order id>
  revert-last
  status
  help
  exit
Quote names that contain spaces: add-location \"Main Street\"
Names cannot contain double quotes.";

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::LocationAdded(name) => write!(f, "Location added: {}", name),
            Outcome::LocationExists(name) => write!(f, "Location {} already exists.", name),
            Outcome::RouteAdded {start, end, distance} => write!(f, "Route added: {} <-> {} ({} km)", start, end, distance),
            Outcome::OrderPlaced(order) => write!(f, "New Order Placed (ID: {}): {} -> {}", order.id, order.restaurant, order.destination),
            Outcome::OrderProcessed(order) => write!(f, "Order ID {} delivered successfully!", order.id),
            Outcome::LastCompleted(order) => write!(f, "Last Completed Delivery (ID: {}): {} to {}", order.id, order.restaurant, order.destination),
            Outcome::Pending(orders) if orders.is_empty() => write!(f, "The order queue is empty."),
            Outcome::Pending(orders) => {
                writeln!(f, "--- Pending Orders Queue ---")?;
                for (position, order) in orders.iter().enumerate() {
                    writeln!(f, "{}. {}", position + 1, order)?;
                }
                write!(f, "--------------------------")
            }
            Outcome::Route(optimization) => write!(f, "{}", optimization),
            Outcome::Reverted(order) => write!(f, "Reverted delivery ID {} and placed back in the pending queue.", order.id),
            Outcome::Status(status) => write!(f, "{}", status),
            Outcome::Help => write!(f, "{}", HELP),
            Outcome::Goodbye => write!(f, "Exiting Food Delivery System. Goodbye!")
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "--- System Status ---")?;
        writeln!(f, "Pending Orders (Queue Size): {}", self.pending)?;
        writeln!(f, "Completed Deliveries (Stack Size): {}", self.completed)?;
        writeln!(f, "Next Order ID to use: {}", self.next_id)?;
        writeln!(f, "Total Locations in Graph: {}", self.locations.len())?;
        let names: Vec<&str> = self.locations.iter().map(|name| name.as_str()).collect();
        writeln!(f, "Locations available: {}", names.join(", "))?;
        write!(f, "---------------------")
    }
}
