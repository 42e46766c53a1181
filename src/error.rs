use thiserror::Error;

use crate::orders::OrderId;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Location '{0}' does not exist. Add it first.")]
    UnknownLocation(String),

    #[error("No {0}.")]
    EmptyCollection(Collection),

    #[error("Order ID {0} not found.")]
    OrderNotFound(OrderId),

    #[error("No order ID left after {0}.")]
    OrderIdsExhausted(OrderId),

    #[error("'{0}' location is missing for optimization.")]
    MissingDepot(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid configuration: {0}")]
    Config(String)
}

/// Which order collection an operation found empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collection {
    PendingOrders,
    CompletedOrders
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Collection::PendingOrders => write!(f, "pending orders in the queue"),
            Collection::CompletedOrders => write!(f, "deliveries completed yet")
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
