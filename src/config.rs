use std::env;
use std::str::FromStr;

use log::LevelFilter;

use crate::error::{DispatchError, Result};
use crate::orders::{OrderId, FIRST_ORDER_ID};

pub const DEPOT: &str = "Depot";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Location every delivery agent starts from. Registered on startup.
    pub depot: String,
    pub first_order_id: OrderId,
    pub log_level: LevelFilter
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {depot: DEPOT.to_string(), first_order_id: FIRST_ORDER_ID, log_level: LevelFilter::Info}
    }
}

impl DispatchConfig {
    /// Reads `DISPATCH_DEPOT`, `DISPATCH_FIRST_ORDER_ID` and `DISPATCH_LOG_LEVEL`.
    /// Unset variables keep their defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let defaults = DispatchConfig::default();
        let depot = match lookup("DISPATCH_DEPOT") {
            Some(name) if name.trim().is_empty() => return Err(DispatchError::Config("DISPATCH_DEPOT must not be empty".to_string())),
            Some(name) => name.trim().to_string(),
            None => defaults.depot
        };
        Ok(DispatchConfig {
            depot,
            first_order_id: parse_var(&lookup, "DISPATCH_FIRST_ORDER_ID", defaults.first_order_id)?,
            log_level: parse_var(&lookup, "DISPATCH_LOG_LEVEL", defaults.log_level)?
        })
    }
}

fn parse_var<F: Fn(&str) -> Option<String>, T: FromStr>(lookup: &F, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw.trim().parse()
            .map_err(|_| DispatchError::Config(format!("{} has an invalid value '{}'", key, raw))),
        None => Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use log::LevelFilter;

    use crate::config::DispatchConfig;
    use crate::error::DispatchError;

    fn lookup(vars: Vec<(&'static str, &'static str)>) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<&str,&str> = vars.into_iter().collect();
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_when_unset() {
        let config = DispatchConfig::from_lookup(lookup(vec![])).unwrap();
        assert_eq!(config, DispatchConfig::default());
        assert_eq!(config.depot, "Depot");
        assert_eq!(config.first_order_id, 1001);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides() {
        let config = DispatchConfig::from_lookup(lookup(vec![
            ("DISPATCH_DEPOT", " Hub "), ("DISPATCH_FIRST_ORDER_ID", "5000"), ("DISPATCH_LOG_LEVEL", "debug")])).unwrap();
        assert_eq!(config.depot, "Hub");
        assert_eq!(config.first_order_id, 5000);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let bad_id = DispatchConfig::from_lookup(lookup(vec![("DISPATCH_FIRST_ORDER_ID", "soon")]));
        assert!(matches!(bad_id, Err(DispatchError::Config(_))));
        let bad_level = DispatchConfig::from_lookup(lookup(vec![("DISPATCH_LOG_LEVEL", "loud")]));
        assert!(matches!(bad_level, Err(DispatchError::Config(_))));
        let blank_depot = DispatchConfig::from_lookup(lookup(vec![("DISPATCH_DEPOT", "  ")]));
        assert!(matches!(blank_depot, Err(DispatchError::Config(_))));
    }
}
