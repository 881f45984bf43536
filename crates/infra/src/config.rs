//! Configuration loading and representation.
//!
//! Configuration comes from the environment:
//!
//! - `UNIFORMOPS_BIND_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `UNIFORMOPS_DATA_PATH`: JSON dataset of schools; the built-in mock
//!   dataset is used when unset

use std::net::SocketAddr;
use std::path::PathBuf;

use uniformops_core::DomainError;

pub const BIND_ADDR_VAR: &str = "UNIFORMOPS_BIND_ADDR";
pub const DATA_PATH_VAR: &str = "UNIFORMOPS_DATA_PATH";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let bind_raw = lookup(BIND_ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|e| {
            DomainError::validation(format!("{BIND_ADDR_VAR}={bind_raw:?}: {e}"))
        })?;

        let data_path = lookup(DATA_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            data_path,
        })
    }
}
