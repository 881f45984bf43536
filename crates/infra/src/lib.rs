//! Infrastructure layer: store adapters, mock data, configuration.

pub mod config;
pub mod read_model;
pub mod seed;

pub use config::AppConfig;
pub use read_model::{InMemorySchoolStore, SchoolRepository, StoreError};
