//! HTTP API: read-only dashboard endpoints over the inventory core.

pub mod app;
