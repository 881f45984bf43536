//! School inventory storage abstractions.
//!
//! The dashboard reads snapshots through [`SchoolRepository`]; the in-memory
//! implementation stands in for the remote document database.

pub mod school_store;

pub use school_store::{InMemorySchoolStore, SchoolRepository, StoreError};
