//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a school (owner of one inventory tree).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(Uuid);

impl SchoolId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Mock datasets and tests that need stable ids
    /// pass them explicitly via [`SchoolId::from_uuid`] or `FromStr`.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SchoolId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SchoolId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for SchoolId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<SchoolId> for Uuid {
    fn from(value: SchoolId) -> Self {
        value.0
    }
}

impl FromStr for SchoolId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("SchoolId: {e}")))?;
        Ok(Self(uuid))
    }
}
