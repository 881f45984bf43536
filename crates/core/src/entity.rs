//! Entity trait: identity + continuity across snapshots.

/// Entity marker + minimal interface.
///
/// Stores key records by this identity; two snapshots of the same school
/// share an id even when their inventory differs.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
